//! Repository trait for short link storage.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::RepositoryError;
use async_trait::async_trait;

/// Storage interface for short links.
///
/// Implementations must make [`insert`](ShortLinkRepository::insert) an
/// atomic insert-if-absent: checking for an existing key and writing the new
/// row happen as one operation, so two concurrent inserts of the same key
/// never both succeed.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteShortLinkRepository`] - SQLite with a `UNIQUE` key
/// - [`crate::infrastructure::persistence::InMemoryShortLinkRepository`] - process-local `DashMap`
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Inserts a new short link if its key is free.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Conflict`] if the key is already taken.
    /// Returns [`RepositoryError::Storage`] on backend errors.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, RepositoryError>;

    /// Finds a short link by exact key match.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] on backend errors.
    async fn find_by_key(&self, key: &str) -> Result<Option<ShortLink>, RepositoryError>;

    /// Removes a short link.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if the key was absent.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] on backend errors.
    async fn delete(&self, key: &str) -> Result<bool, RepositoryError>;

    /// Counts stored short links.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] on backend errors.
    async fn count(&self) -> Result<i64, RepositoryError>;
}
