//! Short link creation, resolution, and deletion.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::{RepositoryError, ShortLinkError};
use crate::utils::key_deriver::{KeyDeriver, perturb};
use crate::utils::url_validator::validate_url;

/// Default bound on insert attempts per `create` call.
pub const DEFAULT_MAX_ATTEMPTS: usize = 64;

/// Service owning the key-to-URL mapping.
///
/// Derives candidate keys, resolves collisions by re-deriving from a
/// perturbed candidate, and relies on the repository's atomic insert for
/// uniqueness under concurrent writers.
pub struct ShortLinkService {
    repository: Arc<dyn ShortLinkRepository>,
    deriver: Arc<dyn KeyDeriver>,
    base_url: String,
    max_attempts: usize,
}

impl ShortLinkService {
    /// Creates a new short link service.
    ///
    /// `max_attempts` is raised to at least 1.
    pub fn new(
        repository: Arc<dyn ShortLinkRepository>,
        deriver: Arc<dyn KeyDeriver>,
        base_url: impl Into<String>,
        max_attempts: usize,
    ) -> Self {
        Self {
            repository,
            deriver,
            base_url: base_url.into(),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Creates a short link for `long_url`.
    ///
    /// # Collision Resolution
    ///
    /// The first candidate is derived from the URL itself. Each time the
    /// insert reports the key as taken, the next candidate is derived from
    /// the previous candidate with a fixed suffix appended. The insert is the
    /// existence check, so a key taken by a concurrent writer between
    /// derivation and insert is handled like any other collision.
    ///
    /// Submitting the same URL twice yields two distinct short links.
    ///
    /// # Errors
    ///
    /// Returns [`ShortLinkError::InvalidInput`] if the URL is malformed; nothing
    /// is derived or stored in that case.
    ///
    /// Returns [`ShortLinkError::KeyExhaustion`] if `max_attempts` candidates
    /// were taken or the candidate chain cycled.
    ///
    /// Returns [`ShortLinkError::Storage`] on backend errors.
    pub async fn create(&self, long_url: &str) -> Result<ShortLink, ShortLinkError> {
        validate_url(long_url)?;

        let mut candidate = self.deriver.derive(long_url);
        let mut tried = HashSet::new();

        for attempt in 1..=self.max_attempts {
            if !tried.insert(candidate.clone()) {
                tracing::warn!(key = %candidate, attempt, "Key derivation cycled");
                return Err(ShortLinkError::KeyExhaustion {
                    attempts: attempt - 1,
                });
            }

            let new_link = NewShortLink {
                key: candidate.clone(),
                long_url: long_url.to_string(),
            };

            match self.repository.insert(new_link).await {
                Ok(link) => {
                    tracing::info!(key = %link.key, attempt, "Short link created");
                    return Ok(link);
                }
                Err(RepositoryError::Conflict { key }) => {
                    tracing::debug!(%key, attempt, "Key collision, re-deriving");
                    candidate = self.deriver.derive(&perturb(&key));
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::warn!(
            attempts = self.max_attempts,
            "Exhausted collision attempts"
        );

        Err(ShortLinkError::KeyExhaustion {
            attempts: self.max_attempts,
        })
    }

    /// Resolves a key to its short link.
    ///
    /// # Errors
    ///
    /// Returns [`ShortLinkError::NotFound`] if no short link has this key.
    /// Returns [`ShortLinkError::Storage`] on backend errors.
    pub async fn resolve(&self, key: &str) -> Result<ShortLink, ShortLinkError> {
        self.repository
            .find_by_key(key)
            .await?
            .ok_or_else(|| ShortLinkError::NotFound(key.to_string()))
    }

    /// Deletes the short link with this key.
    ///
    /// # Errors
    ///
    /// Returns [`ShortLinkError::NotFound`] if the key is absent, including on a
    /// second delete of the same key.
    /// Returns [`ShortLinkError::Storage`] on backend errors.
    pub async fn delete(&self, key: &str) -> Result<(), ShortLinkError> {
        if self.repository.delete(key).await? {
            tracing::info!(%key, "Short link deleted");
            Ok(())
        } else {
            Err(ShortLinkError::NotFound(key.to_string()))
        }
    }

    /// Counts stored short links.
    pub async fn count(&self) -> Result<i64, ShortLinkError> {
        Ok(self.repository.count().await?)
    }

    /// Builds the public short URL for a key.
    pub fn short_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockShortLinkRepository;
    use crate::utils::key_deriver::Md5KeyDeriver;
    use chrono::Utc;
    use mockall::Sequence;

    fn create_test_link(key: &str, url: &str) -> ShortLink {
        ShortLink::new(1, key.to_string(), url.to_string(), Some(Utc::now()))
    }

    fn service(repo: MockShortLinkRepository) -> ShortLinkService {
        ShortLinkService::new(
            Arc::new(repo),
            Arc::new(Md5KeyDeriver::default()),
            "http://localhost/",
            DEFAULT_MAX_ATTEMPTS,
        )
    }

    fn conflict(key: &str) -> RepositoryError {
        RepositoryError::Conflict {
            key: key.to_string(),
        }
    }

    /// Always derives the same key, so every retry revisits it.
    struct ConstantDeriver;

    impl KeyDeriver for ConstantDeriver {
        fn derive(&self, _input: &str) -> String {
            "aaaaaa".to_string()
        }
    }

    #[tokio::test]
    async fn test_create_uses_derived_key() {
        let mut mock_repo = MockShortLinkRepository::new();

        mock_repo
            .expect_insert()
            .withf(|new_link| {
                new_link.key == "cd69b8" && new_link.long_url == "https://example.com/a"
            })
            .times(1)
            .returning(|new_link| Ok(create_test_link(&new_link.key, &new_link.long_url)));

        let link = service(mock_repo)
            .create("https://example.com/a")
            .await
            .unwrap();

        assert_eq!(link.key, "cd69b8");
        assert_eq!(link.long_url, "https://example.com/a");
    }

    #[tokio::test]
    async fn test_create_rederives_from_perturbed_key_on_conflict() {
        let mut mock_repo = MockShortLinkRepository::new();
        let mut seq = Sequence::new();

        mock_repo
            .expect_insert()
            .withf(|new_link| new_link.key == "1f1ff1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_link| Err(conflict(&new_link.key)));

        mock_repo
            .expect_insert()
            .withf(|new_link| {
                new_link.key == "aaf84e" && new_link.long_url == "https://example.com/page/5945"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_link| Ok(create_test_link(&new_link.key, &new_link.long_url)));

        let link = service(mock_repo)
            .create("https://example.com/page/5945")
            .await
            .unwrap();

        assert_eq!(link.key, "aaf84e");
    }

    #[tokio::test]
    async fn test_create_invalid_url_touches_no_storage() {
        let mut mock_repo = MockShortLinkRepository::new();
        mock_repo.expect_insert().times(0);

        let result = service(mock_repo).create("not-a-url").await;

        assert!(matches!(result, Err(ShortLinkError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_create_propagates_storage_failure() {
        let mut mock_repo = MockShortLinkRepository::new();
        mock_repo
            .expect_insert()
            .times(1)
            .returning(|_| Err(RepositoryError::Storage(sqlx::Error::PoolTimedOut)));

        let result = service(mock_repo).create("https://example.com").await;

        assert!(matches!(
            result,
            Err(ShortLinkError::Storage(RepositoryError::Storage(_)))
        ));
    }

    #[tokio::test]
    async fn test_create_exhausts_after_max_attempts() {
        let mut mock_repo = MockShortLinkRepository::new();
        mock_repo
            .expect_insert()
            .times(3)
            .returning(|new_link| Err(conflict(&new_link.key)));

        let service = ShortLinkService::new(
            Arc::new(mock_repo),
            Arc::new(Md5KeyDeriver::default()),
            "http://localhost/",
            3,
        );

        let result = service.create("https://example.com").await;

        assert!(matches!(
            result,
            Err(ShortLinkError::KeyExhaustion { attempts: 3 })
        ));
    }

    #[tokio::test]
    async fn test_create_detects_cycle() {
        let mut mock_repo = MockShortLinkRepository::new();
        mock_repo
            .expect_insert()
            .times(1)
            .returning(|new_link| Err(conflict(&new_link.key)));

        let service = ShortLinkService::new(
            Arc::new(mock_repo),
            Arc::new(ConstantDeriver),
            "http://localhost/",
            DEFAULT_MAX_ATTEMPTS,
        );

        let result = service.create("https://example.com").await;

        assert!(matches!(
            result,
            Err(ShortLinkError::KeyExhaustion { attempts: 1 })
        ));
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut mock_repo = MockShortLinkRepository::new();
        mock_repo
            .expect_find_by_key()
            .withf(|key| key == "cd69b8")
            .times(1)
            .returning(|key| Ok(Some(create_test_link(key, "https://example.com/a"))));

        let link = service(mock_repo).resolve("cd69b8").await.unwrap();

        assert_eq!(link.long_url, "https://example.com/a");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_repo = MockShortLinkRepository::new();
        mock_repo
            .expect_find_by_key()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(mock_repo).resolve("doesnotexist").await;

        assert!(matches!(result, Err(ShortLinkError::NotFound(key)) if key == "doesnotexist"));
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let mut mock_repo = MockShortLinkRepository::new();
        mock_repo
            .expect_delete()
            .withf(|key| key == "cd69b8")
            .times(1)
            .returning(|_| Ok(true));

        assert!(service(mock_repo).delete("cd69b8").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_reports_not_found() {
        let mut mock_repo = MockShortLinkRepository::new();
        mock_repo.expect_delete().times(1).returning(|_| Ok(false));

        let result = service(mock_repo).delete("cd69b8").await;

        assert!(matches!(result, Err(ShortLinkError::NotFound(_))));
    }

    #[test]
    fn test_short_url_joins_base_and_key() {
        let service = service(MockShortLinkRepository::new());
        assert_eq!(service.short_url("cd69b8"), "http://localhost/cd69b8");

        let service = ShortLinkService::new(
            Arc::new(MockShortLinkRepository::new()),
            Arc::new(Md5KeyDeriver::default()),
            "https://s.example.com",
            1,
        );
        assert_eq!(service.short_url("cd69b8"), "https://s.example.com/cd69b8");
    }
}
