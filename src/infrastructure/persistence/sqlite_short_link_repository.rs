//! SQLite implementation of the short link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::RepositoryError;
use crate::utils::db_error::is_unique_violation;

#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    id: i64,
    key: String,
    long_url: String,
    created_at: Option<DateTime<Utc>>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink::new(row.id, row.key, row.long_url, row.created_at)
    }
}

/// SQLite repository for short link storage.
///
/// Key uniqueness is enforced by the unique index on `urls.key`;
/// a violating insert is reported as [`RepositoryError::Conflict`].
pub struct SqliteShortLinkRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortLinkRepository for SqliteShortLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, RepositoryError> {
        let result = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            INSERT INTO urls (key, long_url, created_at)
            VALUES (?1, ?2, ?3)
            RETURNING id, key, long_url, created_at
            "#,
        )
        .bind(&new_link.key)
        .bind(&new_link.long_url)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_unique_violation(&e) => Err(RepositoryError::Conflict { key: new_link.key }),
            Err(e) => Err(RepositoryError::Storage(e)),
        }
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<ShortLink>, RepositoryError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, key, long_url, created_at
            FROM urls
            WHERE key = ?1
            "#,
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn delete(&self, key: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM urls WHERE key = ?1")
            .bind(key)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
