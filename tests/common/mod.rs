#![allow(dead_code)]

use digest_shortener::application::services::{DEFAULT_MAX_ATTEMPTS, ShortLinkService};
use digest_shortener::infrastructure::persistence::{SqliteShortLinkRepository, run_migrations};
use digest_shortener::state::AppState;
use digest_shortener::utils::key_deriver::Md5KeyDeriver;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

pub const BASE_URL: &str = "http://localhost/";

/// Opens an empty in-memory database without running migrations.
///
/// A single connection is used because every `sqlite::memory:` connection
/// opens its own private database.
pub async fn empty_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}

/// Opens a migrated in-memory database.
pub async fn test_pool() -> SqlitePool {
    let pool = empty_pool().await;
    run_migrations(&pool).await.unwrap();
    pool
}

pub async fn create_test_link(pool: &SqlitePool, key: &str, url: &str) {
    sqlx::query("INSERT INTO urls (key, long_url, created_at) VALUES (?1, ?2, ?3)")
        .bind(key)
        .bind(url)
        .bind(chrono::Utc::now())
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_links(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_service(pool: SqlitePool) -> Arc<ShortLinkService> {
    let repository = Arc::new(SqliteShortLinkRepository::new(Arc::new(pool)));

    Arc::new(ShortLinkService::new(
        repository,
        Arc::new(Md5KeyDeriver::default()),
        BASE_URL,
        DEFAULT_MAX_ATTEMPTS,
    ))
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    AppState::new(create_test_service(pool))
}
