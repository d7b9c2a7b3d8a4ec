//! Short link repository implementations and SQLite pool setup.
//!
//! - [`SqliteShortLinkRepository`] - Durable storage via SQLx
//! - [`InMemoryShortLinkRepository`] - Process-local storage for tests and ephemeral runs

pub mod memory_short_link_repository;
pub mod sqlite_short_link_repository;

pub use memory_short_link_repository::InMemoryShortLinkRepository;
pub use sqlite_short_link_repository::SqliteShortLinkRepository;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Opens a SQLite connection pool, creating the database file if missing.
///
/// # Errors
///
/// Returns an error if the URL is malformed or the database cannot be opened.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_with(options)
        .await
}

/// Applies the embedded schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
