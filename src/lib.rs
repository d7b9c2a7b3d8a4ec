//! # Digest Shortener
//!
//! A URL shortener that derives fixed-width keys from a truncated MD5 digest
//! and guarantees key uniqueness at the storage layer.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The ShortLink entity and repository trait
//! - **Application Layer** ([`application`]) - Key derivation, collision resolution, lookups
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite and in-memory storage
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Keys
//!
//! A key is the first 6 hex characters of `md5(long_url)`. When a key is
//! taken, the next candidate is `md5(previous_key + "1")`, repeated until an
//! insert succeeds or the attempt bound is reached. The insert itself is the
//! uniqueness check, so concurrent writers cannot claim the same key.
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://urls.db"
//! cargo run
//!
//! curl -X POST localhost:3000/ -H 'content-type: application/json' \
//!      -d '{"url": "https://example.com/a"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ShortLinkService;
    pub use crate::domain::entities::{NewShortLink, ShortLink};
    pub use crate::domain::repositories::ShortLinkRepository;
    pub use crate::error::{AppError, RepositoryError, ShortLinkError};
    pub use crate::state::AppState;
    pub use crate::utils::key_deriver::{KeyDeriver, Md5KeyDeriver};
}
