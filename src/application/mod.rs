//! Application layer services implementing business logic.
//!
//! Services coordinate key derivation, validation and repository calls and
//! provide a clean API for HTTP handlers.
//!
//! - [`services::short_link_service::ShortLinkService`] - Short link creation, resolution and deletion

pub mod services;
