//! Core domain entities.
//!
//! - [`ShortLink`] - A persisted key to long URL mapping
//! - [`NewShortLink`] - Input for inserting a ShortLink

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
