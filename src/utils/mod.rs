//! Utility functions for key derivation, URL validation, and database errors.
//!
//! - [`key_deriver`] - Truncated-digest short key derivation
//! - [`url_validator`] - Structural validation of long URLs
//! - [`db_error`] - Database error classification

pub mod db_error;
pub mod key_deriver;
pub mod url_validator;
