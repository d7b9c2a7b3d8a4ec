//! DTOs for short link management endpoints.

use serde::Serialize;

/// Acknowledgement returned after a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}
