//! ShortLink entity mapping a derived key to a long URL.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted mapping from a short key to its destination URL.
///
/// ShortLinks are immutable once created and are removed only by an explicit
/// delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortLink {
    pub id: i64,
    pub key: String,
    pub long_url: String,
    /// Absent for rows stored before timestamps were recorded.
    pub created_at: Option<DateTime<Utc>>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        key: String,
        long_url: String,
        created_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            key,
            long_url,
            created_at,
        }
    }
}

/// Input data for inserting a new short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub key: String,
    pub long_url: String,
}
