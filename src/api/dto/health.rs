//! Health check payload.

use serde::Serialize;

use crate::error::ShortLinkError;

/// Overall service state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub storage: StorageHealth,
}

/// Result of probing the link store with a count query.
#[derive(Debug, Serialize)]
pub struct StorageHealth {
    pub reachable: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_links: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<i64, ShortLinkError>> for StorageHealth {
    fn from(count: Result<i64, ShortLinkError>) -> Self {
        match count {
            Ok(n) => Self {
                reachable: true,
                short_links: Some(n),
                error: None,
            },
            Err(e) => Self {
                reachable: false,
                short_links: None,
                error: Some(e.to_string()),
            },
        }
    }
}

impl HealthResponse {
    pub fn new(storage: StorageHealth) -> Self {
        let status = if storage.reachable {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            storage,
        }
    }
}
