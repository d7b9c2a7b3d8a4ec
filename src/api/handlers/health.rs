//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{HealthResponse, HealthStatus};
use crate::state::AppState;

/// Reports whether the link store answers queries.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Storage reachable
/// - **503 Service Unavailable**: Storage query failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "storage": { "reachable": true, "short_links": 3 }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let storage = state.short_link_service.count().await.into();
    let response = HealthResponse::new(storage);

    let status = match response.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => {
            tracing::warn!(error = ?response.storage.error, "Health check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    (status, Json(response))
}
