//! Short link route configuration.

use crate::api::handlers::{
    delete_link_handler, health_handler, redirect_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All short link routes.
///
/// # Endpoints
///
/// - `POST   /`        - Create a short link
/// - `GET    /health`  - Storage health check
/// - `GET    /{key}`   - Redirect to the long URL (302)
/// - `DELETE /{key}`   - Remove a short link
///
/// Static segments take priority over `{key}`, so `/health` never resolves
/// as a key.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/{key}", get(redirect_handler).delete(delete_link_handler))
}
