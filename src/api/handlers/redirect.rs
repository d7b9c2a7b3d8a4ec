//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its original URL.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// Responds with **302 Found** and a `Location` header.
///
/// # Errors
///
/// Returns 404 Not Found if the key doesn't exist.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.short_link_service.resolve(&key).await?;

    tracing::debug!(%key, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, link.long_url)]))
}
