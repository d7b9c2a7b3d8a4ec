//! Handler for the create short link endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/a" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "key": "cd69b8",
///   "long_url": "https://example.com/a",
///   "short_url": "http://localhost/cd69b8"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is missing or malformed.
/// Returns 500 Internal Server Error on storage failure or key exhaustion.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let link = state.short_link_service.create(&payload.url).await?;
    let short_url = state.short_link_service.short_url(&link.key);

    Ok(Json(ShortenResponse {
        key: link.key,
        long_url: link.long_url,
        short_url,
    }))
}
