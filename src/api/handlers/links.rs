//! Handler for short link removal.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::links::DeleteResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Deletes a short link.
///
/// # Endpoint
///
/// `DELETE /{key}`
///
/// # Response
///
/// ```json
/// { "message": "URL deleted" }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the key doesn't exist or was already deleted.
pub async fn delete_link_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.short_link_service.delete(&key).await?;

    Ok(Json(DeleteResponse {
        message: "URL deleted",
    }))
}
