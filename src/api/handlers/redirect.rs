//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Codes are case-insensitive. Every successful lookup refreshes the
/// record's last-visit time, which keeps it from being cleaned up.
///
/// # Responses
///
/// - 302 Found with `Location` set to the stored URL
/// - 404 Not Found if the code is unknown or malformed
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let url = state.shortening_service.resolve(&code).await?;
    let location = HeaderValue::try_from(url)
        .map_err(|e| AppError::internal(format!("Stored URL is not a valid Location: {e}")))?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
