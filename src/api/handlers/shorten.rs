//! Handler for the link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::application::services::short_url;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validator::prepare_url;

/// Creates a short URL for a long one.
///
/// # Endpoint
///
/// `POST /shorten_url`
///
/// # Request Body
///
/// ```json
/// { "url": "http://davtyan.org" }
/// ```
///
/// # Response
///
/// ```json
/// { "shortened_url": "http://localhost:3000/a" }
/// ```
///
/// The URL is sanitized (`<`, `>`, `"` and `'` percent-encoded) before it is
/// validated and stored. Submitting the same URL twice returns two different
/// short URLs.
///
/// # Errors
///
/// Returns 400 Bad Request with `{"status":400,"message":...}` if the body is
/// not JSON, the `url` key is missing, the scheme is not HTTP(S), or the host
/// is empty.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let url = prepare_url(payload.url.as_deref())
        .map_err(|e| AppError::bad_request(e.to_string()))?;

    let code = state.shortening_service.shorten(&url).await?;

    Ok(Json(ShortenResponse {
        shortened_url: short_url(&state.root_uri, &code),
    }))
}
