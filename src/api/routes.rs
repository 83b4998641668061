//! API route configuration.

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All public routes.
///
/// # Endpoints
///
/// - `POST /shorten_url` - Create a short URL
/// - `GET  /health`      - Storage health check
/// - `GET  /{code}`      - Redirect to the stored URL
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten_url", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
}
