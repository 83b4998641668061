//! Crate-wide error type and its HTTP representation.
//!
//! Every error leaves the service as the same JSON envelope:
//!
//! ```json
//! { "status": 404, "message": "URL not found" }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

/// Application error covering input, lookup and storage failures.
///
/// | Variant        | HTTP status |
/// |----------------|-------------|
/// | `Validation`   | 400         |
/// | `NotFound`     | 404         |
/// | `Conflict`     | 409         |
/// | `Internal`     | 500         |
/// | `Unavailable`  | 503         |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing input, rejected at the HTTP boundary.
    #[error("{message}")]
    Validation { message: String },

    /// Unknown or malformed short code.
    #[error("{message}")]
    NotFound { message: String },

    /// A record with the same id already exists.
    ///
    /// Ids come from the allocator, so this means the counter went backwards.
    #[error("{message}")]
    Conflict { message: String },

    /// The backing store could not be reached.
    #[error("{message}")]
    Unavailable { message: String },

    /// Any other server-side failure.
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the response envelope.
    ///
    /// Server-side messages are replaced with a generic reason so storage
    /// details never reach clients.
    pub fn to_error_body(&self) -> ErrorBody {
        let status = self.status_code();
        let message = match self {
            Self::Validation { message } | Self::NotFound { message } => message.clone(),
            Self::Conflict { .. } | Self::Internal { .. } => "Internal server error".to_string(),
            Self::Unavailable { .. } => "Storage temporarily unavailable".to_string(),
        };

        ErrorBody {
            status: status.as_u16(),
            message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::Conflict { message } | Self::Internal { message } => {
                tracing::error!(error = %message, "Request failed");
            }
            Self::Unavailable { message } => {
                tracing::warn!(error = %message, "Storage unavailable");
            }
            Self::Validation { .. } | Self::NotFound { .. } => {}
        }

        (self.status_code(), Json(self.to_error_body())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(format!(
                "Unique constraint violation: {}",
                db.constraint().unwrap_or("unknown")
            ));
        }

        match e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => AppError::unavailable(format!("Database unreachable: {e}")),
            other => AppError::internal(format!("Database error: {other}")),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::bad_request(message)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::unavailable("x").status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_errors_keep_message() {
        let body = AppError::bad_request("This service only supports HTTP(S) URLs").to_error_body();
        assert_eq!(body.status, 400);
        assert_eq!(body.message, "This service only supports HTTP(S) URLs");

        let body = AppError::not_found("URL not found").to_error_body();
        assert_eq!(body.status, 404);
        assert_eq!(body.message, "URL not found");
    }

    #[test]
    fn test_server_errors_hide_details() {
        let body = AppError::internal("Database error: relation \"urls\" does not exist")
            .to_error_body();
        assert_eq!(body.status, 500);
        assert!(!body.message.contains("urls"));

        let body = AppError::conflict("Unique constraint violation: urls_pkey").to_error_body();
        assert_eq!(body.status, 409);
        assert!(!body.message.contains("urls_pkey"));
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::not_found("URL not found");
        assert_eq!(err.to_string(), "URL not found");
    }

    #[test]
    fn test_pool_timeout_maps_to_unavailable() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::Unavailable { .. }));
    }

    #[test]
    fn test_row_not_found_maps_to_internal() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Internal { .. }));
    }
}
