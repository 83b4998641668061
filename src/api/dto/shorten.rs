//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
///
/// `url` is optional at the type level so that a missing or `null` field
/// reaches validation and produces the documented message.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(required(message = "Please supply \"url\" key"))]
    pub url: Option<String>,
}

/// Response with the public short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub shortened_url: String,
}
