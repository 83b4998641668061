//! Input sanitization and validation for URLs submitted for shortening.
//!
//! The core stores whatever it is given; these checks run at the HTTP boundary.

use url::Url;

/// Reasons a submitted URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Please supply \"url\" key")]
    Missing,

    #[error("This service only supports HTTP(S) URLs")]
    UnsupportedScheme,

    #[error("Malformed URL, please check the format")]
    Malformed,
}

/// Percent-encodes characters that are unsafe to echo back into HTML or
/// attribute contexts.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     sanitize_url("http://x.org/<script>"),
///     "http://x.org/%3Cscript%3E"
/// );
/// ```
pub fn sanitize_url(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            '"' => out.push_str("%22"),
            '\'' => out.push_str("%27"),
            other => out.push(other),
        }
    }
    out
}

/// Checks that `input` is an absolute HTTP(S) URL with a host.
///
/// Returns the input unchanged on success; the stored URL is exactly what the
/// client sent (after [`sanitize_url`]).
///
/// # Errors
///
/// - [`UrlValidationError::UnsupportedScheme`] if there is no `http`/`https` scheme
/// - [`UrlValidationError::Malformed`] if the URL has no host or contains
///   control characters
pub fn validate_url(input: &str) -> Result<&str, UrlValidationError> {
    // The parser strips tabs and newlines, but the input is stored as-is and
    // must stay a valid `Location` header value.
    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::Malformed);
    }

    let parsed = match Url::parse(input) {
        Ok(url) => url,
        // A scheme-less string ("example.com/x") fails to parse as relative.
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            return Err(UrlValidationError::UnsupportedScheme);
        }
        Err(_) => return Err(UrlValidationError::Malformed),
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(UrlValidationError::UnsupportedScheme);
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(input),
        _ => Err(UrlValidationError::Malformed),
    }
}

/// Sanitizes then validates an optional URL field.
///
/// # Errors
///
/// Returns [`UrlValidationError::Missing`] for `None`, otherwise see
/// [`validate_url`].
pub fn prepare_url(input: Option<&str>) -> Result<String, UrlValidationError> {
    let raw = input.ok_or(UrlValidationError::Missing)?;
    let sanitized = sanitize_url(raw);
    validate_url(&sanitized)?;
    Ok(sanitized)
}
