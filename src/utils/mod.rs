//! Utility functions for short codes and URL handling.
//!
//! - [`code_codec`] - Id ↔ short code conversion
//! - [`url_validator`] - URL sanitization and validation

pub mod code_codec;
pub mod url_validator;
