//! Reversible mapping between record ids and short codes.
//!
//! Codes are the base-35 representation of `id - 1`, written with the digits
//! of [`ALPHABET`] (index in the alphabet = digit value). The alphabet has no
//! `0` and no uppercase letters, so every emitted code is lowercase.
//!
//! ```ignore
//! assert_eq!(encode(1).unwrap(), "a");
//! assert_eq!(encode(123).unwrap(), "dr");
//! assert_eq!(decode("dr").unwrap(), 123);
//! ```

use std::sync::LazyLock;

/// Digit symbols in value order.
pub const ALPHABET: &[u8; 35] = b"abcdefghijklmnopqrstuvwxyz123456789";

const BASE: i64 = ALPHABET.len() as i64;

/// Marks bytes that are not part of the alphabet.
const NOT_A_DIGIT: u8 = u8::MAX;

/// Byte → digit value table, built once and shared read-only.
static DIGIT_VALUES: LazyLock<[u8; 256]> = LazyLock::new(|| {
    let mut table = [NOT_A_DIGIT; 256];
    for (value, &symbol) in ALPHABET.iter().enumerate() {
        table[symbol as usize] = value as u8;
    }
    table
});

/// Errors produced by [`encode`] and [`decode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("id must be a positive integer, got {0}")]
    InvalidId(i64),

    #[error("character {0:?} is not part of the code alphabet")]
    InvalidCode(char),

    #[error("code is empty")]
    Empty,

    #[error("code is too long to represent a valid id")]
    Overflow,
}

/// Encodes a positive id as a short code.
///
/// # Errors
///
/// Returns [`CodecError::InvalidId`] when `id < 1`.
pub fn encode(id: i64) -> Result<String, CodecError> {
    if id < 1 {
        return Err(CodecError::InvalidId(id));
    }

    let mut value = id - 1;

    // The loop below emits nothing for zero.
    if value == 0 {
        return Ok((ALPHABET[0] as char).to_string());
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ALPHABET[(value % BASE) as usize]);
        value /= BASE;
    }
    digits.reverse();

    Ok(digits.into_iter().map(char::from).collect())
}

/// Decodes a short code back into its id.
///
/// The input must already be lowercase; callers that accept user input fold
/// case first.
///
/// # Errors
///
/// - [`CodecError::Empty`] for an empty string
/// - [`CodecError::InvalidCode`] when a character is outside [`ALPHABET`]
/// - [`CodecError::Overflow`] when the value does not fit in an `i64` id
pub fn decode(code: &str) -> Result<i64, CodecError> {
    if code.is_empty() {
        return Err(CodecError::Empty);
    }

    let mut value: i64 = 0;
    for ch in code.chars() {
        let digit = digit_value(ch).ok_or(CodecError::InvalidCode(ch))?;
        value = value
            .checked_mul(BASE)
            .and_then(|v| v.checked_add(i64::from(digit)))
            .ok_or(CodecError::Overflow)?;
    }

    value.checked_add(1).ok_or(CodecError::Overflow)
}

fn digit_value(ch: char) -> Option<u8> {
    if !ch.is_ascii() {
        return None;
    }
    match DIGIT_VALUES[ch as usize] {
        NOT_A_DIGIT => None,
        value => Some(value),
    }
}
