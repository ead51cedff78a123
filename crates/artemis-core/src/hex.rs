//! Hex text decoding for audit fields.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HexError {
    #[error("empty value")]
    Empty,
    #[error(transparent)]
    Invalid(#[from] ::hex::FromHexError),
}

/// Whether `value` is non-empty, of even length and made only of hex digits.
pub fn looks_like_hex(value: &str) -> bool {
    !value.is_empty() && value.len() % 2 == 0 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Decode a hex string to text. Invalid UTF-8 sequences become U+FFFD.
pub fn decode_text(value: &str) -> Result<String, HexError> {
    if value.is_empty() {
        return Err(HexError::Empty);
    }
    let bytes = ::hex::decode(value)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
