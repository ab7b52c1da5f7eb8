//! Plain text decoding.

use crate::error::Result;

/// Decode a plain text payload as UTF-8.
///
/// Invalid UTF-8 is an error; no lossy replacement is attempted.
pub fn decode_text(data: &[u8]) -> Result<String> {
    Ok(String::from_utf8(data.to_vec())?)
}
