//! Character name field handling.
//!
//! The name lives in a 16-byte fixed field: the logical value is the
//! prefix up to (not including) the first zero byte, or all 16 bytes
//! when no zero byte exists. Every byte past the logical value through
//! the end of the field is zero.

use crate::constants::NAME_FIELD_LEN;
use crate::error::SaveError;

/// Shortest accepted character name.
pub const NAME_MIN_LEN: usize = 2;
/// Longest accepted character name; the 16th slot stays free so shorter
/// names always carry a terminator.
pub const NAME_MAX_LEN: usize = 15;

/// Decodes the logical name from a fixed field.
pub fn decode_field(field: &[u8; NAME_FIELD_LEN]) -> &str {
    let end = field.iter().position(|&c| c == 0).unwrap_or(field.len());
    std::str::from_utf8(&field[..end]).unwrap_or("*UNKNOWN*")
}

/// Encodes a validated name left-aligned into a zero-filled field.
///
/// `candidate` must already have passed [`validate`]; in particular it
/// fits in 15 bytes.
pub fn encode_field(candidate: &str) -> [u8; NAME_FIELD_LEN] {
    let mut field = [0u8; NAME_FIELD_LEN];
    field[..candidate.len()].copy_from_slice(candidate.as_bytes());
    field
}

/// Checks a candidate character name.
///
/// Valid names are 2-15 characters long and consist of one or two runs
/// of ASCII alphabetic characters, with at most one `-` or `_` strictly
/// between the runs.
///
/// # Arguments
/// * `candidate` - The name to check.
///
/// # Returns
/// * `Ok(())` when the name may be stored, a `NameLength`/`NameFormat`
///   error otherwise.
pub fn validate(candidate: &str) -> Result<(), SaveError> {
    let bytes = candidate.as_bytes();

    if bytes.len() < NAME_MIN_LEN || bytes.len() > NAME_MAX_LEN {
        return Err(SaveError::NameLength(bytes.len()));
    }

    let mut separators = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        match byte {
            b'-' | b'_' => {
                separators += 1;
                if i == 0 || i + 1 == bytes.len() || separators > 1 {
                    return Err(SaveError::NameFormat(candidate.to_string()));
                }
            }
            byte if byte.is_ascii_alphabetic() => {}
            _ => return Err(SaveError::NameFormat(candidate.to_string())),
        }
    }

    Ok(())
}
