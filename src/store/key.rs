//! Key validation
//!
//! Keys become file names, so they are checked against an allow-list before
//! any filesystem access. This closes off path traversal (`../x`, absolute
//! paths) and collisions with reserved names (`.`, `..`, hidden temp files).

use crate::error::{Result, ShelfError};

/// Maximum key length in bytes
pub const MAX_KEY_LEN: usize = 128;

/// Validate a key for use as a storage identifier.
///
/// Rules:
/// - non-empty, at most [`MAX_KEY_LEN`] bytes
/// - characters limited to `A-Z a-z 0-9 . _ -`
/// - must not begin with `.` (reserves dotfiles, `.` and `..`)
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ShelfError::InvalidKey("empty key".to_string()));
    }

    if key.len() > MAX_KEY_LEN {
        return Err(ShelfError::InvalidKey(format!(
            "key exceeds {} bytes",
            MAX_KEY_LEN
        )));
    }

    if key.starts_with('.') {
        return Err(ShelfError::InvalidKey(format!(
            "key must not begin with '.': {:?}",
            key
        )));
    }

    if let Some(c) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        return Err(ShelfError::InvalidKey(format!(
            "disallowed character {:?} in key",
            c
        )));
    }

    Ok(())
}
