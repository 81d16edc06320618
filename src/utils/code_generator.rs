//! Shortcode generation and validation utilities.
//!
//! Provides cryptographically secure random candidates and the format rule
//! shared by custom codes and incoming redirect paths.

use crate::error::AppError;
use serde_json::json;

/// Characters a shortcode may contain.
const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default length of generated shortcodes.
pub const DEFAULT_CODE_LENGTH: usize = 7;

/// Shortest allowed shortcode.
pub const MIN_CODE_LENGTH: usize = 3;

/// Longest allowed shortcode.
pub const MAX_CODE_LENGTH: usize = 32;

/// Generates a random candidate shortcode of `length` characters.
///
/// Draws `length` bytes from the OS random source and maps each byte onto
/// the 62-character alphabet by modulo. The result is not checked against
/// the registry.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the OS random source fails.
///
/// # Examples
///
/// ```ignore
/// let code = generate_candidate(7)?;
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_candidate(length: usize) -> Result<String, AppError> {
    let mut buffer = vec![0u8; length];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate random bytes",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(buffer
        .iter()
        .map(|b| ALPHABET[*b as usize % ALPHABET.len()] as char)
        .collect())
}

/// Returns true iff `code` is 3-32 ASCII letters and digits.
pub fn is_valid_shortcode(code: &str) -> bool {
    (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&code.len())
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Message returned for any unusable custom shortcode.
pub const INVALID_SHORTCODE_MESSAGE: &str = "Invalid 'shortcode'. 3-32 alphanumeric characters.";

/// Validates a user-provided custom shortcode.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the code breaks the format rule.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if is_valid_shortcode(code) {
        Ok(())
    } else {
        Err(AppError::bad_request(
            INVALID_SHORTCODE_MESSAGE,
            json!({ "shortcode": code }),
        ))
    }
}
