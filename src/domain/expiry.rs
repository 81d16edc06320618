//! Expiry policy for short links.
//!
//! Expiry is a pure function of wall-clock time. Nothing sweeps or mutates
//! expired records; every read evaluates [`is_expired`] against its own `now`.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::domain::entities::ShortLinkRecord;
use crate::error::AppError;

/// Validity window applied when the caller does not supply one.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// Returns `created_at + validity_minutes`, or `None` if the result does not
/// fit in a timestamp.
pub fn compute_expiry(created_at: DateTime<Utc>, validity_minutes: i64) -> Option<DateTime<Utc>> {
    let window = Duration::try_minutes(validity_minutes)?;
    created_at.checked_add_signed(window)
}

/// A record is expired once `now` is strictly after its `expires_at`.
pub fn is_expired(record: &ShortLinkRecord, now: DateTime<Utc>) -> bool {
    now > record.expires_at
}

/// Message returned for any unusable `validity` value.
pub const INVALID_VALIDITY_MESSAGE: &str = "'validity' must be a positive integer (minutes)";

/// Resolves the requested validity window in minutes.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the supplied value is zero or negative.
pub fn resolve_validity(requested: Option<i64>, default_minutes: i64) -> Result<i64, AppError> {
    match requested {
        None => Ok(default_minutes),
        Some(minutes) if minutes > 0 => Ok(minutes),
        Some(minutes) => Err(AppError::bad_request(
            INVALID_VALIDITY_MESSAGE,
            json!({ "validity": minutes }),
        )),
    }
}
