//! DTOs for the link creation endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};
use validator::Validate;

use crate::application::services::CreateShortLink;
use crate::domain::expiry::INVALID_VALIDITY_MESSAGE;
use crate::error::AppError;
use crate::utils::code_generator::INVALID_SHORTCODE_MESSAGE;

/// Request to shorten a URL.
///
/// `validity` and `shortcode` keep the difference between a missing field
/// (`None`) and an explicit `null` (`Some(None)`): only a missing field falls
/// back to the default. They are kept as raw JSON so that a wrong type gets
/// the field's own error message instead of a generic body rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be absolute HTTP/HTTPS).
    #[validate(required(message = "Invalid or missing 'url' field"))]
    pub url: Option<String>,

    /// Minutes until the link expires (default 30).
    #[serde(default, deserialize_with = "present")]
    pub validity: Option<Option<Value>>,

    /// Optional custom shortcode (3-32 alphanumeric characters).
    #[serde(default, deserialize_with = "present")]
    pub shortcode: Option<Option<Value>>,
}

/// Marks a field as present, keeping a `null` value as `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Reads a JSON number as whole minutes. `5` and `5.0` qualify, `5.5` does not.
fn whole_minutes(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };

    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

impl ShortenRequest {
    /// Converts the request into service input.
    ///
    /// Range and format checks happen in the link service; this only rejects
    /// values of the wrong JSON type and explicit `null`s.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a `validity` that is not a whole
    /// number or a `shortcode` that is not a string.
    pub fn into_command(self) -> Result<CreateShortLink, AppError> {
        let validity = match self.validity {
            None => None,
            Some(raw) => {
                let raw = raw.unwrap_or(Value::Null);
                let minutes = whole_minutes(&raw).ok_or_else(|| {
                    AppError::bad_request(INVALID_VALIDITY_MESSAGE, json!({ "validity": raw }))
                })?;
                Some(minutes)
            }
        };

        let shortcode = match self.shortcode {
            None => None,
            Some(Some(Value::String(code))) => Some(code),
            Some(raw) => {
                return Err(AppError::bad_request(
                    INVALID_SHORTCODE_MESSAGE,
                    json!({ "shortcode": raw.unwrap_or(Value::Null) }),
                ));
            }
        };

        Ok(CreateShortLink {
            url: self.url.unwrap_or_default(),
            validity,
            shortcode,
        })
    }
}

/// Response for a created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_link: String,
    pub expiry: DateTime<Utc>,
}
