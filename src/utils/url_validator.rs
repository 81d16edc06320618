//! Long URL validation.
//!
//! URLs are stored exactly as supplied; this module decides whether they are
//! acceptable redirect targets and renders them for the `Location` header.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Checks that `input` is an absolute HTTP(S) URL usable as a redirect target.
///
/// # Security
///
/// Rejects `javascript:`, `data:`, `file:` and every other non-HTTP scheme.
///
/// # Errors
///
/// Returns a [`UrlValidationError`] describing the first failed check.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_long_url("https://example.com/path?q=1").is_ok());
/// assert!(validate_long_url("javascript:alert(1)").is_err());
/// ```
pub fn validate_long_url(input: &str) -> Result<(), UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}

/// Renders a stored URL in its ASCII wire form.
///
/// Internationalized hosts become punycode and non-ASCII path or query
/// characters are percent-encoded, so the result is always a valid header
/// value.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(redirect_location("https://bücher.de/ü").unwrap(), "https://xn--bcher-kva.de/%C3%BC");
/// ```
pub fn redirect_location(stored: &str) -> Result<String, UrlValidationError> {
    Url::parse(stored)
        .map(String::from)
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))
}
