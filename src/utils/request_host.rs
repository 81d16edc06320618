//! Public base URL derivation from HTTP request headers.

use axum::http::{HeaderMap, header};

/// Scheme used when the request does not say otherwise.
const DEFAULT_SCHEME: &str = "http";

/// Builds `scheme://host[:port]` for links returned to the caller.
///
/// The host comes from the `Host` header with its port kept, since the short
/// link must point back at the same listener. The scheme comes from
/// `X-Forwarded-Proto` when a proxy set it, otherwise `http`.
///
/// Returns `None` if the `Host` header is missing, empty or not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "localhost:3000".parse().unwrap());
///
/// assert_eq!(base_url_from_headers(&headers).unwrap(), "http://localhost:3000");
/// ```
pub fn base_url_from_headers(headers: &HeaderMap) -> Option<String> {
    let host = headers
        .get(header::HOST)?
        .to_str()
        .ok()
        .map(str::trim)
        .filter(|h| !h.is_empty())?;

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|p| matches!(*p, "http" | "https"))
        .unwrap_or(DEFAULT_SCHEME);

    Some(format!("{}://{}", scheme, host))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};

    #[test]
    fn test_base_url_simple() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("example.com"));

        assert_eq!(
            base_url_from_headers(&headers).unwrap(),
            "http://example.com"
        );
    }

    #[test]
    fn test_base_url_keeps_port() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));

        assert_eq!(
            base_url_from_headers(&headers).unwrap(),
            "http://localhost:3000"
        );
    }

    #[test]
    fn test_base_url_ipv6() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("[::1]:8080"));

        assert_eq!(base_url_from_headers(&headers).unwrap(), "http://[::1]:8080");
    }

    #[test]
    fn test_base_url_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("s.example.com"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));

        assert_eq!(
            base_url_from_headers(&headers).unwrap(),
            "https://s.example.com"
        );
    }

    #[test]
    fn test_base_url_ignores_unknown_proto() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("s.example.com"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("gopher"));

        assert_eq!(
            base_url_from_headers(&headers).unwrap(),
            "http://s.example.com"
        );
    }

    #[test]
    fn test_base_url_missing_host() {
        assert!(base_url_from_headers(&HeaderMap::new()).is_none());
    }
}
