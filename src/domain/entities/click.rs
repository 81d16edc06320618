//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// Referrer recorded when the request carries no `Referer` header.
pub const DIRECT_REFERRER: &str = "direct";

/// Origin recorded when neither a forwarded address nor a peer address is known.
pub const UNKNOWN_ORIGIN: &str = "unknown";

/// A click recorded when a short link is followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub timestamp: DateTime<Utc>,
    pub referrer: String,
    pub origin: String,
}

impl ClickEvent {
    /// Creates a click event, substituting sentinels for missing metadata.
    ///
    /// `forwarded_for` wins over `peer_ip` because it carries the client
    /// address when the service runs behind a proxy. Empty values count as
    /// missing.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let click = ClickEvent::new(Utc::now(), None, None, Some("10.0.0.1".to_string()));
    /// assert_eq!(click.referrer, "direct");
    /// assert_eq!(click.origin, "10.0.0.1");
    /// ```
    pub fn new(
        timestamp: DateTime<Utc>,
        referrer: Option<&str>,
        forwarded_for: Option<&str>,
        peer_ip: Option<String>,
    ) -> Self {
        let referrer = referrer
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DIRECT_REFERRER)
            .to_string();

        let origin = forwarded_for
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .or(peer_ip)
            .unwrap_or_else(|| UNKNOWN_ORIGIN.to_string());

        Self {
            timestamp,
            referrer,
            origin,
        }
    }
}
