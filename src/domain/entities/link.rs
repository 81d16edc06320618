//! Short link record stored in the registry.

use chrono::{DateTime, Utc};

use super::click::ClickEvent;

/// A shortcode mapping with its click analytics.
///
/// `shortcode`, `long_url`, `created_at` and `expires_at` never change after
/// creation. Only [`crate::domain::click_recorder::apply_click`] touches the
/// click fields, which keeps `click_count == click_events.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortLinkRecord {
    pub shortcode: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub click_count: u64,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub click_events: Vec<ClickEvent>,
}

impl ShortLinkRecord {
    /// Creates a record with no clicks.
    pub fn new(
        shortcode: String,
        long_url: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            shortcode,
            long_url,
            created_at,
            expires_at,
            click_count: 0,
            last_accessed_at: None,
            click_events: Vec::new(),
        }
    }

    /// Builds a fresh record from validated creation input.
    pub fn from_new(new_link: NewShortLink) -> Self {
        Self::new(
            new_link.shortcode,
            new_link.long_url,
            new_link.created_at,
            new_link.expires_at,
        )
    }
}

/// Validated input for creating a short link.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub shortcode: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
