//! DTO for individual click records.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::ClickEvent;

/// One recorded redirect.
#[derive(Debug, Serialize)]
pub struct ClickInfo {
    pub timestamp: DateTime<Utc>,
    pub referrer: String,
    pub origin: String,
}

impl From<ClickEvent> for ClickInfo {
    fn from(click: ClickEvent) -> Self {
        Self {
            timestamp: click.timestamp,
            referrer: click.referrer,
            origin: click.origin,
        }
    }
}
