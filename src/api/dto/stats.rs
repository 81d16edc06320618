//! DTO for link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::clicks::ClickInfo;
use crate::application::services::LinkStats;

/// Statistics for a single short link, in click order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub shortcode: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub total_clicks: u64,
    pub is_expired: bool,
    pub clicks: Vec<ClickInfo>,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        let record = stats.record;
        Self {
            shortcode: record.shortcode,
            long_url: record.long_url,
            created_at: record.created_at,
            expires_at: record.expires_at,
            last_accessed_at: record.last_accessed_at,
            total_clicks: record.click_count,
            is_expired: stats.is_expired,
            clicks: record.click_events.into_iter().map(ClickInfo::from).collect(),
        }
    }
}
