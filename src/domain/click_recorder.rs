//! Click recording applied to a live record.

use crate::domain::entities::{ClickEvent, ShortLinkRecord};

/// Appends `event` to the record and updates its aggregate counters.
///
/// The registry calls this while holding the record's lock and only after the
/// expiry check passed, so concurrent redirects never lose an update.
pub fn apply_click(record: &mut ShortLinkRecord, event: ClickEvent) {
    record.last_accessed_at = Some(event.timestamp);
    record.click_count += 1;
    record.click_events.push(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_apply_click_updates_counters() {
        let now = Utc::now();
        let mut record = ShortLinkRecord::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            now,
            now + Duration::minutes(30),
        );

        let first = ClickEvent::new(now, Some("https://google.com"), None, None);
        let second = ClickEvent::new(now + Duration::seconds(1), None, None, None);

        apply_click(&mut record, first.clone());
        apply_click(&mut record, second.clone());

        assert_eq!(record.click_count, 2);
        assert_eq!(record.click_events, vec![first, second.clone()]);
        assert_eq!(record.last_accessed_at, Some(second.timestamp));
    }
}
