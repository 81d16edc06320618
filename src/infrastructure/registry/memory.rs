//! In-memory implementation of the link registry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::domain::click_recorder::apply_click;
use crate::domain::entities::{ClickEvent, ShortLinkRecord};
use crate::domain::expiry::is_expired;
use crate::domain::repositories::{ClickOutcome, LinkRegistry};
use crate::error::AppError;

/// Process-local registry keyed by shortcode.
///
/// Backed by a [`DashMap`], so each key is guarded by its shard's lock.
/// Creation goes through the entry API and click recording through a
/// mutable reference; both hold the lock only for the in-memory update and
/// never across an `.await`.
///
/// Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryRegistry {
    records: DashMap<String, ShortLinkRecord>,
}

impl InMemoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRegistry for InMemoryRegistry {
    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.records.contains_key(code))
    }

    async fn get(&self, code: &str) -> Result<Option<ShortLinkRecord>, AppError> {
        Ok(self.records.get(code).map(|entry| entry.value().clone()))
    }

    async fn put(&self, record: ShortLinkRecord) -> Result<(), AppError> {
        debug!(shortcode = %record.shortcode, "registry upsert");
        self.records.insert(record.shortcode.clone(), record);
        Ok(())
    }

    async fn insert_if_absent(&self, record: ShortLinkRecord) -> Result<bool, AppError> {
        match self.records.entry(record.shortcode.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                debug!(shortcode = %record.shortcode, "registry insert");
                slot.insert(record);
                Ok(true)
            }
        }
    }

    async fn record_click(
        &self,
        code: &str,
        event: ClickEvent,
        now: DateTime<Utc>,
    ) -> Result<ClickOutcome, AppError> {
        let Some(mut entry) = self.records.get_mut(code) else {
            return Ok(ClickOutcome::NotFound);
        };

        let record = entry.value_mut();
        if is_expired(record, now) {
            return Ok(ClickOutcome::Expired(record.clone()));
        }

        apply_click(record, event);
        Ok(ClickOutcome::Recorded(record.clone()))
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.records.len())
    }
}
