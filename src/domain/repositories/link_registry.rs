//! Registry trait for shortcode records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{ClickEvent, ShortLinkRecord};
use crate::error::AppError;

/// Result of an atomic click-recording attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The record was live; the click was applied. Carries the updated snapshot.
    Recorded(ShortLinkRecord),
    /// The record exists but expired before `now`. Nothing was changed.
    Expired(ShortLinkRecord),
    /// No record was ever created under the code.
    NotFound,
}

/// Store mapping shortcodes to their records.
///
/// Implementations are shared across request handlers and must be safe under
/// concurrent access. Two operations are atomic per key:
///
/// - [`LinkRegistry::insert_if_absent`] closes the race between two creations
///   of the same code.
/// - [`LinkRegistry::record_click`] serializes the expiry check and the click
///   update, so simultaneous redirects are all counted.
///
/// Records are never removed.
///
/// # Implementations
///
/// - [`crate::infrastructure::registry::InMemoryRegistry`] - sharded concurrent map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRegistry: Send + Sync {
    /// Returns true iff a record with this code has ever been created.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Returns a snapshot of the record, or `None` for an unknown code.
    async fn get(&self, code: &str) -> Result<Option<ShortLinkRecord>, AppError>;

    /// Inserts the record, overwriting any record stored under the same code.
    ///
    /// Creation paths use [`LinkRegistry::insert_if_absent`] instead.
    async fn put(&self, record: ShortLinkRecord) -> Result<(), AppError>;

    /// Inserts the record only if its code is free.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the record was inserted
    /// - `Ok(false)` if the code was already taken (the stored record is untouched)
    async fn insert_if_absent(&self, record: ShortLinkRecord) -> Result<bool, AppError>;

    /// Records a click if the record is still live at `now`.
    ///
    /// The expiry check and the mutation happen under the record's lock.
    async fn record_click(
        &self,
        code: &str,
        event: ClickEvent,
        now: DateTime<Utc>,
    ) -> Result<ClickOutcome, AppError>;

    /// Number of stored records, live and expired.
    async fn count(&self) -> Result<usize, AppError>;
}
