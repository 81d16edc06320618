//! Link statistics service.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::ShortLinkRecord;
use crate::domain::expiry::is_expired;
use crate::domain::repositories::LinkRegistry;
use crate::error::AppError;

use super::link_service::{ensure_well_formed, shortcode_not_found};

/// Read-only view of a record together with its expiry status at read time.
#[derive(Debug, Clone)]
pub struct LinkStats {
    pub record: ShortLinkRecord,
    pub is_expired: bool,
}

/// Service for reading click statistics.
///
/// Stats stay available after a link expires; the response reports the
/// expiry instead of refusing the request.
pub struct StatsService<R: LinkRegistry> {
    registry: Arc<R>,
}

impl<R: LinkRegistry> StatsService<R> {
    /// Creates a new statistics service.
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    /// Retrieves statistics for a short code as of `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed code.
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn get_stats(&self, code: &str, now: DateTime<Utc>) -> Result<LinkStats, AppError> {
        ensure_well_formed(code)?;

        let record = self
            .registry
            .get(code)
            .await?
            .ok_or_else(|| shortcode_not_found(code))?;

        Ok(LinkStats {
            is_expired: is_expired(&record, now),
            record,
        })
    }

    /// Counts stored links, live and expired.
    pub async fn count_links(&self) -> Result<usize, AppError> {
        self.registry.count().await
    }
}
