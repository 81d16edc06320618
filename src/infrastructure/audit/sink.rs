//! Audit sink trait and error types.

use async_trait::async_trait;

use super::entry::AuditEntry;

/// Errors that can occur while delivering an audit entry.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Audit transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Audit service rejected entry with status {0}")]
    Rejected(u16),

    #[error("Audit auth error: {0}")]
    Auth(String),
}

/// Result type for audit delivery.
pub type AuditResult<T> = Result<T, AuditError>;

/// Destination for audit entries.
///
/// Only the audit worker calls this; errors are retried there and then
/// logged, never surfaced to request handlers.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Delivers a single entry.
    async fn send(&self, entry: &AuditEntry) -> AuditResult<()>;
}

/// A sink that discards every entry.
///
/// Used when `AUDIT_LOG_URL` is not configured.
pub struct NullAuditSink;

impl NullAuditSink {
    /// Creates a new NullAuditSink instance.
    pub fn new() -> Self {
        tracing::debug!("Using NullAuditSink (remote audit logging disabled)");
        Self
    }
}

impl Default for NullAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditSink for NullAuditSink {
    async fn send(&self, _entry: &AuditEntry) -> AuditResult<()> {
        Ok(())
    }
}
