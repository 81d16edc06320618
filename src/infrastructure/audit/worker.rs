//! Background delivery of audit entries.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};

use super::entry::AuditEntry;
use super::sink::AuditSink;

/// Retries after the first failed delivery of an entry.
const DELIVERY_RETRIES: usize = 2;

/// Drains the audit queue into `sink` until every sender is dropped.
///
/// Each entry gets a short jittered backoff (10ms, then 100ms) before it is
/// given up on. Failures are logged at WARN and never propagate.
pub async fn run_audit_worker(mut rx: mpsc::Receiver<AuditEntry>, sink: Arc<dyn AuditSink>) {
    while let Some(entry) = rx.recv().await {
        let strategy = ExponentialBackoff::from_millis(10)
            .map(jitter)
            .take(DELIVERY_RETRIES);

        if let Err(e) = Retry::spawn(strategy, || sink.send(&entry)).await {
            metrics::counter!("audit_entries_failed_total").increment(1);
            warn!(
                level = %entry.level,
                component = %entry.component,
                "Audit delivery failed: {}",
                e
            );
        }
    }

    debug!("Audit queue closed, worker stopping");
}
