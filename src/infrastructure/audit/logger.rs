//! Non-blocking audit logging handle.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::entry::{AuditEntry, AuditLevel};

/// Cloneable handle used by handlers and services to emit audit entries.
///
/// `log` never blocks and never fails: the entry is written to the local
/// trace and offered to a bounded queue with `try_send`. When the queue is
/// full or the worker is gone, the entry is dropped and counted.
#[derive(Clone)]
pub struct AuditLogger {
    sender: mpsc::Sender<AuditEntry>,
    stack: Arc<str>,
}

impl AuditLogger {
    /// Creates a logger that tags every entry with `stack`.
    pub fn new(sender: mpsc::Sender<AuditEntry>, stack: impl Into<String>) -> Self {
        Self {
            sender,
            stack: Arc::from(stack.into()),
        }
    }

    /// Records an audit entry.
    pub fn log(&self, level: AuditLevel, component: &str, message: impl Into<String>) {
        let message = message.into();

        match level {
            AuditLevel::Debug => debug!(component = %component, "{}", message),
            AuditLevel::Info => info!(component = %component, "{}", message),
            AuditLevel::Warn => warn!(component = %component, "{}", message),
            AuditLevel::Error => error!(component = %component, "{}", message),
            AuditLevel::Fatal => error!(component = %component, fatal = true, "{}", message),
        }

        let entry = AuditEntry {
            stack: self.stack.to_string(),
            level,
            component: component.to_string(),
            message,
        };

        if let Err(e) = self.sender.try_send(entry) {
            metrics::counter!("audit_entries_dropped_total").increment(1);
            debug!("Audit entry dropped: {}", e);
        }
    }

    pub fn debug(&self, component: &str, message: impl Into<String>) {
        self.log(AuditLevel::Debug, component, message);
    }

    pub fn info(&self, component: &str, message: impl Into<String>) {
        self.log(AuditLevel::Info, component, message);
    }

    pub fn warn(&self, component: &str, message: impl Into<String>) {
        self.log(AuditLevel::Warn, component, message);
    }

    pub fn error(&self, component: &str, message: impl Into<String>) {
        self.log(AuditLevel::Error, component, message);
    }

    pub fn fatal(&self, component: &str, message: impl Into<String>) {
        self.log(AuditLevel::Fatal, component, message);
    }

    /// Returns true if the worker has stopped receiving entries.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Free slots left in the queue.
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }
}
