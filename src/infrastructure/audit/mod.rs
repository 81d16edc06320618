//! Remote audit logging.
//!
//! Request handlers call [`AuditLogger::log`], which emits a local `tracing`
//! event and queues an [`AuditEntry`] without waiting. A background task,
//! [`run_audit_worker`], drains the queue into an [`AuditSink`]:
//!
//! - [`HttpAuditSink`] - posts entries to the remote audit service
//! - [`NullAuditSink`] - discards entries when remote logging is disabled
//!
//! Delivery is best effort. A full queue drops the entry and a failed
//! delivery is logged locally; neither ever reaches the caller of `log`.

mod entry;
mod http_sink;
mod logger;
mod sink;
mod worker;

pub use entry::{AuditEntry, AuditLevel};
pub use http_sink::{AuditCredentials, HttpAuditSink};
pub use logger::AuditLogger;
pub use sink::{AuditError, AuditResult, AuditSink, NullAuditSink};
pub use worker::run_audit_worker;
