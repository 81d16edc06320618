//! Audit entry sent to the remote log service.

use serde::Serialize;
use std::fmt;

/// Severity accepted by the audit service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        };
        f.write_str(name)
    }
}

/// One audit log line.
///
/// Serializes to the wire shape `{stack, level, package, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub stack: String,
    pub level: AuditLevel,
    #[serde(rename = "package")]
    pub component: String,
    pub message: String,
}
