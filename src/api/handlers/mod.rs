//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one endpoint. Handlers report every
//! outcome to the audit log; the call never blocks the response.

pub mod health;
pub mod redirect;
pub mod shorten;
pub mod stats;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use stats::stats_handler;

use crate::error::AppError;
use crate::infrastructure::audit::AuditLogger;

/// Reports a rejected request to the audit log at a severity matching the error.
pub(crate) fn audit_failure(audit: &AuditLogger, operation: &str, err: &AppError) {
    let message = format!("{}: {}", operation, err);

    match err {
        AppError::Validation { .. } => audit.warn("handler", message),
        AppError::Expired { .. } => audit.warn("controller", message),
        AppError::NotFound { .. } | AppError::Conflict { .. } => {
            audit.error("repository", message)
        }
        AppError::Capacity { .. } => audit.fatal("service", message),
        AppError::Internal { .. } => audit.error("handler", message),
    }
}
