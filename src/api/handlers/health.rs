//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthResponse, SERVICE_NAME};
use crate::error::AppError;
use crate::state::AppState;

/// Returns service health.
///
/// # Endpoint
///
/// `GET /api/health`
///
/// # Response
///
/// ```json
/// {
///   "status": "ok",
///   "service": "url-shortener",
///   "version": "0.1.0",
///   "links": 42,
///   "audit_queue": { "status": "ok", "message": "Capacity: 1000" }
/// }
/// ```
///
/// The audit queue is reported but never degrades the overall status, since
/// audit delivery is best effort.
pub async fn health_handler(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state.audit.debug("route", "health check hit");

    let links = state.stats_service.count_links().await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        links,
        audit_queue: check_audit_queue(&state),
    }))
}

/// Checks whether the audit worker is still receiving entries.
fn check_audit_queue(state: &AppState) -> CheckStatus {
    if state.audit.is_closed() {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Audit queue is closed".to_string()),
        }
    } else {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Capacity: {}", state.audit.capacity())),
        }
    }
}
