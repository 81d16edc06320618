//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;

use super::audit_failure;
use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns statistics for a short link.
///
/// # Endpoint
///
/// `GET /shorturls/{code}`
///
/// # Response
///
/// Link metadata, `totalClicks`, `isExpired` and every recorded click in
/// the order it happened. Expired links are still reported.
///
/// # Errors
///
/// - 400 for a malformed code
/// - 404 for an unknown code
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let code = code.trim();
    state
        .audit
        .debug("controller", format!("GET /shorturls/{} stats requested", code));

    match state.stats_service.get_stats(code, Utc::now()).await {
        Ok(stats) => {
            state
                .audit
                .info("controller", format!("stats: returned for {}", code));
            Ok(Json(StatsResponse::from(stats)))
        }
        Err(e) => {
            audit_failure(&state.audit, "stats", &e);
            Err(e)
        }
    }
}
