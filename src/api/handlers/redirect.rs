//! Handler for short link redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;

use super::audit_failure;
use crate::api::extractors::ClickContext;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validator::redirect_location;

/// Redirects a shortcode to its long URL and records the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Validate the code format
/// 2. Atomically check expiry and record the click in the registry
/// 3. Return 302 Found with the stored URL in `Location`, in its ASCII form
///    (punycode host, percent-encoded path)
///
/// # Click Metadata
///
/// - **referrer**: `Referer` header, or `direct`
/// - **origin**: `X-Forwarded-For` header, else peer IP, else `unknown`
///
/// # Errors
///
/// - 400 for a malformed code
/// - 404 for an unknown code
/// - 410 if the link has expired (the click is not recorded)
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    client: ClickContext,
) -> Result<Response, AppError> {
    let code = code.trim();
    state
        .audit
        .debug("route", format!("GET /{} redirect requested", code));

    let record = match state
        .link_service
        .follow(code, client.into_click(Utc::now()))
        .await
    {
        Ok(record) => record,
        Err(e) => {
            audit_failure(&state.audit, "redirect", &e);
            return Err(e);
        }
    };

    let location = redirect_location(&record.long_url)
        .map_err(|e| e.to_string())
        .and_then(|url| HeaderValue::try_from(url).map_err(|e| e.to_string()))
        .map_err(|reason| {
            AppError::internal(
                "Stored URL is not a valid redirect target",
                json!({ "shortcode": code, "reason": reason }),
            )
        })?;

    state.audit.info(
        "controller",
        format!("redirect: {} -> {}", code, record.long_url),
    );

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
