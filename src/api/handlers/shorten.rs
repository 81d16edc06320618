//! Handler for the link creation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use validator::Validate;

use super::audit_failure;
use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_host::base_url_from_headers;

/// Base used when neither `BASE_URL` nor a `Host` header is available.
const FALLBACK_BASE_URL: &str = "http://localhost";

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /shorturls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "validity": 30,        // optional, minutes
///   "shortcode": "abc123"  // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortLink": "http://localhost:3000/abc123",
///   "expiry": "2025-01-01T12:30:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 for a malformed body, bad URL, bad validity or bad shortcode
/// - 409 if the custom shortcode is already in use
/// - 500 if no free random shortcode was found
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    state.audit.debug("controller", "POST /shorturls received");

    let result = create(&state, &headers, payload).await;
    if let Err(e) = &result {
        audit_failure(&state.audit, "shorturls", e);
    }
    result
}

async fn create(
    state: &AppState,
    headers: &HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let record = state
        .link_service
        .create_short_link(payload.into_command()?)
        .await?;

    state.audit.info(
        "repository",
        format!("shorturls: created shortcode {}", record.shortcode),
    );

    let base_url = state
        .base_url
        .clone()
        .or_else(|| base_url_from_headers(headers))
        .unwrap_or_else(|| FALLBACK_BASE_URL.to_string());

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_link: state
                .link_service
                .get_short_url(&base_url, &record.shortcode),
            expiry: record.expires_at,
        }),
    ))
}
