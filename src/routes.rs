//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorturls`         - Create a short link
//! - `GET  /shorturls/{code}`  - Link statistics
//! - `GET  /api/health`        - Health check
//! - `GET  /{code}`            - Short link redirect
//!
//! Static segments win over the `/{code}` capture, so a custom code equal to
//! `shorturls` is stored but can never be reached through a redirect.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler, stats_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/shorturls", post(shorten_handler))
        .route("/shorturls/{code}", get(stats_handler))
        .route("/api/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
