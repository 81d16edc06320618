//! # URL Shortener
//!
//! An in-memory URL shortening service with expiring links and per-click
//! analytics, built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities, expiry policy and the registry trait
//! - **Application Layer** ([`application`]) - Link creation, redirects and statistics
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory registry and audit logging
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random or custom shortcodes with collision-free assignment
//! - Time-based expiry (links stay queryable for stats after expiry)
//! - Atomic click tracking under concurrent redirects
//! - Fire-and-forget remote audit logging
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional: enable remote audit logging
//! export AUDIT_LOG_URL="https://audit.example.com/logs"
//!
//! # Start the service
//! cargo run
//!
//! # Shorten a URL
//! curl -X POST localhost:3000/shorturls -H 'content-type: application/json' \
//!      -d '{"url": "https://example.com", "validity": 60}'
//! ```
//!
//! Records live in process memory and are lost on restart.
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CreationPolicy, LinkService, StatsService};
    pub use crate::domain::entities::{ClickEvent, ShortLinkRecord};
    pub use crate::domain::repositories::LinkRegistry;
    pub use crate::error::AppError;
    pub use crate::infrastructure::audit::{AuditEntry, AuditLogger};
    pub use crate::infrastructure::registry::InMemoryRegistry;
    pub use crate::state::AppState;
}
