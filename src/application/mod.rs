//! Application layer services implementing business logic.
//!
//! Services coordinate validation, the expiry policy and the registry, and
//! give HTTP handlers a small API that speaks in domain types.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and redirect resolution
//! - [`services::stats_service::StatsService`] - Read-only link statistics

pub mod services;
