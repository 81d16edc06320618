//! Business logic services for the application layer.

pub mod link_service;
pub mod stats_service;

pub use link_service::{
    CreateShortLink, CreationPolicy, DEFAULT_MAX_GENERATION_ATTEMPTS, LinkService,
};
pub use stats_service::{LinkStats, StatsService};
