//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{CreationPolicy, LinkService, StatsService};
use crate::infrastructure::audit::AuditLogger;
use crate::infrastructure::registry::InMemoryRegistry;

/// Services and handles shared by all request handlers.
///
/// Cloning is cheap; every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<InMemoryRegistry>>,
    pub stats_service: Arc<StatsService<InMemoryRegistry>>,
    pub audit: AuditLogger,
    /// Public base for short links. When `None`, it is derived from the
    /// request's `Host` header.
    pub base_url: Option<String>,
}

impl AppState {
    /// Wires both services to the same registry.
    pub fn new(
        registry: Arc<InMemoryRegistry>,
        policy: CreationPolicy,
        audit: AuditLogger,
        base_url: Option<String>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(registry.clone(), policy)),
            stats_service: Arc::new(StatsService::new(registry)),
            audit,
            base_url,
        }
    }
}
