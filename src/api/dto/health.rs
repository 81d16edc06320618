//! DTOs for health check endpoint.

use serde::Serialize;

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "url-shortener";

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub links: usize,
    pub audit_queue: CheckStatus,
}

/// Individual component health status.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
