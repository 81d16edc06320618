//! HTTP server initialization and runtime setup.
//!
//! Handles registry creation, audit worker spawning, and Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::audit::{
    AuditLogger, AuditSink, HttpAuditSink, NullAuditSink, run_audit_worker,
};
use crate::infrastructure::registry::InMemoryRegistry;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - In-memory link registry
/// - Audit sink (HTTP or NullAuditSink fallback)
/// - Background audit worker
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The audit HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let registry = Arc::new(InMemoryRegistry::new());
    tracing::info!("Link registry initialized (in-memory)");

    let sink: Arc<dyn AuditSink> = match &config.audit.log_url {
        Some(log_url) => Arc::new(
            HttpAuditSink::new(
                log_url.clone(),
                config.audit.auth_url.clone(),
                config.audit.credentials(),
                config.audit.timeout(),
            )
            .context("Failed to build audit HTTP client")?,
        ),
        None => {
            tracing::info!("Remote audit logging disabled (NullAuditSink)");
            Arc::new(NullAuditSink::new())
        }
    };

    let (audit_tx, audit_rx) = mpsc::channel(config.audit.queue_capacity);
    tokio::spawn(run_audit_worker(audit_rx, sink));
    tracing::info!("Audit worker started");

    let audit = AuditLogger::new(audit_tx, config.audit.stack.clone());
    let state = AppState::new(
        registry,
        config.creation_policy(),
        audit.clone(),
        config.base_url.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");
    audit.info("service", format!("url-shortener listening on {addr}"));

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
