#![allow(dead_code)]

use axum::extract::ConnectInfo;
use chrono::{DateTime, Duration, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::Layer;
use url_shortener::application::services::CreationPolicy;
use url_shortener::domain::entities::ShortLinkRecord;
use url_shortener::domain::repositories::LinkRegistry;
use url_shortener::infrastructure::audit::{AuditEntry, AuditLogger};
use url_shortener::infrastructure::registry::InMemoryRegistry;
use url_shortener::state::AppState;

pub fn create_test_state() -> (AppState, mpsc::Receiver<AuditEntry>) {
    create_test_state_with_registry(Arc::new(InMemoryRegistry::new()))
}

pub fn create_test_state_with_registry(
    registry: Arc<InMemoryRegistry>,
) -> (AppState, mpsc::Receiver<AuditEntry>) {
    let (tx, rx) = mpsc::channel(1000);
    let audit = AuditLogger::new(tx, "backend");

    let state = AppState::new(registry, CreationPolicy::default(), audit, None);

    (state, rx)
}

pub async fn create_test_link(registry: &InMemoryRegistry, code: &str, url: &str) {
    let now = Utc::now();
    put_link(registry, code, url, now, now + Duration::minutes(30)).await;
}

pub async fn create_expired_link(registry: &InMemoryRegistry, code: &str, url: &str) {
    let created_at = Utc::now() - Duration::hours(2);
    put_link(registry, code, url, created_at, created_at + Duration::hours(1)).await;
}

async fn put_link(
    registry: &InMemoryRegistry,
    code: &str,
    url: &str,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) {
    registry
        .put(ShortLinkRecord::new(
            code.to_string(),
            url.to_string(),
            created_at,
            expires_at,
        ))
        .await
        .unwrap();
}

/// Drains every audit entry queued so far.
pub fn drain_audit(rx: &mut mpsc::Receiver<AuditEntry>) -> Vec<AuditEntry> {
    let mut entries = Vec::new();
    while let Ok(entry) = rx.try_recv() {
        entries.push(entry);
    }
    entries
}

/// Inserts a fixed peer address, standing in for `into_make_service_with_connect_info`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
