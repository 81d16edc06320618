mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use std::sync::Arc;
use url_shortener::api::handlers::redirect_handler;
use url_shortener::domain::repositories::LinkRegistry;
use url_shortener::infrastructure::registry::InMemoryRegistry;

use common::MockConnectInfoLayer;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_fifty_concurrent_redirects_record_fifty_clicks() {
    let registry = Arc::new(InMemoryRegistry::new());
    common::create_test_link(&registry, "hot1", "https://example.com").await;
    let (state, _rx) = common::create_test_state_with_registry(registry.clone());

    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .layer(MockConnectInfoLayer)
        .with_state(state);
    let server = Arc::new(TestServer::new(app).unwrap());

    let mut handles = Vec::new();
    for _ in 0..50 {
        let server = server.clone();
        handles.push(tokio::spawn(async move {
            server.get("/hot1").await.status_code()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), 302);
    }

    let record = registry.get("hot1").await.unwrap().unwrap();
    assert_eq!(record.click_count, 50);
    assert_eq!(record.click_events.len(), 50);
}
