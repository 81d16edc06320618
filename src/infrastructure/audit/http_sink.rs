//! HTTP client for the remote audit log service.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::entry::AuditEntry;
use super::sink::{AuditError, AuditResult, AuditSink};

/// Cached tokens are refreshed once less than this much validity remains.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Lifetime assumed when the auth response carries no `expires_in`.
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

/// Credentials posted to the auth endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditCredentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "rollNo", skip_serializing_if = "Option::is_none")]
    pub roll_no: Option<String>,
    #[serde(rename = "accessCode", skip_serializing_if = "Option::is_none")]
    pub access_code: Option<String>,
    #[serde(rename = "clientID", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(rename = "clientSecret", skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    token: Option<String>,
    expires_in: Option<Value>,
}

impl TokenResponse {
    fn ttl(&self) -> Duration {
        let seconds = match &self.expires_in {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.parse().ok(),
            _ => None,
        };

        seconds
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TOKEN_TTL)
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        now + TOKEN_REFRESH_MARGIN < self.expires_at
    }
}

/// Sink posting entries to the audit service with bearer authentication.
///
/// When an auth URL is configured, a token is fetched on first use and
/// cached until it is within a minute of expiry. A `401` from the log
/// endpoint drops the cached token and the entry is retried once with a
/// fresh one.
pub struct HttpAuditSink {
    client: Client,
    log_url: String,
    auth_url: Option<String>,
    credentials: AuditCredentials,
    token: Mutex<Option<CachedToken>>,
}

impl HttpAuditSink {
    /// Builds the sink with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        log_url: String,
        auth_url: Option<String>,
        credentials: AuditCredentials,
        timeout: Duration,
    ) -> AuditResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        info!("Remote audit logging enabled: {}", log_url);

        Ok(Self {
            client,
            log_url,
            auth_url,
            credentials,
            token: Mutex::new(None),
        })
    }

    /// Returns a usable token, fetching a new one when the cache is stale.
    ///
    /// Returns `Ok(None)` when no auth URL is configured.
    async fn access_token(&self) -> AuditResult<Option<String>> {
        let Some(auth_url) = &self.auth_url else {
            return Ok(None);
        };

        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref()
            && token.is_fresh(Instant::now())
        {
            return Ok(Some(token.value.clone()));
        }

        debug!("Fetching audit access token");
        let response = self
            .client
            .post(auth_url)
            .json(&self.credentials)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuditError::Auth(format!(
                "auth endpoint returned {}",
                response.status()
            )));
        }

        let body: TokenResponse = response.json().await?;
        let ttl = body.ttl();
        let value = body
            .access_token
            .or(body.token)
            .ok_or_else(|| AuditError::Auth("auth response carried no token".to_string()))?;

        *cached = Some(CachedToken {
            value: value.clone(),
            expires_at: Instant::now() + ttl,
        });

        Ok(Some(value))
    }

    async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }

    async fn post_entry(&self, entry: &AuditEntry) -> AuditResult<StatusCode> {
        let mut request = self.client.post(&self.log_url).json(entry);
        if let Some(token) = self.access_token().await? {
            request = request.bearer_auth(token);
        }

        Ok(request.send().await?.status())
    }
}

#[async_trait]
impl AuditSink for HttpAuditSink {
    async fn send(&self, entry: &AuditEntry) -> AuditResult<()> {
        let mut status = self.post_entry(entry).await?;

        if status == StatusCode::UNAUTHORIZED && self.auth_url.is_some() {
            debug!("Audit token rejected, refreshing");
            self.invalidate_token().await;
            status = self.post_entry(entry).await?;
        }

        if status.is_success() {
            Ok(())
        } else {
            Err(AuditError::Rejected(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::audit::AuditLevel;
    use axum::{
        Json, Router,
        extract::State,
        http::{HeaderMap, StatusCode as AxumStatus, header},
        routing::post,
    };
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Default)]
    struct FakeAudit {
        token_requests: Arc<AtomicUsize>,
        log_requests: Arc<AtomicUsize>,
        reject_first: bool,
    }

    async fn auth(State(fake): State<FakeAudit>) -> Json<Value> {
        let n = fake.token_requests.fetch_add(1, Ordering::SeqCst) + 1;
        Json(json!({ "access_token": format!("token-{}", n), "expires_in": 900 }))
    }

    async fn logs(
        State(fake): State<FakeAudit>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> AxumStatus {
        let n = fake.log_requests.fetch_add(1, Ordering::SeqCst);
        if fake.reject_first && n == 0 {
            return AxumStatus::UNAUTHORIZED;
        }

        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !bearer.starts_with("Bearer token-") || body["package"].is_null() {
            return AxumStatus::BAD_REQUEST;
        }

        AxumStatus::OK
    }

    async fn spawn_fake(fake: FakeAudit) -> String {
        let app = Router::new()
            .route("/auth", post(auth))
            .route("/logs", post(logs))
            .with_state(fake);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn entry() -> AuditEntry {
        AuditEntry {
            stack: "backend".to_string(),
            level: AuditLevel::Info,
            component: "service".to_string(),
            message: "test".to_string(),
        }
    }

    fn sink(base: &str) -> HttpAuditSink {
        HttpAuditSink::new(
            format!("{}/logs", base),
            Some(format!("{}/auth", base)),
            AuditCredentials::default(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_token_is_cached_between_entries() {
        let fake = FakeAudit::default();
        let base = spawn_fake(fake.clone()).await;
        let sink = sink(&base);

        sink.send(&entry()).await.unwrap();
        sink.send(&entry()).await.unwrap();

        assert_eq!(fake.token_requests.load(Ordering::SeqCst), 1);
        assert_eq!(fake.log_requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unauthorized_refreshes_token_and_retries_once() {
        let fake = FakeAudit {
            reject_first: true,
            ..FakeAudit::default()
        };
        let base = spawn_fake(fake.clone()).await;
        let sink = sink(&base);

        sink.send(&entry()).await.unwrap();

        assert_eq!(fake.token_requests.load(Ordering::SeqCst), 2);
        assert_eq!(fake.log_requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_error() {
        let sink = HttpAuditSink::new(
            "http://127.0.0.1:9/logs".to_string(),
            None,
            AuditCredentials::default(),
            Duration::from_millis(500),
        )
        .unwrap();

        assert!(sink.send(&entry()).await.is_err());
    }

    #[test]
    fn test_token_ttl_parsing() {
        let numeric: TokenResponse =
            serde_json::from_value(json!({ "access_token": "a", "expires_in": 120 })).unwrap();
        assert_eq!(numeric.ttl(), Duration::from_secs(120));

        let textual: TokenResponse =
            serde_json::from_value(json!({ "token": "a", "expires_in": "30" })).unwrap();
        assert_eq!(textual.ttl(), Duration::from_secs(30));

        let missing: TokenResponse = serde_json::from_value(json!({ "token": "a" })).unwrap();
        assert_eq!(missing.ttl(), DEFAULT_TOKEN_TTL);
    }

    #[test]
    fn test_credentials_wire_names() {
        let credentials = AuditCredentials {
            roll_no: Some("42".to_string()),
            client_id: Some("id".to_string()),
            ..AuditCredentials::default()
        };

        assert_eq!(
            serde_json::to_value(&credentials).unwrap(),
            json!({ "rollNo": "42", "clientID": "id" })
        );
    }
}
