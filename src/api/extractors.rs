//! Request metadata extractors.

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::{DateTime, Utc};
use std::convert::Infallible;
use std::net::SocketAddr;

use crate::domain::entities::ClickEvent;

/// Client metadata recorded with each click.
///
/// Never rejects: every field is best effort. The peer address is only
/// available when the server was started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
#[derive(Debug, Clone, Default)]
pub struct ClickContext {
    pub referrer: Option<String>,
    pub forwarded_for: Option<String>,
    pub peer_ip: Option<String>,
}

impl ClickContext {
    /// Turns the request metadata into a click event at `timestamp`.
    pub fn into_click(self, timestamp: DateTime<Utc>) -> ClickEvent {
        ClickEvent::new(
            timestamp,
            self.referrer.as_deref(),
            self.forwarded_for.as_deref(),
            self.peer_ip,
        )
    }
}

impl<S> FromRequestParts<S> for ClickContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let referrer = parts
            .headers
            .get(header::REFERER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let forwarded_for = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let peer_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        Ok(Self {
            referrer,
            forwarded_for,
            peer_ip,
        })
    }
}
