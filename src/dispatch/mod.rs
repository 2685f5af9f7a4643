//! Per-request dispatch.
//!
//! # Data Flow
//! ```text
//! Echo:    capture → log request → 200 "woof woof"
//! Forward: capture → log request (>) → relay
//!              ├─ error → log error (<) → 502 with error text
//!              └─ ok    → capture response → log response (<)
//!                         → headers, then status, then captured body
//! ```
//!
//! # Design Decisions
//! - The mode is chosen once at startup and never re-evaluated
//! - Every per-request failure becomes a reply; none escapes the handler

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;

use crate::config::{InspectorConfig, RenderConfig};
use crate::http::request::RequestSnapshot;
use crate::http::response::{text_reply, ResponseSnapshot};
use crate::relay::{Relay, TargetError, UpstreamTarget};
use crate::transcript::{request_transcript, response_transcript, Marker, Transcript, TranscriptSink};

/// Body of every echo-mode reply.
pub const ECHO_REPLY: &str = "woof woof";

/// What the inspector does with each request.
pub enum Mode {
    /// Log and answer locally.
    Echo,
    /// Log, relay upstream, log the response and relay it back.
    Forward(Relay),
}

impl Mode {
    /// Forward mode when an upstream host is configured, echo otherwise.
    pub fn from_config(config: &InspectorConfig) -> Result<Self, TargetError> {
        match &config.upstream.host {
            None => Ok(Mode::Echo),
            Some(host) => {
                let target = UpstreamTarget::parse(host)?;
                let timeout = config.timeouts.upstream_secs.map(Duration::from_secs);
                Ok(Mode::Forward(Relay::new(target, timeout)))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Echo => "echo",
            Mode::Forward(_) => "forward",
        }
    }

    /// Handle one request end to end.
    pub async fn handle(
        &self,
        render: &RenderConfig,
        sink: &dyn TranscriptSink,
        request: Request<Body>,
        remote_addr: SocketAddr,
    ) -> Response {
        let snapshot = RequestSnapshot::capture(request, remote_addr).await;
        match self {
            Mode::Echo => {
                sink.write(&request_transcript(&snapshot, render).to_block(Marker::None));
                text_reply(StatusCode::OK, ECHO_REPLY)
            }
            Mode::Forward(relay) => {
                sink.write(&request_transcript(&snapshot, render).to_block(Marker::Outbound));
                forward(relay, render, sink, snapshot).await
            }
        }
    }
}

async fn forward(
    relay: &Relay,
    render: &RenderConfig,
    sink: &dyn TranscriptSink,
    snapshot: RequestSnapshot,
) -> Response {
    let body = match &snapshot.body {
        Ok(body) => body.clone(),
        Err(e) => {
            tracing::warn!(error = %e, "Request body unreadable, not relaying");
            return text_reply(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    let response = match relay.forward(&snapshot, &body).await {
        Ok(response) => response,
        Err(e) => {
            let text = e.to_string();
            tracing::warn!(error = %text, "Upstream request failed");
            sink.write(&Transcript::single(text.as_str()).to_block(Marker::Inbound));
            return text_reply(StatusCode::BAD_GATEWAY, text);
        }
    };

    let upstream = ResponseSnapshot::capture(response, &snapshot.method).await;
    sink.write(&response_transcript(&upstream, render).to_block(Marker::Inbound));

    match &upstream.body {
        Ok(body) => {
            let body = body.clone();
            upstream.into_reply(&body)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Upstream body unreadable");
            text_reply(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}
