//! Inbound request snapshots.
//!
//! # Responsibilities
//! - Capture the request body before anything else reads it
//! - Record the metadata shown in the transcript (remote address, host)
//! - Keep the parts the relay needs to rebuild the request
//!
//! # Design Decisions
//! - The snapshot owns its header map; the relay copies from it rather than
//!   sharing storage
//! - Declared length comes from `Content-Length` only; chunked bodies have
//!   no declared length and are therefore not printed

use std::net::SocketAddr;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, Uri, Version};
use bytes::Bytes;

use crate::http::capture::{capture, CaptureError};

/// Immutable record of one inbound request.
#[derive(Debug)]
pub struct RequestSnapshot {
    pub method: Method,
    pub uri: Uri,
    pub version: Version,
    pub remote_addr: SocketAddr,
    pub host: String,
    pub headers: HeaderMap,
    pub declared_length: Option<u64>,
    pub body: Result<Bytes, CaptureError>,
}

impl RequestSnapshot {
    /// Drain the request body and record everything else about the request.
    pub async fn capture(request: Request<Body>, remote_addr: SocketAddr) -> Self {
        let (parts, body) = request.into_parts();
        let body = capture(body).await;

        let host = parts
            .headers
            .get(header::HOST)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .or_else(|| parts.uri.authority().map(|a| a.to_string()))
            .unwrap_or_default();

        Self {
            declared_length: declared_length(&parts.headers),
            method: parts.method,
            uri: parts.uri,
            version: parts.version,
            remote_addr,
            host,
            headers: parts.headers,
            body,
        }
    }

    /// Exact `Content-Type` header value, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

/// Parse `Content-Length`; missing or malformed values mean "unknown".
pub fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}
