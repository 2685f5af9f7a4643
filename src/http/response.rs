//! Upstream response snapshots and relayed replies.
//!
//! # Responsibilities
//! - Capture the upstream body once, before it is logged or relayed
//! - Preserve the upstream status line, including a custom reason phrase
//! - Rebuild the reply for the original caller
//!
//! # Design Decisions
//! - Headers are placed on the reply before the status is set; the status
//!   commits the header block on the wire
//! - The reply body is the captured buffer, never the upstream stream
//! - Responses to HEAD, and 1xx/204/304 responses, never carry a body even
//!   when `Content-Length` is declared

use axum::body::Body;
use axum::http::{HeaderMap, Method, StatusCode, Version};
use axum::response::Response;
use bytes::Bytes;
use hyper::body::Incoming;
use hyper::ext::ReasonPhrase;

use crate::http::capture::{capture, replay, CaptureError};
use crate::http::request::declared_length;

/// Immutable record of one upstream response.
#[derive(Debug)]
pub struct ResponseSnapshot {
    pub version: Version,
    pub status: StatusCode,
    pub reason: String,
    pub headers: HeaderMap,
    pub declared_length: Option<u64>,
    /// False when the message cannot have a body.
    pub carries_body: bool,
    pub body: Result<Bytes, CaptureError>,
}

impl ResponseSnapshot {
    /// Drain the upstream body and record the response metadata.
    ///
    /// `request_method` is the method the response answers.
    pub async fn capture(response: Response<Incoming>, request_method: &Method) -> Self {
        let (parts, body) = response.into_parts();
        let carries_body = *request_method != Method::HEAD
            && !parts.status.is_informational()
            && parts.status != StatusCode::NO_CONTENT
            && parts.status != StatusCode::NOT_MODIFIED;
        let body = capture(body).await;

        let reason = parts
            .extensions
            .get::<ReasonPhrase>()
            .map(|r| String::from_utf8_lossy(r.as_bytes()).into_owned())
            .or_else(|| parts.status.canonical_reason().map(str::to_string))
            .unwrap_or_default();

        Self {
            declared_length: declared_length(&parts.headers),
            carries_body,
            version: parts.version,
            status: parts.status,
            reason,
            headers: parts.headers,
            body,
        }
    }

    /// `PROTOCOL CODE REASON`, e.g. `HTTP/1.1 200 OK`.
    pub fn status_line(&self) -> String {
        format!("{:?} {} {}", self.version, self.status.as_u16(), self.reason)
    }

    /// Build the reply for the original caller from the captured body.
    pub fn into_reply(self, body: &Bytes) -> Response {
        let mut reply = Response::new(replay(body));

        let headers = reply.headers_mut();
        for (name, value) in self.headers.iter() {
            headers.append(name.clone(), value.clone());
        }

        *reply.status_mut() = self.status;
        reply
    }
}

/// Plain-text reply used for locally generated outcomes.
pub fn text_reply(status: StatusCode, text: impl Into<String>) -> Response {
    let mut reply = Response::new(Body::from(text.into()));
    *reply.status_mut() = status;
    reply
}
