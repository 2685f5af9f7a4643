//! Body capture.
//!
//! A body stream can be read once. Capture drains it into an owned buffer so
//! the same bytes can feed both the transcript and the relay, and so any later
//! reader gets its own replay over that buffer.

use std::error::Error as StdError;

use axum::body::{Body, HttpBody};
use axum::BoxError;
use bytes::Bytes;
use http_body_util::BodyExt;

/// Failure while draining a body stream.
///
/// Kept distinct from an empty body: a zero-length capture is `Ok(Bytes::new())`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("body read error: {0}")]
    Read(String),
}

/// Read the whole body into memory.
///
/// The stream is consumed; use [`replay`] to hand an equivalent body onwards.
pub async fn capture<B>(body: B) -> Result<Bytes, CaptureError>
where
    B: HttpBody<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    match body.collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) => {
            let e: BoxError = e.into();
            Err(CaptureError::Read(error_chain(&*e)))
        }
    }
}

/// A fresh one-shot body over previously captured bytes.
pub fn replay(bytes: &Bytes) -> Body {
    Body::from(bytes.clone())
}

/// `error: cause: root cause`, so the text is useful on its own.
///
/// Wrappers that display their inner error verbatim are not repeated.
pub fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut last = error.to_string();
    let mut message = last.clone();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if text != last {
            message.push_str(": ");
            message.push_str(&text);
        }
        last = text;
        source = cause.source();
    }
    message
}
