//! Request forwarding to the upstream.
//!
//! # Responsibilities
//! - Rebuild the inbound request against the upstream authority
//! - Send it through the process-wide pooled client
//! - Describe failures well enough to serve as a 502 body
//!
//! # Design Decisions
//! - One `Client` for the process lifetime; clones share its connection pool
//! - Headers are appended one value at a time into a fresh map so repeated
//!   names survive and nothing is shared with the snapshot
//! - Framing headers are recomputed from the captured body

use std::time::Duration;

use axum::body::Body;
use axum::http::uri::{PathAndQuery, Scheme};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, Request, Response, Uri};
use bytes::Bytes;
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::http::capture::{error_chain, replay};
use crate::http::request::RequestSnapshot;
use crate::relay::target::UpstreamTarget;

/// Headers describing the inbound hop rather than the message.
const FRAMING_HEADERS: [HeaderName; 3] = [
    header::HOST,
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
];

/// Failure to obtain an upstream response.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("cannot build upstream request: {0}")]
    Build(#[from] axum::http::Error),

    #[error("{method} \"{url}\": {reason}")]
    Transport {
        method: Method,
        url: Uri,
        reason: String,
    },

    #[error("{method} \"{url}\": no response within {timeout:?}")]
    Timeout {
        method: Method,
        url: Uri,
        timeout: Duration,
    },
}

/// Forwards captured requests to a single upstream.
#[derive(Clone)]
pub struct Relay {
    client: Client<HttpConnector, Body>,
    target: UpstreamTarget,
    timeout: Option<Duration>,
}

impl Relay {
    pub fn new(target: UpstreamTarget, timeout: Option<Duration>) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            client,
            target,
            timeout,
        }
    }

    pub fn target(&self) -> &UpstreamTarget {
        &self.target
    }

    /// The request that [`Relay::forward`] sends for `snapshot`.
    pub fn outbound_request(
        &self,
        snapshot: &RequestSnapshot,
        body: &Bytes,
    ) -> Result<Request<Body>, RelayError> {
        let path_and_query = snapshot
            .uri
            .path_and_query()
            .cloned()
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        let url = Uri::builder()
            .scheme(Scheme::HTTP)
            .authority(self.target.authority().clone())
            .path_and_query(path_and_query)
            .build()?;

        let mut headers = HeaderMap::with_capacity(snapshot.headers.len() + 1);
        for (name, value) in snapshot.headers.iter() {
            if FRAMING_HEADERS.contains(name) {
                continue;
            }
            headers.append(name.clone(), value.clone());
        }
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));

        let mut request = Request::builder()
            .method(snapshot.method.clone())
            .uri(url)
            .body(replay(body))?;
        *request.headers_mut() = headers;

        Ok(request)
    }

    /// Send the captured request upstream and wait for the response head.
    pub async fn forward(
        &self,
        snapshot: &RequestSnapshot,
        body: &Bytes,
    ) -> Result<Response<Incoming>, RelayError> {
        let request = self.outbound_request(snapshot, body)?;
        let method = request.method().clone();
        let url = request.uri().clone();

        tracing::debug!(method = %method, url = %url, bytes = body.len(), "Forwarding request");

        let call = self.client.request(request);
        let result = match self.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, call).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(RelayError::Timeout {
                        method,
                        url,
                        timeout,
                    })
                }
            },
            None => call.await,
        };

        result.map_err(|e| RelayError::Transport {
            method,
            url,
            reason: error_chain(&e),
        })
    }
}
