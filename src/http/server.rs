//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the inspection handler on every path
//! - Wire up middleware (tracing)
//! - Bind server to listener
//! - Hand each request to the startup-selected dispatch mode

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{InspectorConfig, RenderConfig};
use crate::dispatch::Mode;
use crate::relay::TargetError;
use crate::transcript::{TracingSink, TranscriptSink};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub mode: Arc<Mode>,
    pub render: Arc<RenderConfig>,
    pub sink: Arc<dyn TranscriptSink>,
}

/// HTTP server for the inspector.
pub struct HttpServer {
    router: Router,
    mode: Arc<Mode>,
}

impl HttpServer {
    /// Create a server that logs transcripts through `tracing`.
    pub fn new(config: &InspectorConfig) -> Result<Self, TargetError> {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// Create a server writing transcripts to `sink`.
    pub fn with_sink(
        config: &InspectorConfig,
        sink: Arc<dyn TranscriptSink>,
    ) -> Result<Self, TargetError> {
        let mode = Arc::new(Mode::from_config(config)?);
        let state = AppState {
            mode: mode.clone(),
            render: Arc::new(config.render),
            sink,
        };

        Ok(Self {
            router: Self::build_router(state),
            mode,
        })
    }

    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(inspect_handler))
            .route("/", any(inspect_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// The router, for serving on a custom transport or driving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = self.mode.name(),
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Inspect one request according to the configured mode.
async fn inspect_handler(
    State(state): State<AppState>,
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let span = tracing::info_span!(
        "request",
        id = %Uuid::new_v4(),
        method = %request.method(),
        uri = %request.uri(),
    );

    state
        .mode
        .handle(&state.render, state.sink.as_ref(), request, remote_addr)
        .instrument(span)
        .await
}
