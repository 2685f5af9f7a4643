//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration
//! - Choose the dispatch mode and build the server
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener binds last, once everything else is ready

use crate::config::{validate_config, ConfigError, InspectorConfig};
use crate::dispatch::Mode;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::net::{self, ListenerError};
use crate::relay::TargetError;

/// Anything that stops the inspector from coming up.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid upstream: {0}")]
    Upstream(#[from] TargetError),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Validate, bind and serve until `shutdown` fires.
pub async fn run(config: InspectorConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let shutdown_rx = shutdown.subscribe();
    validate_config(&config).map_err(ConfigError::Validation)?;

    let server = HttpServer::new(&config)?;
    let listener = net::bind(&config.listener).await?;

    let port = listener.local_addr()?.port();
    tracing::info!("Corgi is waiting on {}", port);
    if let Mode::Forward(relay) = server.mode() {
        tracing::info!("Corgi will relay requests to {}", relay.target());
    }

    server.run(listener, shutdown_rx).await?;
    Ok(())
}
