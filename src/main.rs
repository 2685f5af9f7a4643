//! Corgi HTTP request logger.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request          ┌──────────────────────────────────────────────┐
//!     ────────────────────────┼─▶ capture ─▶ transcript ─▶ log               │
//!                             │                  │                           │
//!                             │        echo ◀────┴────▶ forward              │
//!                             │         │                  │                 │
//!     Client Response         │         ▼                  ▼                 │
//!     ◀───────────────────────┼── "woof woof"    relay ─▶ capture ─▶ log ────┼──▶ Upstream
//!                             └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use corgi::config::{load_config, InspectorConfig};
use corgi::lifecycle::{signals, startup, Shutdown};
use corgi::observability::logging;

#[derive(Parser, Debug)]
#[command(name = "corgi")]
#[command(version, about = "Corgi HTTP Request Logger", long_about = None)]
struct Cli {
    /// Port to listen on [default: 8000]
    #[arg(short, long)]
    port: Option<u16>,

    /// Maximum printed size of raw bodies in bytes, 0 disables truncation
    /// (JSON and form bodies are not truncated) [default: 256]
    #[arg(long)]
    max_printable_size: Option<usize>,

    /// Pretty-print form-encoded bodies
    #[arg(long)]
    pretty: bool,

    /// Relay requests to this host[:port]
    #[arg(long, value_name = "HOST")]
    fetch: Option<String>,

    /// TOML configuration file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut InspectorConfig) {
        if let Some(port) = self.port {
            config.listener.bind_address = match config.listener.bind_address.parse::<SocketAddr>() {
                Ok(mut addr) => {
                    addr.set_port(port);
                    addr.to_string()
                }
                Err(_) => format!("0.0.0.0:{}", port),
            };
        }
        if let Some(max) = self.max_printable_size {
            config.render.max_printable_size = max;
        }
        if self.pretty {
            config.render.pretty = true;
        }
        if let Some(host) = self.fetch.filter(|h| !h.is_empty()) {
            config.upstream.host = Some(host);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("corgi: cannot load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => InspectorConfig::default(),
    };
    cli.apply(&mut config);

    logging::init(&config.observability.log_level);
    tracing::info!("corgi v{} starting", env!("CARGO_PKG_VERSION"));

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        trigger.trigger();
    });

    if let Err(e) = startup::run(config, &shutdown).await {
        tracing::error!(error = %e, "Startup failed");
        eprintln!("corgi: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Shutdown complete");
}
