//! Corgi HTTP request logger.
//!
//! Logs a readable transcript of every inbound request. Without an upstream it
//! answers locally; with one it relays the request, logs the upstream response
//! and relays that back to the caller.

// Core subsystems
pub mod config;
pub mod dispatch;
pub mod http;
pub mod net;
pub mod relay;
pub mod transcript;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::InspectorConfig;
pub use dispatch::Mode;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
