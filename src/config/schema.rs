//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the inspector.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default port, matching the historical `corgi` behaviour.
pub const DEFAULT_PORT: u16 = 8000;

/// Default bound on printed body bytes.
pub const DEFAULT_MAX_PRINTABLE_SIZE: usize = 256;

/// Root configuration for the inspector.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct InspectorConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// How captured bodies are rendered into transcripts.
    pub render: RenderConfig,

    /// Optional upstream; absent means echo mode.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: format!("0.0.0.0:{}", DEFAULT_PORT),
        }
    }
}

/// Body rendering policy. Fixed at startup and shared read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum number of raw body bytes printed; 0 disables truncation.
    pub max_printable_size: usize,

    /// Decode form values individually instead of printing the re-encoded form.
    pub pretty: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_printable_size: DEFAULT_MAX_PRINTABLE_SIZE,
            pretty: false,
        }
    }
}

/// Upstream relay target.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Authority (`host` or `host:port`) requests are relayed to over plain HTTP.
    pub host: Option<String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline in seconds for the upstream response head. Unset means the
    /// transport defaults apply.
    pub upstream_secs: Option<u64>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
