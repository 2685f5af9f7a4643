//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the bind address and upstream authority
//! - Validate value ranges (timeouts > 0, known log levels)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: InspectorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::InspectorConfig;
use crate::relay::UpstreamTarget;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("upstream.host: {0}")]
    UpstreamHost(String),

    #[error("timeouts.upstream_secs must be greater than zero")]
    ZeroTimeout,

    #[error("observability.log_level `{0}` is not one of trace, debug, info, warn, error")]
    LogLevel(String),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &InspectorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if let Some(host) = &config.upstream.host {
        if let Err(e) = UpstreamTarget::parse(host) {
            errors.push(ValidationError::UpstreamHost(e.to_string()));
        }
    }

    if config.timeouts.upstream_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&InspectorConfig::default()).is_ok());
    }

    #[test]
    fn reports_every_problem() {
        let mut config = InspectorConfig::default();
        config.listener.bind_address = ":8000".into();
        config.upstream.host = Some("http://example.com/path".into());
        config.timeouts.upstream_secs = Some(0);
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0], ValidationError::BindAddress(":8000".into()));
        assert!(matches!(errors[1], ValidationError::UpstreamHost(_)));
        assert_eq!(errors[2], ValidationError::ZeroTimeout);
        assert_eq!(errors[3], ValidationError::LogLevel("loud".into()));
    }

    #[test]
    fn accepts_host_with_port() {
        let mut config = InspectorConfig::default();
        config.upstream.host = Some("localhost:9000".into());
        config.timeouts.upstream_secs = Some(5);
        assert!(validate_config(&config).is_ok());
    }
}
