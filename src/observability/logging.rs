//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Honour `RUST_LOG`, falling back to the configured level
//!
//! # Design Decisions
//! - Transcripts are ordinary events on the `corgi::transcript` target, so
//!   they can be filtered independently of diagnostics
//! - The configured level applies to diagnostics only; transcripts stay at
//!   `info` unless `RUST_LOG` says otherwise

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(level: &str) -> String {
    format!(
        "corgi={},corgi::transcript=info,tower_http=warn",
        level.to_ascii_lowercase()
    )
}

/// Install the global subscriber.
pub fn init(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level).into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn default_filter_targets_crate() {
        assert_eq!(
            default_filter("DEBUG"),
            "corgi=debug,corgi::transcript=info,tower_http=warn"
        );
        assert!(EnvFilter::try_new(default_filter("info")).is_ok());
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;
        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn transcripts_survive_a_quiet_level() {
        let out = Captured::default();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(default_filter("warn")))
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(out.clone())
                    .with_ansi(false),
            );

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "corgi::transcript", "GET / HTTP/1.1");
            tracing::info!(target: "corgi::lifecycle", "diagnostic detail");
        });

        let text = String::from_utf8(out.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("GET / HTTP/1.1"), "{text}");
        assert!(!text.contains("diagnostic detail"), "{text}");
    }
}
