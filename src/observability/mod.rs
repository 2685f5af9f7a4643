//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handlers and subsystems produce:
//!     → tracing events (diagnostics, request spans with ids)
//!     → transcripts on the `corgi::transcript` target
//!
//! Consumers:
//!     → logging.rs subscriber (stderr via tracing-subscriber fmt)
//! ```

pub mod logging;
