//! Upstream relay subsystem.
//!
//! # Data Flow
//! ```text
//! RequestSnapshot + captured body
//!     → forward.rs (rebuild request: upstream authority, original path/query,
//!                   copied headers, recomputed Content-Length)
//!     → pooled hyper client
//!     → Response<Incoming> handed back for capture and logging
//! ```
//!
//! # Design Decisions
//! - No retries: a failure is reported once, immediately
//! - No deadline unless `timeouts.upstream_secs` is configured

pub mod forward;
pub mod target;

pub use forward::{Relay, RelayError};
pub use target::{TargetError, UpstreamTarget};
