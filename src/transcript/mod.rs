//! Transcript subsystem.
//!
//! # Data Flow
//! ```text
//! RequestSnapshot / ResponseSnapshot
//!     → builder.rs (status line, metadata, header lines)
//!     → render.rs (body lines by content kind and size bound)
//!         → form.rs (form-encoded bodies)
//!     → Transcript::to_block (direction marker per line)
//!     → sink.rs (one write per transcript)
//! ```
//!
//! # Design Decisions
//! - Building a transcript is pure; bodies were captured beforehand
//! - Header names are lowercased for display only
//! - Content-type dispatch is an exact match over a closed set

pub mod builder;
pub mod form;
pub mod render;
pub mod sink;

pub use builder::{request_transcript, response_transcript, Marker, Transcript};
pub use render::{render, ContentKind};
pub use sink::{MemorySink, TracingSink, TranscriptSink};
