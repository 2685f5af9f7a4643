//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig
//!     → listener.rs (parse address, bind socket)
//!     → TcpListener handed to the HTTP server
//! ```
//!
//! # Design Decisions
//! - Bind failures are startup errors and carry the address that failed

pub mod listener;

pub use listener::{bind, ListenerError};
