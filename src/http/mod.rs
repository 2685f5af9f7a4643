//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request span)
//!     → request.rs (capture body, snapshot metadata)
//!     → [dispatch decides echo or forward]
//!     → response.rs (capture upstream body, rebuild reply)
//!     → Send to client
//! ```

pub mod capture;
pub mod request;
pub mod response;
pub mod server;

pub use capture::{capture, replay, CaptureError};
pub use request::RequestSnapshot;
pub use response::ResponseSnapshot;
pub use server::{AppState, HttpServer};
