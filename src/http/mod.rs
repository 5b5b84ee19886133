//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, tracing span)
//!     → providers::{fink, pearl} (handlers)
//!     → response.rs (error envelope)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod status;

pub use request::X_REQUEST_ID;
pub use response::{ApiError, ErrorEnvelope, JsonBody};
pub use server::{AppState, HttpServer};
