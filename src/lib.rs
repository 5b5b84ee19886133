//! Mock Fink (financial) and Pearl (identity verification) provider APIs.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod providers;
pub mod session;
pub mod transaction;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use session::{decode_session_id, encode_session_id, DecodedSession, SessionTag};
