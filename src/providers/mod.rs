//! Mock third-party provider endpoints.
//!
//! # Data Flow
//! ```text
//! JSON body (JsonBody)
//!     → required-field checks (400 on failure)
//!     → suffix rule on the trimmed identifier
//!     → response shaped per provider
//! ```
//!
//! - `fink`: financial provider (sessions, transfers)
//! - `pearl`: identity verification (student, university)

pub mod fink;
pub mod pearl;

use chrono::{SecondsFormat, Utc};
use serde_json::{Number, Value};

use crate::http::response::ApiError;

/// Fetch a string at a JSON pointer, or fail with `"{field} is required"`.
pub(crate) fn required_str<'a>(
    body: &'a Value,
    pointer: &str,
    field: &str,
) -> Result<&'a str, ApiError> {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::bad_request(format!("{field} is required")))
}

/// Fetch a number at a JSON pointer, or fail with the given message.
pub(crate) fn required_number<'a>(
    body: &'a Value,
    pointer: &str,
    message: &str,
) -> Result<&'a Number, ApiError> {
    match body.pointer(pointer) {
        Some(Value::Number(n)) => Ok(n),
        _ => Err(ApiError::bad_request(message)),
    }
}

/// Trim an identifier the way the upstream providers do.
///
/// Matches ECMAScript `trim`: Unicode whitespace plus U+FEFF, but not U+0085.
pub(crate) fn trim_identifier(id: &str) -> &str {
    id.trim_matches(|c: char| c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{0085}'))
}

/// Largest integer an f64 holds exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Render integral floats as integers, so `100.0` echoes as `100`.
pub(crate) fn normalize_number(n: &Number) -> Number {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
            Number::from(f as i64)
        }
        _ => n.clone(),
    }
}

/// Current UTC time as RFC 3339 with millisecond precision, e.g.
/// `2024-05-01T12:00:00.000Z`.
pub(crate) fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
