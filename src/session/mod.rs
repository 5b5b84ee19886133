//! Fink session id codec.
//!
//! A session id is a self-describing token of the form `<uuid>::<TAG>`.
//! Nothing is stored server-side; the outcome travels inside the token.
//!
//! # Design Decisions
//! - Decoding is total: malformed input yields `tag: None`, never an error
//! - Tag matching is exact and case-sensitive

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Separator between the unique id and the tag.
pub const SEPARATOR: &str = "::";

/// Outcome classification carried by a session id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionTag {
    Success,
    InvalidAccount,
    AccountBlocked,
}

impl SessionTag {
    /// Every tag, in declaration order.
    pub const ALL: [SessionTag; 3] = [
        SessionTag::Success,
        SessionTag::InvalidAccount,
        SessionTag::AccountBlocked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionTag::Success => "SUCCESS",
            SessionTag::InvalidAccount => "INVALID_ACCOUNT",
            SessionTag::AccountBlocked => "ACCOUNT_BLOCKED",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SessionTag::Success)
    }
}

impl fmt::Display for SessionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown session tag: {0}")]
pub struct UnknownTag(pub String);

impl FromStr for SessionTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SessionTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

/// Result of decoding a session id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSession {
    /// The unique id portion, or the whole input when it could not be split.
    pub uuid: String,
    /// The tag, if the token was well formed.
    pub tag: Option<SessionTag>,
}

/// Build a fresh session id carrying `tag`.
pub fn encode_session_id(tag: SessionTag) -> String {
    format!("{}{}{}", Uuid::new_v4(), SEPARATOR, tag)
}

/// Split a session id back into its unique id and tag.
pub fn decode_session_id(session_id: &str) -> DecodedSession {
    let parts: Vec<&str> = session_id.split(SEPARATOR).collect();
    let [uuid, tag] = parts.as_slice() else {
        return DecodedSession {
            uuid: session_id.to_string(),
            tag: None,
        };
    };

    DecodedSession {
        uuid: (*uuid).to_string(),
        tag: tag.parse().ok(),
    }
}
