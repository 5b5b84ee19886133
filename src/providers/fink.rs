//! Fink: mock financial provider.
//!
//! Account ids are classified by a single suffix rule. Sessions carry the
//! classification inside their id; transfers report it as a failure code.

use axum::{extract::State, http::Uri, Json};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use serde_json::Number;

use crate::http::response::{ApiError, JsonBody};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::providers::{
    normalize_number, required_number, required_str, timestamp_now, trim_identifier,
};
use crate::session::{decode_session_id, encode_session_id, SessionTag};
use crate::transaction::generate_transaction_id;

/// Classify a trimmed account id.
pub fn classify_account(account_id: &str, blocked_suffix: &str) -> SessionTag {
    if account_id.is_empty() {
        SessionTag::InvalidAccount
    } else if account_id.ends_with(blocked_suffix) {
        SessionTag::AccountBlocked
    } else {
        SessionTag::Success
    }
}

/// Human-readable reason for a failed transfer.
pub fn failure_reason(tag: SessionTag) -> Option<&'static str> {
    match tag {
        SessionTag::Success => None,
        SessionTag::InvalidAccount => Some("Account ID is missing or empty"),
        SessionTag::AccountBlocked => Some("Transfers from this account are blocked"),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub fink_account_id: String,
    pub status_hint: SessionTag,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionLookupResponse {
    pub session_id: String,
    pub uuid: String,
    pub status_hint: Option<SessionTag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferEcho {
    pub source_account_id: String,
    pub amount: Number,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    pub status: TransferStatus,
    pub transaction_id: Option<String>,
    pub processed_at: String,
    pub failure_code: Option<SessionTag>,
    pub failure_reason: Option<&'static str>,
    pub echo: TransferEcho,
}

/// `POST /api/fink/sessions`
pub async fn create_session(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<SessionResponse>, ApiError> {
    let fink_account_id = trim_identifier(required_str(&body, "/finkAccountId", "finkAccountId")?);
    let tag = classify_account(fink_account_id, &state.rules.fink_blocked_suffix);
    let session_id = encode_session_id(tag);

    tracing::info!(
        account_id = %fink_account_id,
        status_hint = %tag,
        "Fink session created"
    );
    metrics::record_outcome("fink_session", tag.as_str());

    Ok(Json(SessionResponse {
        session_id,
        fink_account_id: fink_account_id.to_string(),
        status_hint: tag,
    }))
}

/// Last path segment, percent-decoded; invalid UTF-8 becomes U+FFFD.
fn session_id_from_path(path: &str) -> String {
    let raw = path.rsplit('/').next().unwrap_or_default();
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// `GET /api/fink/sessions/{session_id}`
///
/// Pure decode; there is no session store to consult. Reads the raw URI so
/// that undecodable segments still yield a 200 with a null tag.
pub async fn lookup_session(uri: Uri) -> Json<SessionLookupResponse> {
    let session_id = session_id_from_path(uri.path());
    let decoded = decode_session_id(&session_id);
    tracing::debug!(session_id = %session_id, tag = ?decoded.tag, "Fink session decoded");

    Json(SessionLookupResponse {
        session_id,
        uuid: decoded.uuid,
        status_hint: decoded.tag,
    })
}

/// `POST /api/fink/transfers`
pub async fn create_transfer(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<TransferResponse>, ApiError> {
    let source_account_id =
        trim_identifier(required_str(&body, "/sourceAccount/id", "sourceAccount.id")?);
    let amount = normalize_number(required_number(
        &body,
        "/transaction/amount",
        "transaction.amount is required and must be a number",
    )?);
    let currency = body
        .pointer("/transaction/currency")
        .and_then(|v| v.as_str())
        .filter(|c| !c.is_empty())
        .unwrap_or(state.rules.default_currency.as_str())
        .to_string();

    let tag = classify_account(source_account_id, &state.rules.fink_blocked_suffix);
    let (status, transaction_id, failure_code) = if tag.is_success() {
        (TransferStatus::Success, Some(generate_transaction_id()), None)
    } else {
        (TransferStatus::Failed, None, Some(tag))
    };

    tracing::info!(
        account_id = %source_account_id,
        amount = %amount,
        currency = %currency,
        status = ?status,
        "Fink transfer processed"
    );
    metrics::record_outcome("fink_transfer", tag.as_str());

    Ok(Json(TransferResponse {
        status,
        transaction_id,
        processed_at: timestamp_now(),
        failure_code,
        failure_reason: failure_reason(tag),
        echo: TransferEcho {
            source_account_id: source_account_id.to_string(),
            amount,
            currency,
        },
    }))
}
