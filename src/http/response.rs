//! Error envelope and request body extraction.
//!
//! # Responsibilities
//! - Map failures to the uniform `{ error, message, details }` envelope
//! - Parse request bodies as JSON regardless of `Content-Type`
//! - Turn handler panics into an internal error response
//! - Wrap bodiless framework rejections (404, 405, 408) in the same envelope
//!
//! # Design Decisions
//! - Two categories only: `BadRequest` (400) and `InternalError` (500)
//! - Internal causes are logged, never sent to the client

use std::any::Any;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Message returned for every internal error.
pub const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

/// Message returned when the body is not valid JSON.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON in request body";

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client input problem: missing field, wrong type, malformed JSON.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Anything unexpected. The message is for logs only.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Rejected before reaching a handler: unknown route, wrong method, timeout.
    #[error("Rejected: {0}")]
    Rejected(StatusCode),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Rejected(status) => *status,
        }
    }
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: &'static str,
    pub message: String,
    pub details: Option<Value>,
}

impl ErrorEnvelope {
    pub fn bad_request(message: String) -> Self {
        Self {
            error: "BadRequest",
            message,
            details: None,
        }
    }

    pub fn rejected(status: StatusCode) -> Self {
        let error = match status {
            StatusCode::NOT_FOUND => "NotFound",
            StatusCode::METHOD_NOT_ALLOWED => "MethodNotAllowed",
            StatusCode::REQUEST_TIMEOUT => "RequestTimeout",
            s if s.is_server_error() => "InternalError",
            _ => "BadRequest",
        };
        Self {
            error,
            message: status.canonical_reason().unwrap_or("Request rejected").to_string(),
            details: None,
        }
    }

    pub fn internal() -> Self {
        Self {
            error: "InternalError",
            message: INTERNAL_MESSAGE.to_string(),
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let envelope = match self {
            ApiError::BadRequest(message) => {
                tracing::debug!(message = %message, "Rejecting request");
                ErrorEnvelope::bad_request(message)
            }
            ApiError::Internal(cause) => {
                tracing::error!(cause = %cause, "Internal error");
                ErrorEnvelope::internal()
            }
            ApiError::Rejected(status) => ErrorEnvelope::rejected(status),
        };
        (status, Json(envelope)).into_response()
    }
}

/// A request body parsed as untyped JSON.
///
/// Unlike `axum::Json` this ignores `Content-Type` and reports every failure
/// through [`ApiError`], so field validation stays with the handler.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| {
                tracing::debug!(error = %e, "Malformed JSON body");
                ApiError::bad_request(INVALID_JSON_MESSAGE)
            })
    }
}

/// Give error responses that carry no body the JSON envelope.
///
/// Covers the router's 404 fallback, its 405 and `TimeoutLayer`'s 408.
/// Headers such as `Allow` are kept.
pub async fn envelope_bare_errors(response: Response) -> Response {
    let status = response.status();
    let is_error = status.is_client_error() || status.is_server_error();
    if !is_error || response.headers().contains_key(header::CONTENT_TYPE) {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    let (enveloped, body) = ApiError::Rejected(status).into_response().into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.extend(enveloped.headers);
    Response::from_parts(parts, body)
}

/// `CatchPanicLayer` hook: log the payload, answer with the internal envelope.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_envelope() {
        let response = ApiError::bad_request("personId is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "error": "BadRequest",
                "message": "personId is required",
                "details": null,
            })
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let response = ApiError::Internal("db exploded".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "InternalError");
        assert_eq!(body["message"], INTERNAL_MESSAGE);
    }

    #[tokio::test]
    async fn test_panic_maps_to_internal() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "InternalError");
    }

    #[tokio::test]
    async fn test_json_body_ignores_content_type() {
        let req = axum::http::Request::builder()
            .header("content-type", "text/plain")
            .body(Body::from(r#"{"a":1}"#))
            .unwrap();
        let JsonBody(value) = JsonBody::from_request(req, &()).await.unwrap();
        assert_eq!(value["a"], 1);
    }

    #[tokio::test]
    async fn test_json_body_rejects_malformed() {
        let req = axum::http::Request::builder().body(Body::from("{nope")).unwrap();
        let err = JsonBody::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == INVALID_JSON_MESSAGE));
    }

    #[tokio::test]
    async fn test_bare_timeout_gets_envelope() {
        let response = envelope_bare_errors(StatusCode::REQUEST_TIMEOUT.into_response()).await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "error": "RequestTimeout",
                "message": "Request Timeout",
                "details": null,
            })
        );
    }

    #[tokio::test]
    async fn test_bare_method_not_allowed_keeps_allow_header() {
        let mut bare = StatusCode::METHOD_NOT_ALLOWED.into_response();
        bare.headers_mut().insert(header::ALLOW, "POST".parse().unwrap());
        let response = envelope_bare_errors(bare).await;
        assert_eq!(response.headers()[header::ALLOW], "POST");
        assert_eq!(body_json(response).await["error"], "MethodNotAllowed");
    }

    #[tokio::test]
    async fn test_enveloped_errors_pass_through() {
        let response =
            envelope_bare_errors(ApiError::bad_request("personId is required").into_response())
                .await;
        assert_eq!(body_json(response).await["message"], "personId is required");
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::bad_request("missing field");
        assert_eq!(err.to_string(), "Bad request: missing field");
    }
}
