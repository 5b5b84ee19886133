//! Shared utilities for integration tests.

use std::net::SocketAddr;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use provider_mocks::config::ServiceConfig;
use provider_mocks::http::HttpServer;
use provider_mocks::lifecycle::Shutdown;

/// The fully layered router with default config.
#[allow(dead_code)]
pub fn test_router() -> Router {
    HttpServer::new(ServiceConfig::default()).router()
}

/// POST a raw body and return status plus parsed JSON.
#[allow(dead_code)]
pub async fn post_raw(router: Router, path: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

/// POST a JSON value and return status plus parsed JSON.
#[allow(dead_code)]
pub async fn post_json(router: Router, path: &str, body: Value) -> (StatusCode, Value) {
    post_raw(router, path, &body.to_string()).await
}

#[allow(dead_code)]
pub async fn get_json(router: Router, path: &str) -> (StatusCode, Value) {
    request_json(router, "GET", path).await
}

/// Send a bodiless request with any method.
#[allow(dead_code)]
pub async fn request_json(router: Router, method: &str, path: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Bind a real server on an ephemeral port.
#[allow(dead_code)]
pub async fn spawn_server(config: ServiceConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}
