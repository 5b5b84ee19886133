//! End-to-end tests against a bound server.

use std::time::Duration;

use provider_mocks::config::ServiceConfig;
use serde_json::{json, Value};

mod common;

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn test_request_id_generated_and_propagated() {
    let (addr, shutdown) = common::spawn_server(ServiceConfig::default()).await;

    let res = client()
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .expect("server unreachable");
    let generated = res.headers().get("x-request-id").expect("missing request id");
    assert!(uuid::Uuid::parse_str(generated.to_str().unwrap()).is_ok());

    let res = client()
        .get(format!("http://{addr}/health"))
        .header("x-request-id", "client-chosen")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "client-chosen");

    shutdown.trigger();
}

#[tokio::test]
async fn test_configured_rules_apply() {
    let mut config = ServiceConfig::default();
    config.rules.fink_blocked_suffix = "13".into();
    config.rules.default_currency = "GBP".into();
    let (addr, shutdown) = common::spawn_server(config).await;

    let body: Value = client()
        .post(format!("http://{addr}/api/fink/transfers"))
        .json(&json!({
            "sourceAccount": { "id": "acct_13" },
            "transaction": { "amount": 5 },
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "FAILED");
    assert_eq!(body["failureCode"], "ACCOUNT_BLOCKED");
    assert_eq!(body["echo"]["currency"], "GBP");

    shutdown.trigger();
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let mut config = ServiceConfig::default();
    config.limits.max_body_size = 64;
    let (addr, shutdown) = common::spawn_server(config).await;

    let padding = "x".repeat(256);
    let res = client()
        .post(format!("http://{addr}/api/pearl/student-verifications"))
        .json(&json!({ "personId": "P-1", "fullName": padding }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "BadRequest");

    shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown_stops_accepting() {
    let (addr, shutdown) = common::spawn_server(ServiceConfig::default()).await;

    let res = client().get(format!("http://{addr}/health")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    drop(res);

    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let result = client()
        .get(format!("http://{addr}/health"))
        .timeout(Duration::from_secs(2))
        .send()
        .await;
    assert!(result.is_err(), "server should be down after shutdown");
}
