//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all provider handlers
//! - Wire up middleware (request ID, tracing, timeout, panic capture, limits)
//! - Serve on a bound listener until shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{RulesConfig, ServiceConfig};
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::http::response::{envelope_bare_errors, handle_panic};
use crate::http::status::get_status;
use crate::observability::metrics;
use crate::providers::{fink, pearl};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub rules: Arc<RulesConfig>,
}

/// HTTP server for the mock providers.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState {
            rules: Arc::new(config.rules.clone()),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(get_status))
            .route("/api/fink/sessions", post(fink::create_session))
            .route("/api/fink/sessions/{session_id}", get(fink::lookup_session))
            .route("/api/fink/transfers", post(fink::create_transfer))
            .route("/api/pearl/student-verifications", post(pearl::verify_student))
            .route(
                "/api/pearl/university-verifications",
                post(pearl::verify_university),
            )
            .route_layer(middleware::from_fn(metrics::track_requests))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_size))
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::map_response(envelope_bare_errors))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(set_request_id_layer())
    }

    /// A clone of the fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
