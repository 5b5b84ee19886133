//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when enabled
//! - Bind the listener and run the HTTP server
//! - Translate OS signals into a shutdown broadcast
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Errors that abort startup or serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid address '{address}': {source}")]
    Address {
        address: String,
        source: std::net::AddrParseError,
    },

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

fn parse_addr(address: &str) -> Result<SocketAddr, StartupError> {
    address.parse().map_err(|source| StartupError::Address {
        address: address.to_string(),
        source,
    })
}

/// Run the service until SIGINT/SIGTERM.
pub async fn run(config: ServiceConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        metrics::init_metrics(parse_addr(&config.observability.metrics_address)?);
    }

    let address = parse_addr(&config.listener.bind_address)?;
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_termination().await;
        shutdown.trigger();
    });

    HttpServer::new(config).run(listener, server_shutdown).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_bind_address() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "not an address".into();

        let err = run(config).await.unwrap_err();
        assert!(matches!(err, StartupError::Address { .. }));
        assert!(err.to_string().starts_with("invalid address 'not an address'"));
    }
}
