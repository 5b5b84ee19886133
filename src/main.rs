//! Provider mocks server.
//!
//! ```text
//!     Client ──▶ request id ─▶ trace ─▶ timeout ─▶ catch panic ─▶ handler
//!                                                                   │
//!                              /api/fink/*   ─▶ suffix rule ─▶ session codec
//!                              /api/pearl/*  ─▶ suffix rule
//! ```

use std::path::PathBuf;

use clap::Parser;

use provider_mocks::config::{load_config, ServiceConfig};
use provider_mocks::lifecycle::startup;
use provider_mocks::observability::logging;

#[derive(Parser)]
#[command(name = "provider-mocks")]
#[command(about = "Mock Fink and Pearl provider endpoints", long_about = None)]
struct Args {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "provider-mocks starting"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
