//! timeprox: transparent proxy pinning the web to an archive snapshot.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌────────────────────────────────────────────────┐
//!                      │                   TIMEPROX                     │
//!                      │                                                │
//!   Client Request     │  ┌──────────┐   ┌─────────┐   ┌────────────┐  │
//!   ───────────────────┼─▶│   http   │──▶│ archive │──▶│  archive   │──┼──▶ Web
//!                      │  │  server  │   │resolver │   │  fetcher   │  │    Archive
//!                      │  └──────────┘   └─────────┘   └────────────┘  │
//!                      │                                     │         │
//!                      │                                     ▼         │
//!   Client Response    │  ┌──────────┐   ┌─────────┐   ┌────────────┐  │
//!   ◀──────────────────┼──│ response │◀──│ rewrite │◀──│ classifier │  │
//!                      │  │          │   │hdrs/body│   │            │  │
//!                      │  └──────────┘   └─────────┘   └────────────┘  │
//!                      │                                                │
//!                      │  config (immutable) · observability · lifecycle│
//!                      └────────────────────────────────────────────────┘
//! ```
//!
//! Every inbound request is re-targeted onto the configured snapshot
//! timestamp; textual responses are filtered to strip the archive's link
//! rewriting, everything else passes through untouched.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use timeprox::config::loader::load_config;
use timeprox::http::HttpServer;
use timeprox::lifecycle::{signals, Shutdown};
use timeprox::observability::logging;

#[derive(Parser)]
#[command(name = "timeprox")]
#[command(about = "Transparent proxy pinning the web to an archive snapshot", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults apply without one).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        archive = %config.archive.base_url,
        timestamp = %config.archive.effective_timestamp(),
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
