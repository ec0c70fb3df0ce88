use std::path::PathBuf;
use std::sync::Arc;

use accountd::config::Config;
use accountd::http::StatusMode;
use accountd::{Registry, Server};
use clap::Parser;
use tracing::info;

/// In-memory account registry served over HTTP
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening address, overrides the configuration file
    #[arg(short, long)]
    addr: Option<String>,

    /// Answer with 302/500 instead of 200/400
    #[arg(long)]
    legacy_status: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(addr) = args.addr {
        config.server_addr = addr;
    }
    if args.legacy_status {
        config.status_codes = StatusMode::Legacy;
    }
    config.validate()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.level)),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting accountd - in-memory account registry");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let registry = Arc::new(Registry::new());
    let server = Server::bind(&config.server_addr, registry, config.status_codes).await?;
    info!("Server listening on: {}", server.local_addr());

    server.run().await?;

    Ok(())
}
