//! Flora RPC Server - JSON-RPC backend for the species dashboard.
//!
//! Wraps flora-core in a JSON-RPC 2.0 server so the dashboard frontend can
//! load datasets and fetch statistics over HTTP.

mod handlers;
mod server;

use anyhow::Result;
use clap::Parser;
use flora_core::config::AppConfig;
use flora_core::FloraApi;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "flora-rpc")]
#[command(about = "JSON-RPC server for the plant species dashboard")]
struct Args {
    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, default_value = "0")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Directory holding the enriched species tables
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Source to load at startup (defaults to the catalog default)
    #[arg(long)]
    source: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("Starting {} RPC server", AppConfig::APP_NAME);

    let data_dir = match args.data_dir {
        Some(path) => path,
        None => std::env::current_dir()?.join(AppConfig::DEFAULT_DATA_DIR_NAME),
    };
    info!("Data directory: {}", data_dir.display());

    let api = FloraApi::new(&data_dir).await?;

    // A missing default table is not fatal: the dashboard can still upload.
    let initial = args
        .source
        .or_else(|| api.catalog().default_id().map(String::from));
    if let Some(id) = initial {
        match api.select_source(&id).await {
            Ok(info) => info!("Loaded {} ({} records)", info.source_id, info.record_count),
            Err(e) => warn!("Could not load initial source {}: {}", id, e),
        }
    }

    let addr = server::start_server(api, &args.host, args.port).await?;

    // Read by the dashboard launcher and the integration tests.
    println!("RPC_PORT={}", addr.port());

    info!("RPC server running on {}", addr);

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, exiting");

    Ok(())
}
