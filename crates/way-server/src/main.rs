//! way-server
//!
//! Runs the demo router on a local address.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Demo HTTP server for way-router.
#[derive(Parser)]
#[command(name = "way-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to listen on.
    #[arg(short, long, env = "WAY_ADDR", default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Log every dispatched request.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let router = Arc::new(way_server::build_router());
    info!(routes = router.routes().len(), "router ready");

    let listener = TcpListener::bind(cli.addr).await?;
    info!(addr = %cli.addr, "listening");

    way_server::serve(listener, router).await?;
    Ok(())
}
