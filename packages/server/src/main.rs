use std::net::SocketAddr;

use clap::Parser;
use tracing::info;

use cafs_numeric_server::{build_state, logging, serve, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = Config::parse();
    let state = build_state(&config)?;

    let addr: SocketAddr = format!("{}:{}", config.bind, config.port).parse()?;
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve(listener, state).await?;

    Ok(())
}
