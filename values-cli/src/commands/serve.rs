//! HTTP server command for the values API

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::Parser;

use values_server::http::server::DEFAULT_PORT;
use values_server::{run_server, Container, ServerConfig};

use crate::config::DbArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "VALUES_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[command(flatten)]
    pub db: DbArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let container = Container::default();

    // Never fails: without a reachable database the service runs in demo mode
    let status = container
        .initialize_database(args.db.to_config().as_ref())
        .await;
    if !status.is_live() {
        tracing::warn!("Serving from the in-memory fallback store");
    }

    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
    };
    tracing::info!("Starting values server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(container.router(), config)
        .await
        .context("Server error")?;

    Ok(())
}
