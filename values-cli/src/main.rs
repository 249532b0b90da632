//! valuesctl - run and check the values API
//!
//! - `serve`: start the HTTP server (falls back to in-memory data without a database)
//! - `db-check`: connect, bootstrap the table, and report readiness

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "valuesctl",
    author,
    version,
    about = "Values API server with live database and in-memory fallback"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve(commands::serve::ServeArgs),

    /// Check database connectivity and table readiness
    DbCheck(commands::db_check::DbCheckArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before parsing so clap's env fallbacks see it
    let dotenv_path = config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    match dotenv_path {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => debug!("No .env file found, using environment variables only"),
    }

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::DbCheck(args) => commands::run_db_check(args).await?,
    }

    Ok(())
}
