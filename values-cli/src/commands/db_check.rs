//! Database check command
//!
//! Connects, bootstraps the table if needed, and prints the resulting flags.

use anyhow::{bail, Context, Result};
use clap::Parser;

use values_server::SqlValueRepository;

use crate::config::DbArgs;

/// Arguments for the db-check command
#[derive(Parser, Debug)]
pub struct DbCheckArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

pub async fn run_db_check(args: DbCheckArgs) -> Result<()> {
    let Some(config) = args.db.to_config() else {
        bail!("Database configuration incomplete: set DB_SERVER, DB_DATABASE, DB_USER and DB_PASSWORD");
    };

    let status = SqlValueRepository::new().initialize(&config).await;
    let out = serde_json::to_string_pretty(&status).context("Failed to serialize status")?;
    println!("{out}");

    if !status.is_live() {
        bail!("Database is not ready; the server would run in demo mode");
    }
    Ok(())
}
