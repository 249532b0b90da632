//! Tracing setup for valuesctl
//!
//! Usage:
//!   valuesctl --debug ...                   # Debug logging for the service crates
//!   RUST_LOG=values_server=debug valuesctl  # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                                # Overrides the default filter

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging for the service (ignored when RUST_LOG is set)
    pub debug: bool,
}

/// Filter used when RUST_LOG is unset. Service crates at the requested level,
/// request spans at info, everything else only when it warns.
fn default_directives(debug: bool) -> &'static str {
    if debug {
        "warn,values_server=debug,valuesctl=debug,tower_http=debug"
    } else {
        "warn,values_server=info,valuesctl=info,tower_http=info"
    }
}

/// Initialize console tracing
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config.debug)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
