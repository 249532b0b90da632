//! Configuration from flags, environment and `.env`
//!
//! Priority order (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables already set
//! 3. `.env` in the current directory

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args};
use values_server::db::config::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_DB_PORT};
use values_server::DatabaseConfig;

/// Load `.env` from the current directory, if present.
///
/// dotenvy doesn't overwrite existing vars, so the real environment wins.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Database connection arguments
#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Database host
    #[arg(long, env = "DB_SERVER")]
    pub db_server: Option<String>,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = DEFAULT_DB_PORT)]
    pub db_port: u16,

    /// Database name
    #[arg(long, env = "DB_DATABASE")]
    pub db_database: Option<String>,

    /// Database user
    #[arg(long, env = "DB_USER")]
    pub db_user: Option<String>,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Require an encrypted connection
    #[arg(long, env = "DB_ENCRYPT", default_value_t = false, action = ArgAction::Set)]
    pub db_encrypt: bool,

    /// Accept the server certificate without verification
    #[arg(long, env = "DB_TRUST_SERVER_CERTIFICATE", default_value_t = true, action = ArgAction::Set)]
    pub db_trust_server_certificate: bool,

    /// Seconds to wait for a database connection
    #[arg(long, env = "DB_CONNECT_TIMEOUT", default_value_t = DEFAULT_CONNECT_TIMEOUT.as_secs())]
    pub db_connect_timeout: u64,
}

impl DbArgs {
    /// Database settings, or `None` when any required field is missing.
    pub fn to_config(&self) -> Option<DatabaseConfig> {
        let present = |field: &Option<String>| field.clone().filter(|s| !s.trim().is_empty());

        let mut config = DatabaseConfig::new(
            present(&self.db_server)?,
            present(&self.db_database)?,
            present(&self.db_user)?,
            present(&self.db_password)?,
        );
        config.port = self.db_port;
        config.encrypt = self.db_encrypt;
        config.trust_server_certificate = self.db_trust_server_certificate;
        config.connect_timeout = Duration::from_secs(self.db_connect_timeout);
        Some(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        db: DbArgs,
    }

    fn parse(args: &[&str]) -> DbArgs {
        TestCli::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap()
            .db
    }

    #[test]
    fn full_config() {
        let db = parse(&[
            "--db-server",
            "db.local",
            "--db-database",
            "values",
            "--db-user",
            "app",
            "--db-password",
            "secret",
            "--db-port",
            "6543",
            "--db-encrypt",
            "true",
        ]);
        let config = db.to_config().expect("complete config");

        assert_eq!(config.server, "db.local");
        assert_eq!(config.port, 6543);
        assert!(config.encrypt);
        assert!(config.trust_server_certificate);
    }

    #[test]
    fn missing_field_means_no_config() {
        let db = parse(&[
            "--db-server",
            "db.local",
            "--db-database",
            "values",
            "--db-user",
            "app",
            "--db-password",
            "",
        ]);
        assert!(db.to_config().is_none());
    }
}
