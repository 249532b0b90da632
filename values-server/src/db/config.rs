//! Database connection settings and pool creation
//!
//! Uses sqlx PgPool with explicit connection limits.

use std::fmt;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;

/// Default maximum connections for the pool.
/// Kept low for a single small service.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default PostgreSQL port
pub const DEFAULT_DB_PORT: u16 = 5432;

/// How long to wait for a pooled connection before giving up
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Settings needed to reach the live database.
///
/// Every field is required for live mode. When any of them is missing the
/// service runs against the fallback store instead.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub server: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,

    /// Require an encrypted connection
    pub encrypt: bool,

    /// Accept the server certificate without verifying it
    pub trust_server_certificate: bool,

    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(
        server: impl Into<String>,
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            port: DEFAULT_DB_PORT,
            database: database.into(),
            user: user.into(),
            password: password.into(),
            encrypt: false,
            trust_server_certificate: true,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// TLS mode derived from the encrypt/trust flags.
    pub fn ssl_mode(&self) -> PgSslMode {
        match (self.encrypt, self.trust_server_certificate) {
            (false, _) => PgSslMode::Prefer,
            (true, true) => PgSslMode::Require,
            (true, false) => PgSslMode::VerifyFull,
        }
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.server)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
            .ssl_mode(self.ssl_mode())
    }
}

// Password stays out of logs
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("encrypt", &self.encrypt)
            .field("trust_server_certificate", &self.trust_server_certificate)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// Create a PostgreSQL connection pool.
///
/// Establishes one connection up front, so an unreachable server fails here.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .acquire_timeout(config.connect_timeout)
        .connect_with(config.connect_options())
        .await
}
