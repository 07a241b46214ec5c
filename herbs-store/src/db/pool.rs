//! Database connection pool management
//!
//! Uses sqlx PgPool with a fixed size: 25 open connections, and idle
//! connections are never reaped so up to 25 stay warm.

use std::time::Duration;

use herbs_core::DatabaseConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use tracing::{debug, info};

use crate::error::{Result, StoreError};

/// Maximum connections for the pool.
pub const MAX_CONNECTIONS: u32 = 25;

/// Translate resolved settings into driver connect options.
///
/// # Errors
///
/// Returns [`StoreError::InvalidConfig`] for an unknown SSL mode.
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions> {
    let ssl_mode: PgSslMode = config.sslmode.parse().map_err(|_| {
        StoreError::InvalidConfig(format!(
            "unknown sslmode '{}' (expected disable, allow, prefer, require, verify-ca or verify-full)",
            config.sslmode
        ))
    })?;

    Ok(PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.dbname)
        .ssl_mode(ssl_mode))
}

/// Pool sizing shared by the CLI and the database-backed tests.
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .min_connections(0)
        .idle_timeout(None)
        .max_lifetime(None)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
}

/// Owned connection handle for one CLI invocation
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open the pool and establish the first connection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] for unusable settings and
    /// [`StoreError::Connection`] when the server cannot be reached.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = connect_options(config)?;
        debug!(
            host = %config.host,
            port = config.port,
            dbname = %config.dbname,
            sslmode = %config.sslmode,
            "connecting to database"
        );

        let pool = pool_options(config)
            .connect_with(options)
            .await
            .map_err(StoreError::Connection)?;

        info!(host = %config.host, dbname = %config.dbname, "connected to database");
        Ok(Self { pool })
    }

    /// Wrap an already open pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip to the server and report its version string.
    pub async fn server_version(&self) -> Result<String> {
        sqlx::query_scalar("SHOW server_version")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::database("failed to query server version", e))
    }

    /// Close every pooled connection.
    pub async fn close(self) {
        self.pool.close().await;
        info!("database connection closed");
    }
}
