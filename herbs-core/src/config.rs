//! Configuration model for the herbs CLI
//!
//! Connection settings are layered: command-line flags and environment
//! variables (bound by the CLI), then the TOML config file, then the
//! development defaults below. Every layer is a [`DatabaseOverrides`];
//! [`DatabaseConfig`] is the fully resolved result handed to the pool.
//!
//! ```toml
//! [database]
//! host = "db.internal"
//! port = 5432
//! user = "herbs"
//! password = "secret"
//! dbname = "herbs"
//! sslmode = "require"
//! connect_timeout_secs = 5
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CoreError, Result};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_USER: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "pwd4adm";
pub const DEFAULT_DBNAME: &str = "simple_crud_db";
pub const DEFAULT_SSLMODE: &str = "disable";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const PASSWORD_MASK: &str = "********";

/// Fully resolved connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub sslmode: String,
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            dbname: DEFAULT_DBNAME.to_string(),
            sslmode: DEFAULT_SSLMODE.to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl DatabaseConfig {
    /// Fill every unset field of `overrides` from the defaults.
    pub fn from_overrides(overrides: DatabaseOverrides) -> Self {
        let defaults = Self::default();
        Self {
            host: overrides.host.unwrap_or(defaults.host),
            port: overrides.port.unwrap_or(defaults.port),
            user: overrides.user.unwrap_or(defaults.user),
            password: overrides.password.unwrap_or(defaults.password),
            dbname: overrides.dbname.unwrap_or(defaults.dbname),
            sslmode: overrides.sslmode.unwrap_or(defaults.sslmode),
            connect_timeout_secs: overrides
                .connect_timeout_secs
                .unwrap_or(defaults.connect_timeout_secs),
        }
    }

    /// Copy safe to print: the password is replaced by a mask.
    pub fn masked(&self) -> Self {
        let mut masked = self.clone();
        if !masked.password.is_empty() {
            masked.password = PASSWORD_MASK.to_string();
        }
        masked
    }
}

/// One layer of optional connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub dbname: Option<String>,
    pub sslmode: Option<String>,
    pub connect_timeout_secs: Option<u64>,
}

impl DatabaseOverrides {
    /// Layer `self` over `lower`: values set here win.
    pub fn over(self, lower: Self) -> Self {
        Self {
            host: self.host.or(lower.host),
            port: self.port.or(lower.port),
            user: self.user.or(lower.user),
            password: self.password.or(lower.password),
            dbname: self.dbname.or(lower.dbname),
            sslmode: self.sslmode.or(lower.sslmode),
            connect_timeout_secs: self.connect_timeout_secs.or(lower.connect_timeout_secs),
        }
    }
}

/// Contents of the herbs-cli config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HerbsConfig {
    pub database: DatabaseOverrides,
}

impl HerbsConfig {
    /// Default config file path: ~/.herbs-cli/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".herbs-cli/config.toml")
    }

    /// Config file looked up in the working directory when the home one is absent
    pub fn local_config_path() -> PathBuf {
        PathBuf::from("herbs-cli.toml")
    }

    /// Parse a config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| CoreError::config_parse(path, e))
    }

    /// Locate and load the config file.
    ///
    /// An explicit path must exist. Without one, the home and local default
    /// locations are tried in order and a missing file yields `None`.
    pub fn discover(explicit: Option<&Path>) -> Result<Option<(PathBuf, Self)>> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(CoreError::config_not_found(path));
            }
            return Self::load_from(path).map(|cfg| Some((path.to_path_buf(), cfg)));
        }

        for candidate in [Self::config_path(), Self::local_config_path()] {
            if candidate.is_file() {
                let cfg = Self::load_from(&candidate)?;
                return Ok(Some((candidate, cfg)));
            }
            debug!(path = %candidate.display(), "no config file");
        }

        Ok(None)
    }
}
