//! Connection settings resolution and the `config` subcommand

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use herbs_core::{DatabaseConfig, DatabaseOverrides, HerbsConfig};
use serde::Serialize;
use tracing::info;

/// Connection flags. Each one falls back to its environment variable.
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// Database host
    #[arg(long, env = "HERBS_DB_HOST", global = true)]
    pub host: Option<String>,

    /// Database port
    #[arg(long, env = "HERBS_DB_PORT", global = true)]
    pub port: Option<u16>,

    /// Database user
    #[arg(long, env = "HERBS_DB_USER", global = true)]
    pub user: Option<String>,

    /// Database password
    #[arg(long, env = "HERBS_DB_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Database name
    #[arg(long, env = "HERBS_DB_NAME", global = true)]
    pub dbname: Option<String>,

    /// SSL mode (disable, allow, prefer, require, verify-ca, verify-full)
    #[arg(long, env = "HERBS_DB_SSLMODE", global = true)]
    pub sslmode: Option<String>,

    /// Seconds to wait for a database connection
    #[arg(
        long = "connect-timeout",
        env = "HERBS_DB_CONNECT_TIMEOUT",
        value_name = "SECS",
        global = true
    )]
    pub connect_timeout: Option<u64>,
}

impl From<ConnectionArgs> for DatabaseOverrides {
    fn from(args: ConnectionArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            user: args.user,
            password: args.password,
            dbname: args.dbname,
            sslmode: args.sslmode,
            connect_timeout_secs: args.connect_timeout,
        }
    }
}

/// Fully resolved settings and the file they came from.
#[derive(Debug)]
pub struct Settings {
    pub source: Option<PathBuf>,
    pub database: DatabaseConfig,
}

impl Settings {
    /// Merge flags and environment over the config file over defaults.
    pub fn resolve(explicit: Option<&Path>, flags: ConnectionArgs) -> Result<Self> {
        let (source, file) = match HerbsConfig::discover(explicit)
            .context("Failed to load configuration")?
        {
            Some((path, cfg)) => {
                info!(path = %path.display(), "using config file");
                (Some(path), cfg.database)
            }
            None => (None, DatabaseOverrides::default()),
        };

        let database = DatabaseConfig::from_overrides(DatabaseOverrides::from(flags).over(file));
        Ok(Self { source, database })
    }
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Show the resolved connection settings (password masked)
    Show,
}

pub fn run_config(args: ConfigArgs, settings: &Settings) -> Result<()> {
    match args.command {
        ConfigCommands::Path => run_path(settings),
        ConfigCommands::Show => run_show(settings),
    }
}

fn run_path(settings: &Settings) -> Result<()> {
    match &settings.source {
        Some(path) => println!("{}", path.display()),
        None => {
            let default = HerbsConfig::config_path();
            println!("{}", default.display());
            eprintln!("(not found, using built-in defaults)");
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct ShownConfig<'a> {
    database: &'a DatabaseConfig,
}

fn run_show(settings: &Settings) -> Result<()> {
    let masked = settings.database.masked();
    let toml_str = toml::to_string_pretty(&ShownConfig { database: &masked })
        .context("Failed to serialize config to TOML")?;

    match &settings.source {
        Some(path) => println!("# source: {}", path.display()),
        None => println!("# source: built-in defaults"),
    }
    println!("{}", toml_str);
    Ok(())
}
