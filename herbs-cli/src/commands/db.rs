//! Database maintenance commands

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use herbs_core::DatabaseConfig;
use herbs_store::{migrations, Database};

#[derive(Parser, Debug)]
pub struct DbArgs {
    #[command(subcommand)]
    pub command: DbCommands,
}

#[derive(Subcommand, Debug)]
pub enum DbCommands {
    /// Create the herbs table if it does not exist
    Init,
    /// Check that the database server answers
    Ping,
}

pub async fn run_db(args: DbArgs, db: &Database, config: &DatabaseConfig) -> Result<()> {
    match args.command {
        DbCommands::Init => {
            migrations::run(db.pool())
                .await
                .context("Failed to initialize schema")?;
            println!("✅ herbs table ready in '{}'", config.dbname);
        }
        DbCommands::Ping => {
            let version = db.server_version().await?;
            println!(
                "✅ {}:{}/{} is reachable (PostgreSQL {})",
                config.host, config.port, config.dbname, version
            );
        }
    }
    Ok(())
}
