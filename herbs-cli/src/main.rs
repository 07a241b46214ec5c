//! herbs CLI - manage a catalog of medicinal herbs stored in PostgreSQL
//!
//! - `herb` subcommands: create, list, get, update, delete, search, poisonous
//! - `db` subcommands: schema bootstrap and connectivity check
//! - `config` subcommands: inspect resolved connection settings
//!
//! Settings come from flags, then `HERBS_DB_*` environment variables (a
//! `.env` file is honored), then the config file, then built-in defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use herbs_core::DatabaseConfig;
use herbs_store::Database;

mod commands;
mod config;
mod tracing_setup;
mod ui;

use config::{ConnectionArgs, Settings};
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "herbs",
    author,
    version,
    about = "Manage a catalog of medicinal herbs stored in PostgreSQL"
)]
struct Cli {
    /// Config file (default: ~/.herbs-cli/config.toml, then ./herbs-cli.toml)
    #[arg(long, env = "HERBS_CONFIG", value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    connection: ConnectionArgs,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Suppress progress spinners (for scripts)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Herb records (create, list, get, update, delete, search, poisonous)
    Herb(commands::herb::HerbArgs),
    /// Database maintenance (init, ping)
    Db(commands::db::DbArgs),
    /// Inspect configuration (path, show)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();
    ui::init_quiet_mode(cli.quiet);

    let command = match cli.command {
        Commands::Completions(args) => return run_completions(args),
        command => command,
    };

    let settings = Settings::resolve(cli.config.as_deref(), cli.connection)?;

    let command = match command {
        Commands::Config(args) => return config::run_config(args, &settings),
        command => command,
    };

    let db = connect(&settings.database).await?;
    let result = match command {
        Commands::Herb(args) => commands::run_herb(args, &db).await,
        Commands::Db(args) => commands::run_db(args, &db, &settings.database).await,
        Commands::Config(_) | Commands::Completions(_) => Ok(()),
    };
    db.close().await;
    result
}

async fn connect(config: &DatabaseConfig) -> Result<Database> {
    let target = format!("{}:{}/{}", config.host, config.port, config.dbname);

    ui::with_spinner_async(
        format!("Connecting to {}", target),
        format!("Connected to {}", target),
        Database::connect(config),
    )
    .await
    .with_context(|| format!("Failed to connect to database at {}", target))
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
