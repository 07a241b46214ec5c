//! Herb commands: create, list, get, update, delete, search, poisonous
//!
//! ```bash
//! herbs herb create --name "Chamomile" --latin "Matricaria chamomilla"
//! herbs herb list --table
//! herbs herb search chamo --json | jq '.[].id'
//! ```

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use herbs_core::models::herb::optional_text;
use herbs_core::render::{self, render_list, render_one};
use herbs_core::{Herb, HerbPatch, OutputFormat};
use herbs_store::{Database, HerbRepo};

#[derive(Parser, Debug)]
pub struct HerbArgs {
    #[command(subcommand)]
    pub command: HerbCommands,
}

#[derive(Subcommand, Debug)]
pub enum HerbCommands {
    /// Create a new herb
    Create(CreateArgs),
    /// List all herbs
    #[command(visible_alias = "ls")]
    List(OutputArgs),
    /// Show a single herb
    Get(GetArgs),
    /// Update fields of an existing herb
    Update(UpdateArgs),
    /// Delete a herb (asks for confirmation)
    Delete(DeleteArgs),
    /// Search herbs by name or latin name (partial, case-insensitive)
    Search(SearchArgs),
    /// List poisonous herbs
    Poisonous(OutputArgs),
}

// ============================================================================
// Output Format (shared)
// ============================================================================

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CliOutputFormat {
    /// Multi-line card per herb (default)
    #[default]
    Detailed,
    /// One row per herb
    Table,
    /// JSON output (for piping to jq)
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(format: CliOutputFormat) -> Self {
        match format {
            CliOutputFormat::Detailed => OutputFormat::Detailed,
            CliOutputFormat::Table => OutputFormat::Table,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, short, value_enum, default_value = "detailed")]
    pub output: CliOutputFormat,

    /// Shorthand for --output table
    #[arg(long, short, conflicts_with_all = ["output", "json"])]
    pub table: bool,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

impl OutputArgs {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.table {
            OutputFormat::Table
        } else {
            self.output.into()
        }
    }
}

// ============================================================================
// Arguments
// ============================================================================

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Herb name (required)
    #[arg(long, short)]
    pub name: String,

    /// Latin (botanical) name
    #[arg(long, short)]
    pub latin: Option<String>,

    /// Description
    #[arg(long, short)]
    pub desc: Option<String>,

    /// Mark the herb as poisonous
    #[arg(long, short)]
    pub poisonous: bool,

    /// Path to an image of the herb
    #[arg(long, short)]
    pub image: Option<String>,
}

impl CreateArgs {
    /// Build the new record; blank optional values become absent.
    pub fn to_herb(&self) -> Herb {
        Herb {
            name: self.name.trim().to_string(),
            latin_name: self.latin.as_deref().and_then(optional_text),
            description: self.desc.as_deref().and_then(optional_text),
            is_poisonous: self.poisonous,
            image_path: self.image.as_deref().and_then(optional_text),
            ..Default::default()
        }
    }
}

#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Herb ID
    pub id: i32,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Herb ID
    pub id: i32,

    /// New name
    #[arg(long, short)]
    pub name: Option<String>,

    /// New latin name (empty clears it)
    #[arg(long, short)]
    pub latin: Option<String>,

    /// New description (empty clears it)
    #[arg(long, short)]
    pub desc: Option<String>,

    /// Poisonous flag; bare flag means true
    #[arg(
        long,
        short,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub poisonous: Option<bool>,

    /// New image path (empty clears it)
    #[arg(long, short)]
    pub image: Option<String>,
}

impl UpdateArgs {
    /// Only the flags actually passed end up in the patch.
    pub fn patch(&self) -> HerbPatch {
        HerbPatch {
            name: self.name.as_deref().map(|name| name.trim().to_string()),
            latin_name: self.latin.as_deref().map(optional_text),
            description: self.desc.as_deref().map(optional_text),
            is_poisonous: self.poisonous,
            image_path: self.image.as_deref().map(optional_text),
        }
    }
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Herb ID
    pub id: i32,
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Text to look for in the name or latin name
    pub term: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

// ============================================================================
// Dispatch
// ============================================================================

pub async fn run_herb(args: HerbArgs, db: &Database) -> Result<()> {
    let repo = HerbRepo::new(db.pool());

    match args.command {
        HerbCommands::Create(args) => run_create(&repo, args).await,
        HerbCommands::List(output) => run_list(&repo, output).await,
        HerbCommands::Get(args) => run_get(&repo, args).await,
        HerbCommands::Update(args) => run_update(&repo, args).await,
        HerbCommands::Delete(args) => run_delete(&repo, args).await,
        HerbCommands::Search(args) => run_search(&repo, args).await,
        HerbCommands::Poisonous(output) => run_poisonous(&repo, output).await,
    }
}

/// Accept only an explicit yes.
pub fn is_confirmed(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "Y")
}

fn print_listing(herbs: &[Herb], format: OutputFormat, summary: String) -> Result<()> {
    if format != OutputFormat::Json {
        println!("{}\n", summary);
    }
    println!("{}", render_list(herbs, format)?);
    Ok(())
}

async fn run_create(repo: &HerbRepo<'_>, args: CreateArgs) -> Result<()> {
    let mut herb = args.to_herb();
    repo.create(&mut herb)
        .await
        .context("Failed to create herb")?;

    println!("✅ Herb created with ID {}", herb.id);
    println!("{}", render::detail(&herb));
    Ok(())
}

async fn run_list(repo: &HerbRepo<'_>, output: OutputArgs) -> Result<()> {
    let format = output.format();
    let herbs = repo.get_all().await?;

    if herbs.is_empty() && format != OutputFormat::Json {
        println!("The database is empty. Add herbs with 'herbs herb create'.");
        return Ok(());
    }

    print_listing(&herbs, format, format!("Herbs found: {}", herbs.len()))
}

async fn run_get(repo: &HerbRepo<'_>, args: GetArgs) -> Result<()> {
    let herb = repo.get_by_id(args.id).await?;
    println!("{}", render_one(&herb, args.output.format())?);
    Ok(())
}

async fn run_update(repo: &HerbRepo<'_>, args: UpdateArgs) -> Result<()> {
    let patch = args.patch();
    if patch.is_empty() {
        println!("Nothing to update: pass at least one of --name, --latin, --desc, --poisonous, --image.");
        return Ok(());
    }

    let mut herb = repo.get_by_id(args.id).await?;
    patch.apply_to(&mut herb);
    repo.update(&herb).await.context("Failed to update herb")?;

    println!("✅ Herb with ID {} updated", herb.id);
    println!("{}", render::detail(&herb));
    Ok(())
}

async fn run_delete(repo: &HerbRepo<'_>, args: DeleteArgs) -> Result<()> {
    let herb = repo.get_by_id(args.id).await?;

    println!("About to delete:");
    println!("{}", render::detail(&herb));
    print!("\nAre you sure? (y/N): ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    if !is_confirmed(&answer) {
        println!("Deletion cancelled.");
        return Ok(());
    }

    repo.delete(herb.id).await.context("Failed to delete herb")?;
    println!("✅ Herb with ID {} deleted", herb.id);
    Ok(())
}

async fn run_search(repo: &HerbRepo<'_>, args: SearchArgs) -> Result<()> {
    let format = args.output.format();
    let herbs = repo.search(&args.term).await?;

    if herbs.is_empty() && format != OutputFormat::Json {
        println!("No herbs matching '{}'.", args.term);
        return Ok(());
    }

    print_listing(
        &herbs,
        format,
        format!("Herbs matching '{}': {}", args.term, herbs.len()),
    )
}

async fn run_poisonous(repo: &HerbRepo<'_>, output: OutputArgs) -> Result<()> {
    let format = output.format();
    let herbs = repo.get_poisonous().await?;

    if herbs.is_empty() && format != OutputFormat::Json {
        println!("No poisonous herbs recorded.");
        return Ok(());
    }

    print_listing(&herbs, format, format!("⚠️  Poisonous herbs found: {}", herbs.len()))
}
