//! Text rendering of herb records
//!
//! Two human formats: a detailed multi-line card and a fixed-width table.
//! JSON goes through serde so scripts can pipe output to `jq`.

use crate::models::Herb;

const DESCRIPTION_PREVIEW_LEN: usize = 100;
const NAME_COLUMN: usize = 20;
const LATIN_COLUMN: usize = 25;
const CARD_RULE_LEN: usize = 50;
const TABLE_RULE_LEN: usize = 80;

/// How a list of herbs is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Multi-line card per herb
    #[default]
    Detailed,
    /// One fixed-width row per herb
    Table,
    /// Pretty-printed JSON array
    Json,
}

fn poisonous_label(is_poisonous: bool) -> &'static str {
    if is_poisonous {
        "YES ⚠"
    } else {
        "No"
    }
}

/// Shorten `s` to at most `max_len` characters, ending in "..." when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let mut out: String = s.chars().take(max_len - 3).collect();
    out.push_str("...");
    out
}

/// Detailed multi-line card for one herb.
pub fn detail(herb: &Herb) -> String {
    format!(
        "ID: {}\n\
         Name: {}\n\
         Latin name: {}\n\
         Description: {}\n\
         Poisonous: {}\n\
         Image: {}\n\
         Created: {}",
        herb.id,
        herb.name,
        herb.latin_name.as_deref().unwrap_or_default(),
        truncate(
            herb.description.as_deref().unwrap_or_default(),
            DESCRIPTION_PREVIEW_LEN
        ),
        poisonous_label(herb.is_poisonous),
        herb.image_path.as_deref().unwrap_or_default(),
        herb.created_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

/// Column header for the table format.
pub fn table_header() -> String {
    format!(
        "{:<4} {:<20} {:<25} {:<9} {:<10}",
        "ID", "Name", "Latin name", "Poisonous", "Created"
    )
}

/// One table row.
pub fn table_row(herb: &Herb) -> String {
    format!(
        "{:<4} {:<20} {:<25} {:<9} {:<10}",
        herb.id,
        truncate(&herb.name, NAME_COLUMN),
        truncate(herb.latin_name.as_deref().unwrap_or_default(), LATIN_COLUMN),
        poisonous_label(herb.is_poisonous),
        herb.created_at.format("%Y-%m-%d"),
    )
}

/// Render a list of herbs in the requested format.
pub fn render_list(herbs: &[Herb], format: OutputFormat) -> serde_json::Result<String> {
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(herbs)?,
        OutputFormat::Table => {
            let mut lines = Vec::with_capacity(herbs.len() + 2);
            lines.push(table_header());
            lines.push("-".repeat(TABLE_RULE_LEN));
            lines.extend(herbs.iter().map(table_row));
            lines.join("\n")
        }
        OutputFormat::Detailed => herbs
            .iter()
            .map(detail)
            .collect::<Vec<_>>()
            .join(&format!("\n\n{}\n", "-".repeat(CARD_RULE_LEN))),
    };
    Ok(out)
}

/// Render a single herb: a card, or a JSON object.
pub fn render_one(herb: &Herb, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(herb),
        OutputFormat::Table => Ok(format!("{}\n{}", table_header(), table_row(herb))),
        OutputFormat::Detailed => Ok(detail(herb)),
    }
}
