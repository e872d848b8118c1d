use anyhow::Result;
use clap::ValueEnum;
use kosha::{IndexStats, LookupHit, ReloadSummary};
use serde_json::{Map, Value, json};
use tabled::settings::Style;
use tabled::{Table, Tabled};

const MAX_CELL_CHARS: usize = 80;

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    Table,
    /// JSON output.
    Json,
}

/// Print lookup hits.
pub fn print_hits(hits: &[LookupHit], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&serde_json::to_value(hits)?),
        OutputFormat::Table => {
            if hits.is_empty() {
                println!("No matches found.");
                return Ok(());
            }

            let rows: Vec<HitRow> = hits
                .iter()
                .map(|hit| HitRow {
                    source: hit.source.clone(),
                    head: hit.head.clone(),
                    gloss: truncate(&hit.gloss),
                    meta: format_meta_compact(&hit.meta),
                })
                .collect();

            let table = Table::new(&rows).with(Style::rounded()).to_string();
            println!("{table}");
            Ok(())
        }
    }
}

/// Print index statistics.
pub fn print_stats(stats: &IndexStats, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "status": "ok",
            "version": stats.version,
            "sources": stats.sources,
            "entries": stats.entries,
            "loaded_at": stats.loaded_at.to_rfc3339(),
        })),
        OutputFormat::Table => {
            println!("Snapshot: v{} (loaded {})", stats.version, stats.loaded_at.to_rfc3339());
            println!("Sources:  {}", stats.sources);
            println!("Entries:  {}", stats.entries);
            Ok(())
        }
    }
}

/// Print the sorted list of source names.
pub fn print_sources(sources: &[String], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&json!(sources)),
        OutputFormat::Table => {
            if sources.is_empty() {
                println!("No sources loaded.");
                return Ok(());
            }
            let rows: Vec<SourceRow> = sources
                .iter()
                .map(|name| SourceRow { name: name.clone() })
                .collect();
            let table = Table::new(&rows).with(Style::rounded()).to_string();
            println!("{table}");
            Ok(())
        }
    }
}

/// Print the outcome of a reload.
pub fn print_reload(summary: &ReloadSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "ok": true,
            "version": summary.version,
            "sources": summary.sources,
            "entries": summary.entries,
            "skipped": summary.skipped,
            "root_found": summary.root_found,
        })),
        OutputFormat::Table => {
            println!(
                "Reloaded: v{}, {} sources, {} entries ({} files skipped).",
                summary.version, summary.sources, summary.entries, summary.skipped
            );
            if !summary.root_found {
                println!("Data directory not found; the lexicon is empty.");
            }
            Ok(())
        }
    }
}

// --- Helper types and functions ---

#[derive(Tabled)]
struct HitRow {
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Head")]
    head: String,
    #[tabled(rename = "Gloss")]
    gloss: String,
    #[tabled(rename = "Meta")]
    meta: String,
}

#[derive(Tabled)]
struct SourceRow {
    #[tabled(rename = "Source")]
    name: String,
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render metadata as `key: value` pairs, sorted by key.
fn format_meta_compact(meta: &Map<String, Value>) -> String {
    let mut parts: Vec<String> = meta
        .iter()
        .map(|(k, v)| match v {
            Value::String(s) => format!("{k}: {}", truncate(s)),
            other => format!("{k}: {}", truncate(&other.to_string())),
        })
        .collect();
    parts.sort();
    parts.join(", ")
}

/// Shorten long text on a character boundary.
fn truncate(text: &str) -> String {
    if text.chars().count() > MAX_CELL_CHARS {
        let head: String = text.chars().take(MAX_CELL_CHARS - 3).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
