use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Kosha - lexicon lookup CLI
#[derive(Parser)]
#[command(name = "kosha", version, about)]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, env = "KOSHA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root of the lexicon directory tree (overrides the config file).
    #[arg(long, env = "KOSHA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Look up headwords containing the query.
    Lookup(LookupCommand),
    /// Show source and entry counts.
    Status,
    /// List loaded sources.
    Sources,
    /// Start an interactive REPL session.
    Repl,
}

#[derive(Parser)]
pub struct LookupCommand {
    /// Headword or headword fragment.
    pub query: String,

    /// Comma-separated list of sources to search, in order.
    #[arg(long)]
    pub sources: Option<String>,

    /// Maximum number of results (defaults to the configured limit).
    #[arg(long)]
    pub limit: Option<NonZeroUsize>,
}
