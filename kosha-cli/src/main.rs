mod cli;
mod commands;
mod context;
mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::commands::{lookup, repl};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;
    let config = context::load_config(cli.config.as_deref(), cli.data_dir)?;
    let lexicon = context::open_lexicon(config)?;

    match cli.command {
        Command::Lookup(cmd) => lookup::run(cmd, &lexicon, format),
        Command::Status => output::print_stats(&lexicon.stats(), format),
        Command::Sources => output::print_sources(&lexicon.sources(), format),
        Command::Repl => repl::run(Arc::new(lexicon), format).await,
    }
}
