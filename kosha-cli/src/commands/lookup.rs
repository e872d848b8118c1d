use anyhow::Result;
use kosha::{Lexicon, LookupRequest};

use crate::cli::LookupCommand;
use crate::output::{self, OutputFormat};

/// Execute a lookup command.
pub fn run(cmd: LookupCommand, lexicon: &Lexicon, format: OutputFormat) -> Result<()> {
    let mut builder = LookupRequest::builder(cmd.query);
    if let Some(list) = cmd.sources.as_deref() {
        builder = builder.source_list(list);
    }
    if let Some(limit) = cmd.limit {
        builder = builder.limit(limit.get());
    }

    let hits = lexicon.lookup(&builder.build());
    output::print_hits(&hits, format)
}
