use std::sync::Arc;

use anyhow::{Context, Result};
use kosha::{Lexicon, LookupRequest, SourceFilter};
use rustyline::DefaultEditor;

use crate::output::{self, OutputFormat};

/// Per-session lookup settings.
#[derive(Debug, Default)]
struct Session {
    sources: Option<SourceFilter>,
    limit: Option<usize>,
}

/// Run the interactive REPL.
pub async fn run(lexicon: Arc<Lexicon>, format: OutputFormat) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut session = Session::default();

    println!("Kosha REPL (type 'help' for commands, 'quit' to exit)");

    loop {
        let line = match rl.readline("kosha> ") {
            Ok(line) => line,
            Err(
                rustyline::error::ReadlineError::Interrupted | rustyline::error::ReadlineError::Eof,
            ) => {
                break;
            }
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        let result = match command {
            "help" => {
                print_help();
                Ok(())
            }
            "quit" | "exit" => break,
            "lookup" | "l" => {
                if rest.is_empty() {
                    eprintln!("Usage: lookup <query>");
                    continue;
                }
                handle_lookup(&lexicon, &session, rest, format)
            }
            "use" => {
                session.sources = SourceFilter::parse(rest);
                match &session.sources {
                    Some(filter) => println!("Searching sources: {}", filter.names().join(",")),
                    None => println!("Searching all sources."),
                }
                Ok(())
            }
            "limit" => handle_limit(&mut session, rest),
            "status" => output::print_stats(&lexicon.stats(), format),
            "sources" => output::print_sources(&lexicon.sources(), format),
            "reload" => match lexicon.reload_async().await {
                Ok(summary) => output::print_reload(&summary, format),
                Err(e) => Err(e).context("Reload failed"),
            },
            _ => {
                eprintln!(
                    "Unknown command: '{}'. Type 'help' for available commands.",
                    command
                );
                Ok(())
            }
        };

        if let Err(e) = result {
            eprintln!("Error: {e:#}");
        }
    }

    println!("Goodbye.");
    Ok(())
}

fn print_help() {
    println!(
        "\
Available commands:
  lookup <query>               Look up headwords containing <query> (alias: l)
  use [src1,src2,...]          Restrict lookups to sources (no argument: all)
  limit [n]                    Set the result limit (no argument: default)
  status                       Show source and entry counts
  sources                      List loaded sources
  reload                       Reload the lexicon directory
  help                         Show this help
  quit                         Exit the REPL"
    );
}

fn handle_lookup(
    lexicon: &Lexicon,
    session: &Session,
    query: &str,
    format: OutputFormat,
) -> Result<()> {
    let request = LookupRequest {
        query: query.to_string(),
        sources: session.sources.clone(),
        limit: session.limit,
    };
    let hits = lexicon.lookup(&request);
    output::print_hits(&hits, format)
}

fn handle_limit(session: &mut Session, arg: &str) -> Result<()> {
    if arg.is_empty() {
        session.limit = None;
        println!("Using the configured default limit.");
        return Ok(());
    }

    let limit: usize = arg
        .parse()
        .with_context(|| format!("Invalid limit '{arg}'"))?;
    if limit == 0 {
        anyhow::bail!("Limit must be a positive integer");
    }
    session.limit = Some(limit);
    println!("Limit set to {limit}.");
    Ok(())
}
