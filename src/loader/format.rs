//! Lexicon file formats recognized by the loader.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::data::Record;

/// Why a data file contributed nothing to the index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("unreadable file: {0}")]
    Unreadable(String),

    #[error("malformed JSON{}: {message}", .line.map(|l| format!(" on line {l}")).unwrap_or_default())]
    Syntax {
        /// 1-based line number for line-oriented formats.
        line: Option<usize>,
        message: String,
    },

    #[error("top-level JSON value is not an array")]
    NotAnArray,

    #[error("directory walk failed: {0}")]
    Walk(String),
}

/// Supported on-disk formats, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// A single JSON array of entries.
    Json,
    /// One JSON entry per non-blank line.
    Ndjson,
    /// `head<TAB>gloss` per line, `#` comments.
    Tsv,
}

impl FileFormat {
    /// Classify a path by its extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(FileFormat::Json),
            "ndjson" => Some(FileFormat::Ndjson),
            "tsv" => Some(FileFormat::Tsv),
            _ => None,
        }
    }

    /// Parse decoded file contents into records.
    ///
    /// Parsing is all-or-nothing per file: one bad line in an NDJSON file
    /// rejects the whole file.
    pub fn parse(self, text: &str) -> Result<Vec<Record>, SkipReason> {
        match self {
            FileFormat::Json => parse_json(text),
            FileFormat::Ndjson => parse_ndjson(text),
            FileFormat::Tsv => Ok(parse_tsv(text)),
        }
    }
}

fn parse_json(text: &str) -> Result<Vec<Record>, SkipReason> {
    let value: Value = serde_json::from_str(text).map_err(|e| SkipReason::Syntax {
        line: None,
        message: e.to_string(),
    })?;

    match value {
        Value::Array(items) => Ok(items.into_iter().map(Record::from_value).collect()),
        _ => Err(SkipReason::NotAnArray),
    }
}

fn parse_ndjson(text: &str) -> Result<Vec<Record>, SkipReason> {
    let mut records = Vec::new();
    for (i, line) in split_lines(text).enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line).map_err(|e| SkipReason::Syntax {
            line: Some(i + 1),
            message: e.to_string(),
        })?;
        records.push(Record::from_value(value));
    }
    Ok(records)
}

fn parse_tsv(text: &str) -> Vec<Record> {
    split_lines(text)
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let mut fields = line.split('\t');
            match (fields.next(), fields.next()) {
                (Some(head), Some(gloss)) => Some(Record::new(head, gloss)),
                _ => None,
            }
        })
        .collect()
}

/// Split on `\n`, `\r\n` and a lone `\r`. A trailing break yields no empty line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let line = match rest.find(['\n', '\r']) {
            Some(pos) => {
                let line = &rest[..pos];
                let width = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + width..];
                line
            }
            None => std::mem::take(&mut rest),
        };
        Some(line)
    })
}
