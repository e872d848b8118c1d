//! In-memory lexicon index grouped by source.
//!
//! A [`LexiconIndex`] is built once by the loader and never mutated after it
//! is published; a reload produces a new index instead.

use std::collections::BTreeMap;

use crate::analysis::normalize::normalize;
use crate::data::Record;

/// A record together with its normalized headword.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedRecord {
    key: String,
    record: Record,
}

impl IndexedRecord {
    pub fn new(record: Record) -> Self {
        IndexedRecord {
            key: normalize(&record.head),
            record,
        }
    }

    /// The NFC-normalized, trimmed headword used for matching.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn record(&self) -> &Record {
        &self.record
    }
}

/// Mapping from source name to its records in load order.
///
/// Sources iterate alphabetically by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexiconIndex {
    sources: BTreeMap<String, Vec<IndexedRecord>>,
}

impl LexiconIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source without adding records to it.
    pub fn ensure_source(&mut self, source: &str) {
        if !self.sources.contains_key(source) {
            self.sources.insert(source.to_string(), Vec::new());
        }
    }

    /// Append records to a source, creating it if needed.
    pub fn extend<I>(&mut self, source: &str, records: I)
    where
        I: IntoIterator<Item = Record>,
    {
        self.ensure_source(source);
        if let Some(bucket) = self.sources.get_mut(source) {
            bucket.extend(records.into_iter().map(IndexedRecord::new));
        }
    }

    pub fn push(&mut self, source: &str, record: Record) {
        self.extend(source, std::iter::once(record));
    }

    /// Records of a single source, or `None` if the source is unknown.
    pub fn source(&self, name: &str) -> Option<&[IndexedRecord]> {
        self.sources.get(name).map(Vec::as_slice)
    }

    pub fn contains_source(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    /// Source names in sorted order.
    pub fn source_names(&self) -> Vec<String> {
        self.sources.keys().cloned().collect()
    }

    /// Iterate `(source, records)` pairs in sorted source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[IndexedRecord])> {
        self.sources
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Total number of records across all sources.
    pub fn entry_count(&self) -> usize {
        self.sources.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
