//! Lookup requests and their execution against an index snapshot.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::analysis::normalize::normalize;
use crate::index::{IndexedRecord, LexiconIndex};

/// An ordered, duplicate-free list of source names to restrict a lookup to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFilter {
    names: Vec<String>,
}

impl SourceFilter {
    /// Build a filter from names, dropping empty names and repeats.
    ///
    /// Names are taken literally: `" apte"` only selects a source called
    /// `" apte"`. The first occurrence of each name fixes its position.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = SourceFilter::default();
        for name in names {
            let name = name.as_ref();
            if !name.is_empty() && !filter.names.iter().any(|n| n == name) {
                filter.names.push(name.to_string());
            }
        }
        filter
    }

    /// Parse a comma-separated list such as `"mw,apte"`.
    ///
    /// An empty string means "no filter" and returns `None`. A list that
    /// only contains separators returns an empty filter, which selects
    /// nothing.
    pub fn parse(list: &str) -> Option<Self> {
        if list.is_empty() {
            None
        } else {
            Some(Self::new(list.split(',')))
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A headword lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupRequest {
    /// Raw query text; normalized before matching.
    pub query: String,
    /// Restrict the lookup to these sources, in this order.
    pub sources: Option<SourceFilter>,
    /// Maximum number of hits. Falls back to the configured default.
    pub limit: Option<usize>,
}

impl LookupRequest {
    pub fn new(query: impl Into<String>) -> Self {
        LookupRequest {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn builder(query: impl Into<String>) -> LookupRequestBuilder {
        LookupRequestBuilder::new(query)
    }
}

pub struct LookupRequestBuilder {
    request: LookupRequest,
}

impl LookupRequestBuilder {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            request: LookupRequest::new(query),
        }
    }

    pub fn sources(mut self, filter: SourceFilter) -> Self {
        self.request.sources = Some(filter);
        self
    }

    /// Set the source filter from a comma-separated list.
    pub fn source_list(mut self, list: &str) -> Self {
        self.request.sources = SourceFilter::parse(list);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.request.limit = Some(limit);
        self
    }

    pub fn build(self) -> LookupRequest {
        self.request
    }
}

/// A matching record, tagged with its source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupHit {
    pub source: String,
    /// The normalized headword.
    pub head: String,
    pub gloss: String,
    pub meta: Map<String, Value>,
}

impl LookupHit {
    fn new(source: &str, entry: &IndexedRecord) -> Self {
        let record = entry.record();
        LookupHit {
            source: source.to_string(),
            head: entry.key().to_string(),
            gloss: record.gloss.clone(),
            meta: record.meta.clone(),
        }
    }
}

/// Scan `index` for records whose normalized head contains the normalized
/// query.
///
/// Hits come out in source order (filter order, or alphabetical without a
/// filter), then in stored record order, and the scan stops as soon as
/// `limit` hits are collected.
pub(crate) fn execute(
    index: &LexiconIndex,
    query: &str,
    filter: Option<&SourceFilter>,
    limit: usize,
) -> Vec<LookupHit> {
    let needle = normalize(query);
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let selected: Vec<(&str, &[IndexedRecord])> = match filter {
        Some(filter) => filter
            .names()
            .iter()
            .filter_map(|name| index.source(name).map(|records| (name.as_str(), records)))
            .collect(),
        None => index.iter().collect(),
    };

    let mut hits = Vec::new();
    for (source, records) in selected {
        for entry in records {
            let key = entry.key();
            if !key.is_empty() && key.contains(needle.as_str()) {
                hits.push(LookupHit::new(source, entry));
                if hits.len() >= limit {
                    return hits;
                }
            }
        }
    }
    hits
}
