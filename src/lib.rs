//! # Kosha
//!
//! An in-memory lexicon lookup library for dictionary-like data sources.
//!
//! ## Features
//!
//! - Loads `.json`, `.ndjson` and `.tsv` lexicons from a directory tree
//! - Groups entries by source (the directory that holds the data file)
//! - Unicode-normalized (NFC) exact and substring headword matching
//! - Immutable index snapshots swapped atomically on reload
// Core modules
pub mod analysis;
mod data;
mod engine;
mod error;
pub mod index;
pub mod loader;

// Re-exports for the public API
pub use analysis::normalize::{normalize, normalize_opt};
pub use data::Record;
pub use engine::config::{LexiconConfig, LexiconConfigBuilder};
pub use engine::query::{LookupHit, LookupRequest, LookupRequestBuilder, SourceFilter};
pub use engine::{IndexStats, Lexicon, ReloadSummary, Snapshot};
pub use error::{KoshaError, Result};
pub use index::LexiconIndex;
pub use loader::{LoadOutcome, LoadReport, SkipReason, SkippedFile, load};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
