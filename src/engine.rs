pub mod config;
pub mod query;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;

use crate::error::{KoshaError, Result};
use crate::index::LexiconIndex;
use crate::loader::{self, LoadOutcome, LoadReport};

use self::config::LexiconConfig;
use self::query::{LookupHit, LookupRequest};

/// An immutable, published version of the index.
#[derive(Debug)]
pub struct Snapshot {
    /// Incremented on every successful load, starting at 1.
    pub version: u64,
    pub loaded_at: DateTime<Utc>,
    pub index: LexiconIndex,
    pub report: LoadReport,
}

impl Snapshot {
    fn new(version: u64, outcome: LoadOutcome) -> Self {
        Snapshot {
            version,
            loaded_at: Utc::now(),
            index: outcome.index,
            report: outcome.report,
        }
    }
}

/// Counts over the current snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub version: u64,
    pub sources: usize,
    pub entries: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Result of a successful reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReloadSummary {
    pub version: u64,
    pub sources: usize,
    pub entries: usize,
    /// Data files that were skipped during the reload.
    pub skipped: usize,
    /// `false` when the data directory did not exist; the index is then empty.
    pub root_found: bool,
}

/// Lexicon lookup service over a directory of data sources.
///
/// Readers grab the current [`Snapshot`] under a short read lock and then
/// work on it without holding any lock. A reload builds a complete new
/// snapshot first and publishes it with a single pointer swap, so a lookup
/// never observes a partially loaded index.
pub struct Lexicon {
    config: LexiconConfig,
    current: RwLock<Arc<Snapshot>>,
    reload_lock: Mutex<()>,
}

impl std::fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("Lexicon")
            .field("data_dir", &self.config.data_dir)
            .field("version", &snapshot.version)
            .field("sources", &snapshot.index.source_count())
            .finish()
    }
}

impl Lexicon {
    /// Create a lexicon and perform the initial load.
    ///
    /// A missing data directory is not an error here: the lexicon starts
    /// empty and can be reloaded later.
    pub fn open(config: LexiconConfig) -> Result<Self> {
        config.validate()?;
        let outcome = loader::load(&config.data_dir);
        Ok(Self::from_outcome(config, outcome))
    }

    /// Create a lexicon around an already built index.
    pub fn with_index(config: LexiconConfig, index: LexiconIndex) -> Result<Self> {
        config.validate()?;
        let report = LoadReport {
            root: config.data_dir.clone(),
            ..LoadReport::default()
        };
        Ok(Self::from_outcome(config, LoadOutcome { index, report }))
    }

    fn from_outcome(config: LexiconConfig, outcome: LoadOutcome) -> Self {
        Lexicon {
            config,
            current: RwLock::new(Arc::new(Snapshot::new(1, outcome))),
            reload_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &LexiconConfig {
        &self.config
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().clone()
    }

    /// Find records whose normalized headword contains the normalized query.
    ///
    /// Never fails: an empty query, unknown sources or an empty index all
    /// yield an empty list.
    pub fn lookup(&self, request: &LookupRequest) -> Vec<LookupHit> {
        let snapshot = self.snapshot();
        let limit = self.config.effective_limit(request.limit);
        let hits = query::execute(
            &snapshot.index,
            &request.query,
            request.sources.as_ref(),
            limit,
        );
        debug!(
            "lookup {:?} -> {} hits (limit {}, snapshot v{})",
            request.query,
            hits.len(),
            limit,
            snapshot.version
        );
        hits
    }

    pub fn stats(&self) -> IndexStats {
        let snapshot = self.snapshot();
        IndexStats {
            version: snapshot.version,
            sources: snapshot.index.source_count(),
            entries: snapshot.index.entry_count(),
            loaded_at: snapshot.loaded_at,
        }
    }

    /// Source names in sorted order.
    pub fn sources(&self) -> Vec<String> {
        self.snapshot().index.source_names()
    }

    /// Rebuild the index from the configured directory and publish it.
    ///
    /// A missing data directory publishes an empty index, the same as
    /// [`open`](Self::open) does.
    pub fn reload(&self) -> Result<ReloadSummary> {
        let _guard = self.reload_lock.lock();
        let outcome = loader::load(&self.config.data_dir);
        let version = self.current.read().version + 1;
        let snapshot = Arc::new(Snapshot::new(version, outcome));
        let summary = ReloadSummary {
            version,
            sources: snapshot.index.source_count(),
            entries: snapshot.index.entry_count(),
            skipped: snapshot.report.skipped.len(),
            root_found: snapshot.report.root_found,
        };

        *self.current.write() = snapshot;
        info!(
            "Published snapshot v{}: {} sources, {} entries",
            summary.version, summary.sources, summary.entries
        );
        Ok(summary)
    }

    /// Run [`reload`](Self::reload) on the blocking thread pool.
    ///
    /// Lookups keep being served from the previous snapshot until the new
    /// one is published.
    pub async fn reload_async(self: &Arc<Self>) -> Result<ReloadSummary> {
        let lexicon = Arc::clone(self);
        tokio::task::spawn_blocking(move || lexicon.reload())
            .await
            .map_err(|e| KoshaError::internal(format!("reload task failed: {e}")))?
    }
}
