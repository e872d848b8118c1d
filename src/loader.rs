//! Builds a [`LexiconIndex`] from a directory tree of lexicon files.
//!
//! Every file under the root is classified by extension (`.json`, `.ndjson`,
//! `.tsv`, case-insensitive) and its entries are appended to the source named
//! after the file's immediate parent directory. Files with other extensions
//! are ignored.
//!
//! Loading is best-effort: a missing root yields an empty index, and a file
//! that cannot be read or parsed is recorded in the [`LoadReport`] and
//! skipped without aborting the load.

pub mod format;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::data::Record;
use crate::index::LexiconIndex;

pub use self::format::{FileFormat, SkipReason};

const UTF8_BOM: char = '\u{feff}';

/// A data file that contributed nothing to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Diagnostics collected during a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// The directory that was scanned.
    pub root: PathBuf,
    /// Whether `root` existed as a directory.
    pub root_found: bool,
    /// Data files parsed successfully.
    pub files_loaded: usize,
    /// Files skipped because of their extension.
    pub files_ignored: usize,
    /// Data files (or walk entries) that failed.
    pub skipped: Vec<SkippedFile>,
}

/// The result of a load: the index plus its diagnostics.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub index: LexiconIndex,
    pub report: LoadReport,
}

/// Load every lexicon file under `root`.
///
/// Files are visited in lexicographic path order, so repeated loads of an
/// unchanged tree produce identical indexes.
pub fn load(root: impl AsRef<Path>) -> LoadOutcome {
    let root = root.as_ref();
    let mut index = LexiconIndex::new();
    let mut report = LoadReport {
        root: root.to_path_buf(),
        ..LoadReport::default()
    };

    if !root.is_dir() {
        warn!("Lexicon directory {} does not exist", root.display());
        return LoadOutcome { index, report };
    }
    report.root_found = true;

    let walker = WalkDir::new(root).follow_links(true).sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                warn!("Skipping {}: {}", path.display(), err);
                report.skipped.push(SkippedFile {
                    path,
                    reason: SkipReason::Walk(err.to_string()),
                });
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(format) = FileFormat::from_path(path) else {
            report.files_ignored += 1;
            continue;
        };

        let source = source_name(path);
        index.ensure_source(&source);

        match read_records(path, format) {
            Ok(records) => {
                debug!(
                    "Loaded {} records from {} into '{}'",
                    records.len(),
                    path.display(),
                    source
                );
                index.extend(&source, records);
                report.files_loaded += 1;
            }
            Err(reason) => {
                warn!("Skipping {}: {}", path.display(), reason);
                report.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    reason,
                });
            }
        }
    }

    info!(
        "Loaded {} sources ({} entries) from {}; {} files skipped",
        index.source_count(),
        index.entry_count(),
        root.display(),
        report.skipped.len()
    );

    LoadOutcome { index, report }
}

/// Name of the directory that directly contains `path`.
pub fn source_name(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_records(path: &Path, format: FileFormat) -> Result<Vec<Record>, SkipReason> {
    let bytes = fs::read(path).map_err(|e| SkipReason::Unreadable(e.to_string()))?;
    let text = String::from_utf8_lossy(&bytes);
    format.parse(text.strip_prefix(UTF8_BOM).unwrap_or(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_source_name_is_parent_dir() {
        assert_eq!(source_name(Path::new("/data/kosha/mw/a/words.json")), "a");
        assert_eq!(source_name(Path::new("/data/kosha/mw/words.json")), "mw");
        assert_eq!(source_name(Path::new("words.json")), "");
    }

    #[test]
    fn test_missing_root_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let outcome = load(temp_dir.path().join("absent"));

        assert!(outcome.index.is_empty());
        assert!(!outcome.report.root_found);
        assert!(outcome.report.skipped.is_empty());
    }

    #[test]
    fn test_ignores_unknown_extensions() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "mw/README.md", b"# notes");
        write(temp_dir.path(), "mw/words.csv", b"agni,fire");

        let outcome = load(temp_dir.path());
        assert!(outcome.index.is_empty());
        assert_eq!(outcome.report.files_ignored, 2);
    }

    #[test]
    fn test_lossy_decoding() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "mw/words.tsv", b"ag\xffni\tfire\n");

        let outcome = load(temp_dir.path());
        let records = outcome.index.source("mw").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].record().head, "ag\u{fffd}ni");
    }

    #[test]
    fn test_bom_is_stripped() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "mw/words.json",
            "\u{feff}[{\"head\":\"agni\"}]".as_bytes(),
        );

        let outcome = load(temp_dir.path());
        assert_eq!(outcome.index.entry_count(), 1);
        assert!(outcome.report.skipped.is_empty());
    }

    #[test]
    fn test_bad_file_leaves_empty_source() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "broken/words.json", b"[{");

        let outcome = load(temp_dir.path());
        assert!(outcome.index.contains_source("broken"));
        assert_eq!(outcome.index.entry_count(), 0);
        assert_eq!(outcome.report.skipped.len(), 1);
        assert_eq!(outcome.report.files_loaded, 0);
    }
}
