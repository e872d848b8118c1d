use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kosha::{Lexicon, LexiconConfig};

/// Build the configuration from an optional TOML file and CLI overrides.
pub fn load_config(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<LexiconConfig> {
    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&content).context("Failed to parse config TOML")?
        }
        None => LexiconConfig::default(),
    };

    if let Some(data_dir) = data_dir {
        config.data_dir = data_dir;
    }
    config.validate().context("Invalid configuration")?;

    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

/// Load the lexicon described by `config`.
pub fn open_lexicon(config: LexiconConfig) -> Result<Lexicon> {
    let lexicon = Lexicon::open(config).context("Failed to open lexicon")?;

    let snapshot = lexicon.snapshot();
    if !snapshot.report.root_found {
        tracing::warn!(
            "No lexicon data at {}; lookups will return nothing",
            snapshot.report.root.display()
        );
    }
    for skipped in &snapshot.report.skipped {
        tracing::warn!("Skipped {}: {}", skipped.path.display(), skipped.reason);
    }

    Ok(lexicon)
}
