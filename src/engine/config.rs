use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{KoshaError, Result};

/// Default number of hits returned by a lookup.
pub const DEFAULT_LIMIT: usize = 25;

/// Configuration for a [`Lexicon`](crate::Lexicon).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Root of the lexicon directory tree.
    pub data_dir: PathBuf,
    /// Limit used when a request does not specify one.
    pub default_limit: usize,
    /// Optional cap on requested limits. `None` honors any requested limit.
    pub max_limit: Option<usize>,
}

impl LexiconConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn builder() -> LexiconConfigBuilder {
        LexiconConfigBuilder::default()
    }

    /// Check the limits for consistency.
    pub fn validate(&self) -> Result<()> {
        if self.default_limit == 0 {
            return Err(KoshaError::invalid_config(
                "default_limit must be greater than zero",
            ));
        }
        match self.max_limit {
            Some(0) => Err(KoshaError::invalid_config(
                "max_limit must be greater than zero",
            )),
            Some(max) if self.default_limit > max => Err(KoshaError::invalid_config(format!(
                "default_limit ({}) exceeds max_limit ({max})",
                self.default_limit
            ))),
            _ => Ok(()),
        }
    }

    /// Resolve a requested limit against the configured default and bound.
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        let limit = requested.unwrap_or(self.default_limit);
        match self.max_limit {
            Some(max) => limit.min(max),
            None => limit,
        }
    }
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data/kosha"),
            default_limit: DEFAULT_LIMIT,
            max_limit: None,
        }
    }
}

#[derive(Default)]
pub struct LexiconConfigBuilder {
    data_dir: Option<PathBuf>,
    default_limit: Option<usize>,
    max_limit: Option<usize>,
}

impl LexiconConfigBuilder {
    pub fn data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    pub fn default_limit(mut self, limit: usize) -> Self {
        self.default_limit = Some(limit);
        self
    }

    pub fn max_limit(mut self, limit: usize) -> Self {
        self.max_limit = Some(limit);
        self
    }

    pub fn build(self) -> LexiconConfig {
        let defaults = LexiconConfig::default();
        LexiconConfig {
            data_dir: self.data_dir.unwrap_or(defaults.data_dir),
            default_limit: self.default_limit.unwrap_or(defaults.default_limit),
            max_limit: self.max_limit.or(defaults.max_limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LexiconConfig::default();
        assert_eq!(config.default_limit, 25);
        assert_eq!(config.max_limit, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effective_limit_is_uncapped_by_default() {
        let config = LexiconConfig::default();
        assert_eq!(config.effective_limit(None), 25);
        assert_eq!(config.effective_limit(Some(1200)), 1200);
        assert_eq!(config.effective_limit(Some(usize::MAX)), usize::MAX);
    }

    #[test]
    fn test_effective_limit_with_cap() {
        let config = LexiconConfig::builder().max_limit(50).build();
        assert_eq!(config.effective_limit(None), 25);
        assert_eq!(config.effective_limit(Some(3)), 3);
        assert_eq!(config.effective_limit(Some(500)), 50);
        assert_eq!(config.effective_limit(Some(0)), 0);
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        let config = LexiconConfig::builder().default_limit(0).build();
        assert!(matches!(
            config.validate(),
            Err(KoshaError::InvalidConfig(_))
        ));

        let config = LexiconConfig::builder()
            .default_limit(100)
            .max_limit(10)
            .build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LexiconConfig =
            serde_json::from_str(r#"{"data_dir": "/srv/kosha"}"#).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/kosha"));
        assert_eq!(config.default_limit, DEFAULT_LIMIT);
        assert_eq!(config.max_limit, None);

        let config: LexiconConfig = serde_json::from_str(r#"{"max_limit": 200}"#).unwrap();
        assert_eq!(config.max_limit, Some(200));
    }
}
