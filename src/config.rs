//! Generator configuration
//!
//! Everything the generator needs is passed explicitly; nothing is read from
//! process environment.
//!
//! ```rust
//! use trueno_ensemble::config::GeneratorConfig;
//! use trueno_ensemble::strategy::StrategyKind;
//!
//! let config = GeneratorConfig::from_json_str(
//!     r#"{"overwrite": true, "strategy": "random", "strategy_options": {"n_models": 4, "seed": 7}}"#,
//! )?;
//! assert!(config.overwrite);
//! assert_eq!(config.strategy, StrategyKind::Random);
//! assert_eq!(config.tag, ";");
//! # Ok::<(), trueno_ensemble::Error>(())
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::IoContext;
use crate::strategy::{StrategyKind, StrategyOptions};
use crate::writer::DEFAULT_TAG;
use crate::Result;

/// Serializable generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Replace existing entity directories instead of failing
    pub overwrite: bool,
    /// Built-in permutation strategy
    pub strategy: StrategyKind,
    /// Tag delimiting parameter names in tagged files
    pub tag: String,
    /// Full regex overriding `tag`
    pub regex: Option<String>,
    /// Strategy-specific options passed to `generate`
    pub strategy_options: StrategyOptions,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            overwrite: false,
            strategy: StrategyKind::default(),
            tag: DEFAULT_TAG.to_string(),
            regex: None,
            strategy_options: StrategyOptions::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parse a configuration from JSON; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) on malformed JSON or an
    /// unknown strategy name.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read, or see
    /// [`from_json_str`](Self::from_json_str).
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).io_context("read generator config", path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert!(!config.overwrite);
        assert_eq!(config.strategy, StrategyKind::AllPermutations);
        assert!(config.regex.is_none());
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let err = GeneratorConfig::from_json_str(r#"{"strategy": "grid"}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generator.json");
        fs::write(&path, r#"{"tag": "@", "strategy": "step"}"#).unwrap();

        let config = GeneratorConfig::from_json_file(&path).unwrap();
        assert_eq!(config.tag, "@");
        assert_eq!(config.strategy, StrategyKind::Step);

        let err = GeneratorConfig::from_json_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
