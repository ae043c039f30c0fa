//! Codec options.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options for parsing and generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Use a w/y Ca shortcut when the record allows one
    pub prefer_shortcuts: bool,
    /// Reject generated words with an illegal consonant cluster
    pub validate_phonotactics: bool,
    /// Reject an explicit accent on a monosyllable
    pub strict_stress: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            prefer_shortcuts: true,
            validate_phonotactics: false,
            strict_stress: false,
        }
    }
}

impl CodecConfig {
    /// Read a config from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        log::debug!("loaded codec config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
