//! # lectio configuration
//!
//! Describes one normalization run: which source documents to read, what to
//! call each translation, and where the canonical output goes.
//!
//! ```toml
//! output_dir = "data"
//! pretty = true
//! strict = false
//!
//! [[translation]]
//! code = "KJV"
//! source = "raw/kjv.json"
//!
//! [[translation]]
//! code = "ASV"
//! source = "raw/asv_resultset.json"
//! output = "asv.json"
//! ```
//!
//! Relative paths are resolved against the directory holding the config file.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config '{path}': {source}")]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config parsed but describes an unusable run
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// One translation to normalize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationSource {
    /// Short translation code, e.g. `KJV`
    pub code: String,
    /// Source document path
    pub source: PathBuf,
    /// Output file name under `output_dir` (defaults to `<code>.json`, lower-cased)
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl TranslationSource {
    /// Create a source with the default output name.
    pub fn new(code: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            code: code.into(),
            source: source.into(),
            output: None,
        }
    }

    /// Output file name relative to the output directory.
    pub fn output_file(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.json", self.code.to_lowercase())))
    }
}

/// A complete normalization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Directory canonical documents are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Pretty-print output with two-space indentation
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Treat any warning or violation as a failed run
    #[serde(default)]
    pub strict: bool,

    /// Translations, processed in the listed order
    #[serde(default, rename = "translation")]
    pub translations: Vec<TranslationSource>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_pretty() -> bool {
    true
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            pretty: default_pretty(),
            strict: false,
            translations: Vec::new(),
        }
    }
}

impl NormalizerConfig {
    /// Parse TOML text without touching the file system.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file and resolve its relative paths.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        debug!(
            "Loaded config '{}' with {} translations",
            path.display(),
            config.translations.len()
        );
        Ok(config)
    }

    /// Config for a single ad hoc translation.
    pub fn single(source: TranslationSource, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            translations: vec![source],
            ..Self::default()
        }
    }

    /// Make relative `output_dir` and `source` paths relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.output_dir.is_relative() {
            self.output_dir = base.join(&self.output_dir);
        }
        for translation in &mut self.translations {
            if translation.source.is_relative() {
                translation.source = base.join(&translation.source);
            }
        }
    }

    /// Reject configs that cannot describe a sensible run.
    pub fn validate(&self) -> Result<()> {
        if self.translations.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one [[translation]] is required".to_string(),
            ));
        }

        let mut codes = HashSet::new();
        for translation in &self.translations {
            let code = translation.code.trim();
            if code.is_empty() {
                return Err(ConfigError::Invalid(
                    "translation code must not be empty".to_string(),
                ));
            }
            if !codes.insert(code.to_uppercase()) {
                return Err(ConfigError::Invalid(format!(
                    "translation '{code}' is listed more than once"
                )));
            }
        }
        Ok(())
    }
}
