//! Configuration for the pddl tools
//!
//! The vocabulary, the editor's language identifier and indent unit, and the
//! formatter's indent string all come from here. `defaults/pddl.default.toml`
//! is compiled in; [`Loader`] layers project files and command-line
//! assignments over it.

use crate::pddl::lexing::{Vocabulary, VocabularyError};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_TOML: &str = include_str!("../../defaults/pddl.default.toml");

/// Top-level configuration consumed by pddl applications.
#[derive(Debug, Clone, Deserialize)]
pub struct PddlConfig {
    pub language: LanguageConfig,
    pub editor: EditorConfig,
    pub formatting: FormattingConfig,
}

/// The identifier sets the tokenizer classifies against.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageConfig {
    pub keywords: Vec<String>,
    pub operators: Vec<String>,
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    /// Language identifier the mode is registered under.
    pub mime: String,
    /// Columns per indent unit.
    pub indent_unit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormattingConfig {
    pub indent_string: String,
}

impl LanguageConfig {
    /// Build the tokenizer vocabulary, rejecting entries that are not words.
    pub fn vocabulary(&self) -> Result<Vocabulary, ConfigError> {
        Vocabulary::new(
            self.keywords.iter().cloned(),
            self.operators.iter().cloned(),
            self.types.iter().cloned(),
        )
        .map_err(|err: VocabularyError| ConfigError::Message(format!("language: {err}")))
    }
}

/// Configuration layers, lowest priority first: the embedded defaults, then
/// files in the order they were added, then single-key overrides.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
    files: Vec<PathBuf>,
}

impl Loader {
    pub fn new() -> Self {
        Loader {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
            files: Vec::new(),
        }
    }

    /// Layer a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Layer a TOML file, skipped when it does not exist.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self.files.push(path.to_path_buf());
        self
    }

    /// Override one dotted key, e.g. `editor.indent_unit`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Apply a `key=value` assignment as typed on the command line. The value
    /// stays a string; numeric fields are converted when the config is built.
    pub fn with_assignment(self, assignment: &str) -> Result<Self, ConfigError> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            ConfigError::Message(format!("expected key=value, got '{assignment}'"))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::Message(format!(
                "missing key in '{assignment}'"
            )));
        }
        self.set_override(key, value.trim())
    }

    /// Merge the layers and deserialize them into a [PddlConfig].
    pub fn build(self) -> Result<PddlConfig, ConfigError> {
        let config: PddlConfig = self.builder.build()?.try_deserialize()?;
        if config.editor.indent_unit == 0 {
            return Err(ConfigError::Message(
                "editor.indent_unit must be at least 1".to_string(),
            ));
        }
        debug!(files = ?self.files, "configuration layers merged");
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
