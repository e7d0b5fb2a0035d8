//! Language modes for editor hosts
//!
//! A mode is what a host selects per document: it hands out the initial
//! tokenizer state, classifies lexemes, suggests indentation and computes the
//! unclosed-line decorations. Modes are registered under a name and a
//! MIME-like language identifier so hosts can look them up either way.

use crate::pddl::lexing::{self, Lexeme, TokenizerState, Vocabulary};
use crate::pddl::settings::PddlConfig;
use crate::pddl::structure::{self, LineDecoration};
use config::ConfigError;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Error that can occur when looking up modes
#[derive(Debug, Clone, PartialEq)]
pub enum ModeError {
    /// No mode registered under this name
    ModeNotFound(String),
    /// No mode registered for this language identifier
    MimeNotFound(String),
}

impl fmt::Display for ModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeError::ModeNotFound(name) => write!(f, "Mode '{name}' not found"),
            ModeError::MimeNotFound(mime) => write!(f, "No mode registered for '{mime}'"),
        }
    }
}

impl std::error::Error for ModeError {}

/// Static description of a mode, as the host sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeSpec {
    pub name: String,
    pub mime: String,
    /// Typing one of these re-indents the current line.
    pub electric_chars: String,
    pub line_comment: String,
    pub fold: String,
}

impl ModeSpec {
    pub fn pddl(mime: impl Into<String>) -> Self {
        ModeSpec {
            name: "pddl".to_string(),
            mime: mime.into(),
            electric_chars: ")".to_string(),
            line_comment: ";".to_string(),
            fold: "brace".to_string(),
        }
    }
}

/// Contract between a language mode and its host editor.
pub trait Mode: Send + Sync {
    fn spec(&self) -> &ModeSpec;

    /// Width of one indent unit, in columns.
    fn indent_unit(&self) -> usize;

    /// State for a freshly attached document.
    fn start_state(&self) -> TokenizerState {
        TokenizerState::new()
    }

    /// Classify the next lexeme of `line` at or after byte `pos`.
    fn token(&self, line: &str, pos: usize, state: &mut TokenizerState) -> Option<Lexeme>;

    /// Suggested indentation in indent units.
    fn indent(&self, state: &TokenizerState, text_after: &str) -> usize;

    /// Decorations for every line of the buffer, recomputed from scratch.
    fn decorate(&self, lines: &[&str]) -> Vec<LineDecoration>;
}

/// The PDDL mode.
#[derive(Debug, Clone)]
pub struct PddlMode {
    spec: ModeSpec,
    vocabulary: Vocabulary,
    indent_unit: usize,
}

impl PddlMode {
    pub fn new(spec: ModeSpec, vocabulary: Vocabulary, indent_unit: usize) -> Self {
        PddlMode {
            spec,
            vocabulary,
            indent_unit,
        }
    }

    pub fn from_config(config: &PddlConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            ModeSpec::pddl(config.editor.mime.clone()),
            config.language.vocabulary()?,
            config.editor.indent_unit,
        ))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

impl Default for PddlMode {
    fn default() -> Self {
        Self::new(ModeSpec::pddl("text/x-pddl"), Vocabulary::pddl(), 2)
    }
}

impl Mode for PddlMode {
    fn spec(&self) -> &ModeSpec {
        &self.spec
    }

    fn indent_unit(&self) -> usize {
        self.indent_unit
    }

    fn token(&self, line: &str, pos: usize, state: &mut TokenizerState) -> Option<Lexeme> {
        lexing::next_token(line, pos, state, &self.vocabulary)
    }

    fn indent(&self, state: &TokenizerState, text_after: &str) -> usize {
        lexing::indent(state, text_after)
    }

    fn decorate(&self, lines: &[&str]) -> Vec<LineDecoration> {
        structure::decorations(&structure::recompute(lines))
    }
}

/// Registry of language modes
///
/// Modes are keyed by name; MIME lookups scan the registered specs.
pub struct ModeRegistry {
    modes: HashMap<String, Box<dyn Mode>>,
}

impl ModeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        ModeRegistry {
            modes: HashMap::new(),
        }
    }

    /// Register a mode
    ///
    /// If a mode with the same name already exists, it will be replaced.
    pub fn register<M: Mode + 'static>(&mut self, mode: M) {
        self.modes.insert(mode.spec().name.clone(), Box::new(mode));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Mode, ModeError> {
        self.modes
            .get(name)
            .map(|mode| mode.as_ref())
            .ok_or_else(|| ModeError::ModeNotFound(name.to_string()))
    }

    pub fn for_mime(&self, mime: &str) -> Result<&dyn Mode, ModeError> {
        self.modes
            .values()
            .find(|mode| mode.spec().mime == mime)
            .map(|mode| mode.as_ref())
            .ok_or_else(|| ModeError::MimeNotFound(mime.to_string()))
    }

    /// Registered mode specs, sorted by name
    pub fn specs(&self) -> Vec<&ModeSpec> {
        let mut specs: Vec<_> = self.modes.values().map(|mode| mode.spec()).collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    /// Create a registry with the default PDDL mode
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(PddlMode::default());
        registry
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pddl::lexing::Category;

    #[test]
    fn test_registry_creation() {
        let registry = ModeRegistry::new();
        assert!(registry.specs().is_empty());
    }

    #[test]
    fn test_lookup_by_name_and_mime() {
        let registry = ModeRegistry::with_defaults();
        let by_name = registry.get("pddl").unwrap();
        let by_mime = registry.for_mime("text/x-pddl").unwrap();
        assert_eq!(by_name.spec(), by_mime.spec());
        assert_eq!(by_name.spec().line_comment, ";");
        assert_eq!(by_name.spec().electric_chars, ")");
    }

    #[test]
    fn test_missing_modes() {
        let registry = ModeRegistry::with_defaults();
        assert_eq!(
            registry.get("lisp").err(),
            Some(ModeError::ModeNotFound("lisp".to_string()))
        );
        assert_eq!(
            registry.for_mime("text/x-lisp").err(),
            Some(ModeError::MimeNotFound("text/x-lisp".to_string()))
        );
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = ModeRegistry::with_defaults();
        registry.register(PddlMode::new(
            ModeSpec::pddl("application/pddl"),
            Vocabulary::pddl(),
            4,
        ));
        assert_eq!(registry.specs().len(), 1);
        assert_eq!(registry.get("pddl").unwrap().indent_unit(), 4);
        assert!(registry.for_mime("text/x-pddl").is_err());
    }

    #[test]
    fn test_mode_drives_tokenizer_and_tracker() {
        let mode = PddlMode::default();
        let mut state = mode.start_state();
        let first = mode.token("(define", 0, &mut state).unwrap();
        assert_eq!(first.category, Category::Keyword);
        assert_eq!(mode.indent(&state, ""), 2);
        assert_eq!(mode.indent(&state, ")"), 1);

        let decorations = mode.decorate(&["(define", "  (domain d)"]);
        assert!(decorations[0].unclosed);
        assert!(!decorations[1].unclosed);
        assert_eq!(decorations[1].indent_column, 2);
    }
}
