//! File processing API for PDDL sources
//!
//! This module dumps what the tokenizer and the structural tracker see in a
//! source, in different formats. A processing spec is written as
//! `<stage>-<format>`:
//!
//! - stages: `token` (tokenizer output), `structure` (tracker records)
//! - formats: `simple` (one line per item), `json`, `yaml`
//!
//! ```rust,ignore
//! use pddl::pddl::processor::{process, ProcessingSpec};
//! use pddl::pddl::lexing::DEFAULT_VOCABULARY;
//!
//! let spec = ProcessingSpec::from_string("token-simple")?;
//! let output = process("(define (domain d))", &spec, &DEFAULT_VOCABULARY)?;
//! ```

use crate::pddl::lexing::{tokenize_document, Category, Vocabulary};
use crate::pddl::structure::{recompute_source, LineRecord};
use serde::Serialize;
use std::fmt;

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Structure,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Yaml,
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    pub fn new(stage: ProcessingStage, format: OutputFormat) -> Self {
        ProcessingSpec { stage, format }
    }

    /// Parse a format string like "token-simple" or "structure-json"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let (stage, format) = format_str
            .split_once('-')
            .ok_or_else(|| ProcessingError::InvalidFormat(format_str.to_string()))?;

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "structure" => ProcessingStage::Structure,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        Ok(ProcessingSpec {
            stage,
            format: OutputFormat::from_name(format)?,
        })
    }
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Result<Self, ProcessingError> {
        match name {
            "simple" => Ok(OutputFormat::Simple),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(ProcessingError::InvalidFormatType(name.to_string())),
        }
    }
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    InvalidFormat(String),
    InvalidStage(String),
    InvalidFormatType(String),
    SerializationError(String),
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::InvalidFormat(format) => {
                write!(f, "Invalid format '{format}', expected <stage>-<format>")
            }
            ProcessingError::InvalidStage(stage) => {
                write!(f, "Invalid stage '{stage}', expected 'token' or 'structure'")
            }
            ProcessingError::InvalidFormatType(format) => write!(
                f,
                "Invalid format type '{format}', expected 'simple', 'json' or 'yaml'"
            ),
            ProcessingError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for ProcessingError {}

/// One token of the tokenizer dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRecord {
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub category: Category,
    pub text: String,
}

/// Flatten the tokenizer output of `source` into records.
pub fn token_records(source: &str, vocabulary: &Vocabulary) -> Vec<TokenRecord> {
    let lines: Vec<&str> = source.lines().collect();
    tokenize_document(source, vocabulary)
        .into_iter()
        .zip(lines)
        .enumerate()
        .flat_map(|(line_no, (lexemes, line))| {
            lexemes.into_iter().map(move |lexeme| TokenRecord {
                line: line_no,
                start: lexeme.span.start,
                end: lexeme.span.end,
                category: lexeme.category,
                text: lexeme.text(line).to_string(),
            })
        })
        .collect()
}

/// Run `spec` over `source` and serialize the result.
pub fn process(
    source: &str,
    spec: &ProcessingSpec,
    vocabulary: &Vocabulary,
) -> Result<String, ProcessingError> {
    match spec.stage {
        ProcessingStage::Token => {
            let records = token_records(source, vocabulary);
            match spec.format {
                OutputFormat::Simple => Ok(tokens_simple(&records)),
                format => serialize(&records, format),
            }
        }
        ProcessingStage::Structure => {
            let records = recompute_source(source);
            match spec.format {
                OutputFormat::Simple => Ok(structure_simple(&records)),
                format => serialize(&records, format),
            }
        }
    }
}

fn tokens_simple(records: &[TokenRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "{}:{}-{} {} {:?}\n",
                r.line, r.start, r.end, r.category, r.text
            )
        })
        .collect()
}

fn structure_simple(records: &[LineRecord]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(line, r)| {
            format!(
                "{} {} {} {}\n",
                line,
                if r.paren_starts_here { "starts" } else { "-" },
                if r.still_open_at_end { "open" } else { "-" },
                r.indent_column
            )
        })
        .collect()
}

fn serialize<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, ProcessingError> {
    let serialized = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| ProcessingError::SerializationError(e.to_string()))?,
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|e| ProcessingError::SerializationError(e.to_string()))?,
        OutputFormat::Simple => {
            return Err(ProcessingError::SerializationError(
                "simple output is not a serde format".to_string(),
            ))
        }
    };
    Ok(serialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pddl::lexing::DEFAULT_VOCABULARY;

    #[test]
    fn test_parse_specs() {
        assert_eq!(
            ProcessingSpec::from_string("token-simple").unwrap(),
            ProcessingSpec::new(ProcessingStage::Token, OutputFormat::Simple)
        );
        assert_eq!(
            ProcessingSpec::from_string("structure-yaml").unwrap(),
            ProcessingSpec::new(ProcessingStage::Structure, OutputFormat::Yaml)
        );
    }

    #[test]
    fn test_invalid_specs() {
        assert_eq!(
            ProcessingSpec::from_string("token"),
            Err(ProcessingError::InvalidFormat("token".to_string()))
        );
        assert_eq!(
            ProcessingSpec::from_string("ast-json"),
            Err(ProcessingError::InvalidStage("ast".to_string()))
        );
        assert_eq!(
            ProcessingSpec::from_string("token-xml"),
            Err(ProcessingError::InvalidFormatType("xml".to_string()))
        );
    }

    #[test]
    fn test_token_records_carry_line_numbers() {
        let records = token_records("(define\n  ?x)", &DEFAULT_VOCABULARY);
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].line, 1);
        assert_eq!(records[1].start, 2);
        assert_eq!(records[1].category, Category::Variable);
        assert_eq!(records[1].text, "?x");
    }

    #[test]
    fn test_structure_json_is_an_array_of_records() {
        let spec = ProcessingSpec::from_string("structure-json").unwrap();
        let output = process("(define\n  (domain d)", &spec, &DEFAULT_VOCABULARY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["still_open_at_end"], true);
        assert_eq!(value[1]["still_open_at_end"], false);
        assert_eq!(value[1]["indent_column"], 2);
    }
}
