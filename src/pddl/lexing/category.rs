//! Lexical categories reported to editor hosts.

use serde::Serialize;
use std::fmt;

/// The closed set of categories a lexeme can be classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Keyword,
    Operator,
    Type,
    Variable,
    Bracket,
    Plain,
}

impl Category {
    /// Returns the opaque style tag hosts map to visual styling.
    ///
    /// Plain lexemes carry no tag: hosts render them with their default style.
    pub fn style_tag(self) -> Option<&'static str> {
        match self {
            Category::Keyword => Some("keyword"),
            Category::Operator => Some("operator"),
            Category::Type => Some("type"),
            Category::Variable => Some("variable"),
            Category::Bracket => Some("bracket"),
            Category::Plain => None,
        }
    }
}

pub const CATEGORIES: &[Category] = &[
    Category::Keyword,
    Category::Operator,
    Category::Type,
    Category::Variable,
    Category::Bracket,
    Category::Plain,
];

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Keyword => "Keyword",
            Category::Operator => "Operator",
            Category::Type => "Type",
            Category::Variable => "Variable",
            Category::Bracket => "Bracket",
            Category::Plain => "Plain",
        };
        f.write_str(name)
    }
}
