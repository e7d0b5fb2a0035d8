//! Keyword, operator and type sets
//!
//! The sets are fixed once a [Vocabulary] is built and are never mutated
//! afterwards. Lookups are case-sensitive.

use super::category::Category;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

const PDDL_KEYWORDS: &[&str] = &[
    "define",
    "domain",
    "problem",
    "predicates",
    "actions",
    "precondition",
    "effect",
];
const PDDL_OPERATORS: &[&str] = &["and", "or", "not", "exists", "forall"];
const PDDL_TYPES: &[&str] = &["int", "bool", "object"];

/// Entries must be made of word characters only, or the tokenizer could never produce them.
static ENTRY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("entry pattern is a valid regex"));

/// Shared vocabulary with the built-in PDDL sets.
pub static DEFAULT_VOCABULARY: Lazy<Vocabulary> = Lazy::new(Vocabulary::pddl);

/// Error raised when a configured set contains an entry that is not a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyError {
    pub set: &'static str,
    pub entry: String,
}

impl fmt::Display for VocabularyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} entry '{}': entries must be non-empty runs of [A-Za-z0-9_]",
            self.set, self.entry
        )
    }
}

impl std::error::Error for VocabularyError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    keywords: HashSet<String>,
    operators: HashSet<String>,
    types: HashSet<String>,
}

impl Vocabulary {
    /// Build a vocabulary from the three sets, validating every entry.
    pub fn new<K, O, T>(keywords: K, operators: O, types: T) -> Result<Self, VocabularyError>
    where
        K: IntoIterator,
        K::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Ok(Vocabulary {
            keywords: collect_set("keywords", keywords)?,
            operators: collect_set("operators", operators)?,
            types: collect_set("types", types)?,
        })
    }

    /// The built-in PDDL sets.
    pub fn pddl() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Vocabulary {
            keywords: owned(PDDL_KEYWORDS),
            operators: owned(PDDL_OPERATORS),
            types: owned(PDDL_TYPES),
        }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    pub fn is_operator(&self, word: &str) -> bool {
        self.operators.contains(word)
    }

    pub fn is_type(&self, word: &str) -> bool {
        self.types.contains(word)
    }

    /// Classify a bare word. Variables never get here.
    ///
    /// Operators win over keywords, keywords over types. A word sitting right
    /// after a `(` did not earn the keyword form, so it is not promoted to a
    /// keyword here either.
    pub fn classify_word(&self, word: &str, after_paren: bool) -> Category {
        if self.is_operator(word) {
            Category::Operator
        } else if !after_paren && self.is_keyword(word) {
            Category::Keyword
        } else if self.is_type(word) {
            Category::Type
        } else {
            Category::Plain
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::pddl()
    }
}

fn collect_set<I>(set: &'static str, entries: I) -> Result<HashSet<String>, VocabularyError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    entries
        .into_iter()
        .map(Into::into)
        .map(|entry| {
            if ENTRY_PATTERN.is_match(&entry) {
                Ok(entry)
            } else {
                Err(VocabularyError { set, entry })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sets_are_case_sensitive() {
        let vocabulary = Vocabulary::pddl();
        assert!(vocabulary.is_keyword("define"));
        assert!(!vocabulary.is_keyword("Define"));
        assert!(vocabulary.is_operator("forall"));
        assert!(vocabulary.is_type("object"));
        assert!(!vocabulary.is_type("objects"));
    }

    #[test]
    fn membership_is_exact_not_substring() {
        let vocabulary = Vocabulary::pddl();
        assert!(!vocabulary.is_keyword("def"));
        assert!(!vocabulary.is_keyword(""));
        assert!(!vocabulary.is_operator("an"));
    }

    #[test]
    fn classify_word_priorities() {
        let vocabulary = Vocabulary::new(["both", "kw"], ["both"], ["kw", "ty"]).unwrap();
        assert_eq!(vocabulary.classify_word("both", false), Category::Operator);
        assert_eq!(vocabulary.classify_word("kw", false), Category::Keyword);
        assert_eq!(vocabulary.classify_word("kw", true), Category::Type);
        assert_eq!(vocabulary.classify_word("ty", false), Category::Type);
        assert_eq!(vocabulary.classify_word("other", false), Category::Plain);
    }

    #[test]
    fn rejects_non_word_entries() {
        let err = Vocabulary::new(["define"], ["and", "pick-up"], Vec::<String>::new())
            .unwrap_err();
        assert_eq!(err.set, "operators");
        assert_eq!(err.entry, "pick-up");

        let err = Vocabulary::new([""], Vec::<String>::new(), Vec::<String>::new()).unwrap_err();
        assert_eq!(err.set, "keywords");
    }
}
