//! Lexer
//!
//! This module holds the line-at-a-time tokenizer used by editor hosts for
//! colorization and indentation.
//!
//! Structure:
//!     Raw lexemes are cut by a logos lexer (see [raw_tokens]). The tokenizer
//!     (see [tokenizer]) pulls one raw lexeme at a time from the unconsumed part
//!     of the line, classifies it against the [Vocabulary] and updates the
//!     per-document [TokenizerState].
//!
//! Stream Model
//!
//!     Hosts call the tokenizer repeatedly for each visible line, passing the
//!     byte position where the previous lexeme ended. Nothing is consumed
//!     tentatively: when `(define` turns out not to be a keyword form, the
//!     tokenizer simply reports a one byte span for the `(` and the host resumes
//!     right after it. The only state that survives between calls is the bracket
//!     depth, which is what lets a line continue a form opened lines above.
//!
//! Classification Rules
//!
//!     1. `(` followed by a word: a keyword form when it opens a top-level form
//!        and the word is a keyword, otherwise a lone bracket.
//!     2. `)`: a bracket; depth is decremented, clamped at zero.
//!     3. `:`: an operator (requirement and section tags).
//!     4. Anything else is a lexeme of one character plus the following word
//!        characters: variables (`?x`), then operators, bare keywords, types,
//!        and finally plain text.

pub mod category;
pub mod indent;
pub mod raw_tokens;
pub mod tokenizer;
pub mod vocabulary;

pub use category::Category;
pub use indent::indent;
pub use raw_tokens::RawToken;
pub use tokenizer::{
    next_token, tokenize_document, tokenize_line, Lexeme, LineTokens, TokenizerState,
};
pub use vocabulary::{Vocabulary, VocabularyError, DEFAULT_VOCABULARY};
