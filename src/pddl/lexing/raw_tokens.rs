//! Raw lexemes for a single line of PDDL
//!
//! These tokens only cut the line into lexemes. They carry no classification:
//! whether `(define` is a keyword form or a lone bracket depends on the
//! vocabulary and on the bracket depth, which the tokenizer decides.
//! Whitespace is skipped here, so hosts never see it as a token.
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
pub enum RawToken {
    /// An open paren together with the word glued to it, e.g. `(define` or `(`
    #[regex(r"\([A-Za-z0-9_]*")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token(":")]
    Colon,

    /// `?` plus the following word characters
    #[regex(r"\?[A-Za-z0-9_]*")]
    Variable,

    #[regex(r"[A-Za-z0-9_]+")]
    Word,

    /// Any other character, plus the word characters following it (`-up`, `;comment`)
    #[regex(r"[^\sA-Za-z0-9_():?][A-Za-z0-9_]*")]
    Other,
}
