//! Line tokenizer
//!
//! [next_token] is the whole tokenizer: a function from (line, byte position,
//! state) to the next classified lexeme. It never consumes tentatively, so
//! there is nothing to rewind; the returned span tells the caller where to
//! resume. [LineTokens] and [tokenize_line] wrap it for callers that want a
//! full line at once.

use super::category::Category;
use super::raw_tokens::RawToken;
use super::vocabulary::Vocabulary;
use logos::Logos;
use serde::Serialize;
use std::ops::Range;
use tracing::{debug, trace};

/// Per-document tokenizer state, carried from one line to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenizerState {
    /// Running count of unmatched `(`. Never negative: stray `)` are clamped.
    pub paren_depth: usize,
    /// Line most recently processed, `None` before the first line.
    pub last_line: Option<usize>,
}

impl TokenizerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that tokenization moved to `line`.
    ///
    /// Returns `true` when this crosses a line boundary.
    pub fn enter_line(&mut self, line: usize) -> bool {
        if self.last_line == Some(line) {
            return false;
        }
        self.last_line = Some(line);
        true
    }

    fn open(&mut self) {
        self.paren_depth += 1;
    }

    fn close(&mut self) {
        if self.paren_depth == 0 {
            trace!(line = ?self.last_line, "close paren at depth 0, clamped");
            return;
        }
        self.paren_depth -= 1;
    }
}

/// A classified lexeme, located by its byte span within the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lexeme {
    pub category: Category,
    pub span: Range<usize>,
}

impl Lexeme {
    pub fn new(category: Category, span: Range<usize>) -> Self {
        Lexeme { category, span }
    }

    /// The source text this lexeme covers in `line`.
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.span.clone()]
    }
}

/// Classify the next lexeme of `line` starting at byte `pos`.
///
/// Whitespace before the lexeme is skipped. Returns `None` once the line is
/// exhausted (or when `pos` is not a char boundary inside the line). Callers
/// resume at `span.end` of the returned lexeme.
pub fn next_token(
    line: &str,
    pos: usize,
    state: &mut TokenizerState,
    vocabulary: &Vocabulary,
) -> Option<Lexeme> {
    let rest = line.get(pos..)?;
    let mut lexer = RawToken::lexer(rest);
    let result = lexer.next()?;
    let span = lexer.span();
    let (start, end) = (pos + span.start, pos + span.end);

    let lexeme = match result {
        Ok(RawToken::OpenParen) => {
            let opens_top_level = state.paren_depth == 0;
            state.open();
            let word = &line[start + 1..end];
            if opens_top_level && vocabulary.is_keyword(word) {
                Lexeme::new(Category::Keyword, start..end)
            } else {
                // Only the paren is consumed; the word is picked up by the next call.
                Lexeme::new(Category::Bracket, start..start + 1)
            }
        }
        Ok(RawToken::CloseParen) => {
            state.close();
            Lexeme::new(Category::Bracket, start..end)
        }
        Ok(RawToken::Colon) => Lexeme::new(Category::Operator, start..end),
        Ok(RawToken::Variable) => Lexeme::new(Category::Variable, start..end),
        Ok(RawToken::Word) | Ok(RawToken::Other) => {
            let after_paren = line[..start].ends_with('(');
            let category = vocabulary.classify_word(&line[start..end], after_paren);
            Lexeme::new(category, start..end)
        }
        Err(_) => Lexeme::new(Category::Plain, start..end),
    };
    Some(lexeme)
}

/// Iterator over the lexemes of one line.
pub struct LineTokens<'a, 's> {
    line: &'a str,
    pos: usize,
    state: &'s mut TokenizerState,
    vocabulary: &'a Vocabulary,
}

impl<'a, 's> LineTokens<'a, 's> {
    pub fn new(line: &'a str, state: &'s mut TokenizerState, vocabulary: &'a Vocabulary) -> Self {
        LineTokens {
            line,
            pos: 0,
            state,
            vocabulary,
        }
    }
}

impl Iterator for LineTokens<'_, '_> {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Lexeme> {
        let lexeme = next_token(self.line, self.pos, self.state, self.vocabulary)?;
        self.pos = lexeme.span.end;
        Some(lexeme)
    }
}

/// Tokenize a whole line, recording it as the last line processed.
pub fn tokenize_line(
    line: &str,
    line_no: usize,
    state: &mut TokenizerState,
    vocabulary: &Vocabulary,
) -> Vec<Lexeme> {
    state.enter_line(line_no);
    LineTokens::new(line, state, vocabulary).collect()
}

/// Tokenize every line of `source` with a fresh state.
///
/// The result has one entry per line of `source`, in order.
pub fn tokenize_document(source: &str, vocabulary: &Vocabulary) -> Vec<Vec<Lexeme>> {
    let mut state = TokenizerState::new();
    let lines: Vec<Vec<Lexeme>> = source
        .lines()
        .enumerate()
        .map(|(line_no, line)| tokenize_line(line, line_no, &mut state, vocabulary))
        .collect();
    debug!(
        lines = lines.len(),
        depth = state.paren_depth,
        "tokenized document"
    );
    lines
}
