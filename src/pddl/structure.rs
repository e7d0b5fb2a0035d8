//! Structural tracker
//!
//!     After every edit, hosts hand the whole buffer to [recompute] and get
//!     back one [LineRecord] per line. A line is "unclosed" when the scope its
//!     first `(` opened is still open once the entire buffer has been scanned.
//!     Later parens on the same line never mark it, even when they stay open.
//!     Hosts draw a marker at the line's indentation column for those lines
//!     and clear it everywhere else.
//!
//! Recompute Model
//!
//!     Every call is a full rescan: nothing is carried over between calls, so
//!     the result is a pure function of the buffer and re-running on the same
//!     text yields identical records. The cost is linear in the buffer size per
//!     edit. A stale result is fixed by simply recomputing with newer text.
//!
//!     A stray `)` with nothing open is ignored, the same clamping policy the
//!     tokenizer applies to its depth counter.

use serde::Serialize;
use tracing::debug;

/// Structural facts about one line of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineRecord {
    /// The line contains at least one `(`.
    pub paren_starts_here: bool,
    /// The scope opened by the line's first `(` is still open at end of buffer.
    pub still_open_at_end: bool,
    /// Column of the first non-whitespace character, 0 for blank lines.
    pub indent_column: usize,
}

/// What a host needs to decorate one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineDecoration {
    pub unclosed: bool,
    pub indent_column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Paren {
    Open,
    Close,
}

/// Every paren of `lines` in buffer order, as (line, char column, paren).
pub(crate) fn parens<S: AsRef<str>>(lines: &[S]) -> impl Iterator<Item = (usize, usize, Paren)> + '_ {
    lines.iter().enumerate().flat_map(|(line, text)| {
        text.as_ref()
            .chars()
            .enumerate()
            .filter_map(move |(column, ch)| match ch {
                '(' => Some((line, column, Paren::Open)),
                ')' => Some((line, column, Paren::Close)),
                _ => None,
            })
    })
}

/// Recompute the structural records of every line of the buffer.
pub fn recompute<S: AsRef<str>>(lines: &[S]) -> Vec<LineRecord> {
    let mut records: Vec<LineRecord> = lines
        .iter()
        .map(|line| LineRecord {
            paren_starts_here: false,
            still_open_at_end: false,
            indent_column: indent_column(line.as_ref()),
        })
        .collect();

    // One entry per unmatched `(`, innermost last: its line if it was that line's first paren.
    let mut open: Vec<Option<usize>> = Vec::new();
    for (line, _, paren) in parens(lines) {
        match paren {
            Paren::Open => {
                let record = &mut records[line];
                let first_on_line = !record.paren_starts_here;
                record.paren_starts_here = true;
                open.push(first_on_line.then_some(line));
            }
            Paren::Close => {
                open.pop();
            }
        }
    }

    for line in open.into_iter().flatten() {
        records[line].still_open_at_end = true;
    }

    debug!(
        lines = records.len(),
        unclosed = records.iter().filter(|r| r.still_open_at_end).count(),
        "recomputed structure"
    );
    records
}

/// [recompute] over the lines of a source string.
pub fn recompute_source(source: &str) -> Vec<LineRecord> {
    let lines: Vec<&str> = source.lines().collect();
    recompute(&lines)
}

/// Column of the first non-whitespace character of `line`, or 0 if there is none.
pub fn indent_column(line: &str) -> usize {
    line.chars().position(|ch| !ch.is_whitespace()).unwrap_or(0)
}

/// Per-line decorations for the host, one per record.
pub fn decorations(records: &[LineRecord]) -> Vec<LineDecoration> {
    records
        .iter()
        .map(|record| LineDecoration {
            unclosed: record.still_open_at_end,
            indent_column: record.indent_column,
        })
        .collect()
}

/// Indexes of the lines whose scope is still open.
pub fn unclosed_lines(records: &[LineRecord]) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.still_open_at_end)
        .map(|(index, _)| index)
        .collect()
}
