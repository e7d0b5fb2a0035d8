//! Bracket balance check
//!
//! The only diagnostic this crate produces: where the parentheses of a buffer
//! fail to pair up. Both kinds of issue are located by line and char column.

use crate::pddl::structure::{parens, Paren};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BalanceIssue {
    /// A `)` with nothing open.
    UnmatchedClose { line: usize, column: usize },
    /// A `(` still open at end of buffer.
    Unclosed { line: usize, column: usize },
}

impl fmt::Display for BalanceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceIssue::UnmatchedClose { line, column } => {
                write!(f, "{}:{}: unmatched ')'", line + 1, column + 1)
            }
            BalanceIssue::Unclosed { line, column } => {
                write!(f, "{}:{}: '(' is never closed", line + 1, column + 1)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BalanceReport {
    /// Issues in buffer order.
    pub issues: Vec<BalanceIssue>,
}

impl BalanceReport {
    pub fn is_balanced(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check the parentheses of `source`.
pub fn check_balance(source: &str) -> BalanceReport {
    let lines: Vec<&str> = source.lines().collect();
    check_lines(&lines)
}

/// Check the parentheses of an already split buffer.
pub fn check_lines<S: AsRef<str>>(lines: &[S]) -> BalanceReport {
    let mut open = Vec::new();
    let mut issues = Vec::new();
    for (line, column, paren) in parens(lines) {
        match paren {
            Paren::Open => open.push((line, column)),
            Paren::Close => {
                if open.pop().is_none() {
                    issues.push(BalanceIssue::UnmatchedClose { line, column });
                }
            }
        }
    }
    issues.extend(
        open.into_iter()
            .map(|(line, column)| BalanceIssue::Unclosed { line, column }),
    );
    issues.sort_by_key(|issue| match *issue {
        BalanceIssue::UnmatchedClose { line, column } | BalanceIssue::Unclosed { line, column } => {
            (line, column)
        }
    });
    BalanceReport { issues }
}
