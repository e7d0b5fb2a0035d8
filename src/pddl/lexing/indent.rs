//! Indentation hint derived from the tokenizer state.

use super::tokenizer::TokenizerState;

/// Suggested indentation, in indent units, for a line whose text after the
/// indentation is `text_after`.
///
/// A line that starts with `)` indents at the current depth, so the closer
/// lines up one unit left of the lines it closes. Any other line indents one
/// unit deeper than the current depth. Hosts multiply by their unit width.
pub fn indent(state: &TokenizerState, text_after: &str) -> usize {
    if text_after.trim_start().starts_with(')') {
        state.paren_depth
    } else {
        state.paren_depth + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_depth(paren_depth: usize) -> TokenizerState {
        TokenizerState {
            paren_depth,
            last_line: None,
        }
    }

    #[test]
    fn closing_line_indents_at_depth() {
        assert_eq!(indent(&at_depth(2), ")"), 2);
        assert_eq!(indent(&at_depth(2), "  ))"), 2);
    }

    #[test]
    fn other_lines_indent_one_deeper() {
        assert_eq!(indent(&at_depth(0), ""), 1);
        assert_eq!(indent(&at_depth(3), "(clear ?x)"), 4);
    }
}
