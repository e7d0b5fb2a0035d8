//! Re-indentation of PDDL sources
//!
//! Lines are trimmed and re-indented by paren depth. A line starting with `)`
//! is pulled back one level before it is written, so closers line up with the
//! lines they close. Blank lines are kept, but emptied. The line contents are
//! never changed otherwise.

/// Re-indent `source` with `indent` repeated once per open paren.
pub fn format_source(source: &str, indent: &str) -> String {
    let mut level: usize = 0;
    let mut formatted = Vec::new();

    for line in source.lines() {
        let stripped = line.trim();
        if stripped.is_empty() {
            formatted.push(String::new());
            continue;
        }

        if stripped.starts_with(')') {
            level = level.saturating_sub(1);
        }
        formatted.push(format!("{}{}", indent.repeat(level), stripped));

        let opens = stripped.matches('(').count();
        let closes = stripped.matches(')').count();
        // The leading `)` was already applied above.
        let closes = closes - usize::from(stripped.starts_with(')'));
        level = (level + opens).saturating_sub(closes);
    }

    formatted.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reindents_nested_forms() {
        let source = "(define (domain d)\n(:predicates\n(on ?x ?y)\n)\n)";
        assert_eq!(
            format_source(source, "  "),
            "(define (domain d)\n  (:predicates\n    (on ?x ?y)\n  )\n)"
        );
    }

    #[test]
    fn test_blank_lines_are_emptied() {
        assert_eq!(format_source("(a\n   \n b)", "\t"), "(a\n\n\tb)");
    }

    #[test]
    fn test_stray_closers_do_not_go_negative() {
        assert_eq!(format_source("))\n(a\nb", "  "), "))\n(a\n  b");
    }

    #[test]
    fn test_formatting_is_stable() {
        let source = "(define (problem p)\n  (:init (on a b))\n  (:goal (clear a)))";
        let once = format_source(source, "  ");
        assert_eq!(format_source(&once, "  "), once);
    }
}
