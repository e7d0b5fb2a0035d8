//! A minimal host driving a registered mode
//!
//! Mirrors what an editor does: select the mode by language identifier,
//! tokenize lines with a state carried down the buffer, ask for indentation
//! and refresh the unclosed-line decorations after an edit.

use pddl::pddl::lexing::{Category, TokenizerState};
use pddl::pddl::mode::{Mode, ModeRegistry, PddlMode};
use pddl::pddl::settings::Loader;
use pddl::pddl::structure::{recompute, LineDecoration};

fn host_tokenize(mode: &dyn Mode, lines: &[&str]) -> (Vec<Vec<Category>>, TokenizerState) {
    let mut state = mode.start_state();
    let categories = lines
        .iter()
        .enumerate()
        .map(|(line_no, line)| {
            state.enter_line(line_no);
            let mut pos = 0;
            let mut categories = Vec::new();
            while let Some(lexeme) = mode.token(line, pos, &mut state) {
                pos = lexeme.span.end;
                categories.push(lexeme.category);
            }
            categories
        })
        .collect();
    (categories, state)
}

#[test]
fn test_host_selects_mode_by_mime() {
    let registry = ModeRegistry::with_defaults();
    let mode = registry.for_mime("text/x-pddl").expect("pddl mode registered");
    assert_eq!(mode.spec().name, "pddl");
    assert_eq!(mode.spec().line_comment, ";");
    assert!(registry.for_mime("text/x-lisp").is_err());
}

#[test]
fn test_host_edit_cycle() {
    let registry = ModeRegistry::with_defaults();
    let mode = registry.get("pddl").expect("pddl mode registered");

    let mut lines = vec!["(define", "  (domain foo)"];
    let (categories, state) = host_tokenize(mode, &lines);
    assert_eq!(categories[0], vec![Category::Keyword]);
    assert_eq!(state.paren_depth, 1);
    assert_eq!(state.last_line, Some(1));

    // Outer form unclosed, inner one closed
    assert_eq!(
        mode.decorate(&lines),
        vec![
            LineDecoration {
                unclosed: true,
                indent_column: 0
            },
            LineDecoration {
                unclosed: false,
                indent_column: 2
            },
        ]
    );

    // Typing the closer: the host asks for its indent, then recomputes
    assert_eq!(mode.indent(&state, ")"), 1);
    assert_eq!(mode.indent(&state, "(:predicates"), 2);
    lines.push(")");
    assert!(mode.decorate(&lines).iter().all(|d| !d.unclosed));
}

#[test]
fn test_empty_buffer() {
    let mode = PddlMode::default();
    assert!(mode.decorate(&[]).is_empty());
    let lines: Vec<String> = Vec::new();
    assert!(recompute(&lines).is_empty());
}

#[test]
fn test_mode_from_layered_config() {
    let config = Loader::new()
        .set_override("language.types", vec!["location", "object"])
        .and_then(|loader| loader.set_override("editor.mime", "application/pddl"))
        .and_then(|loader| loader.set_override("editor.indent_unit", 4))
        .and_then(Loader::build)
        .expect("valid configuration");
    let mode = PddlMode::from_config(&config).expect("valid vocabulary");

    assert_eq!(mode.spec().mime, "application/pddl");
    assert_eq!(mode.indent_unit(), 4);
    let (categories, _) = host_tokenize(&mode, &["  ?l - location"]);
    assert_eq!(
        categories[0],
        vec![Category::Variable, Category::Plain, Category::Type]
    );
    // `int` is no longer a type
    let (categories, _) = host_tokenize(&mode, &["  int"]);
    assert_eq!(categories[0], vec![Category::Plain]);
}
