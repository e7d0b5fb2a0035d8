//! Test infrastructure for the editor
//!
//! Drives the app with keyboard events and renders it on ratatui's test
//! backend, so the tests see exactly what a terminal would show.

use super::app::{App, AppEvent};
use super::ui;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pddl::pddl::mode::PddlMode;
use ratatui::backend::TestBackend;
use ratatui::style::Color;
use ratatui::Terminal;
use std::path::PathBuf;

/// Test application wrapper with test backend
struct TestApp {
    app: App,
    terminal: Terminal<TestBackend>,
}

impl TestApp {
    fn with_content(content: &str) -> Self {
        Self::at_path(PathBuf::from("test.pddl"), content)
    }

    fn at_path(path: PathBuf, content: &str) -> Self {
        let app = App::new(path, content, Box::new(PddlMode::default()));
        let terminal =
            Terminal::new(TestBackend::new(60, 12)).expect("Failed to create terminal");
        TestApp { app, terminal }
    }

    fn key(&mut self, code: KeyCode) -> AppEvent {
        self.app.handle_key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn ctrl(&mut self, ch: char) -> AppEvent {
        self.app
            .handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
    }

    fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.key(KeyCode::Char(ch));
        }
    }

    fn render(&mut self) -> Vec<String> {
        self.terminal
            .draw(|frame| ui::render(frame, &self.app))
            .expect("Failed to draw");
        let buffer = self.terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .filter_map(|x| buffer.cell((x, y)).map(|cell| cell.symbol()))
                    .collect::<String>()
            })
            .collect()
    }

    fn lines(&self) -> Vec<String> {
        self.app.buffer().lines().to_vec()
    }
}

#[test]
fn test_typing_updates_unclosed_markers() {
    let mut test = TestApp::with_content("");
    test.type_text("(define");
    assert!(test.app.decorations()[0].unclosed);
    test.type_text(")");
    assert!(!test.app.decorations()[0].unclosed);
    assert!(test.app.is_dirty());
}

#[test]
fn test_enter_indents_by_depth() {
    let mut test = TestApp::with_content("");
    test.type_text("(define");
    test.key(KeyCode::Enter);
    // depth 1 after `(define`: one unit deeper than the depth, two columns per unit
    assert_eq!(test.lines(), vec!["(define".to_string(), "    ".to_string()]);
    assert_eq!(test.app.buffer().cursor(), (1, 4));
}

#[test]
fn test_electric_close_paren_reindents() {
    let mut test = TestApp::with_content("(define\n        ");
    test.key(KeyCode::Down);
    test.key(KeyCode::End);
    test.type_text(")");
    assert_eq!(test.lines()[1], "  )");
    assert_eq!(test.app.unclosed_count(), 0);
}

#[test]
fn test_render_shows_text_and_marker() {
    let mut test = TestApp::with_content("(define\n  (domain d)");
    let screen = test.render();
    assert!(screen[0].contains("test.pddl"));
    assert!(screen[0].contains("text/x-pddl"));
    assert!(screen[1].contains("1 ▎(define"));
    assert!(screen[2].contains("2    (domain d)"));
    assert!(!screen[2].contains('▎'));
    assert!(screen[11].contains("unclosed: 1"));

    // The unclosed line's indentation cell is shaded
    let buffer = test.terminal.backend().buffer();
    let bg = |x: u16, y: u16| buffer.cell((x, y)).map(|cell| cell.bg);
    assert_eq!(bg(ui::GUTTER_WIDTH, 1), Some(Color::DarkGray));
    assert_eq!(bg(ui::GUTTER_WIDTH + 2, 2), Some(Color::Reset));
}

#[test]
fn test_highlight_carries_state_into_viewport() {
    let test = TestApp::with_content("(define\n(domain d))");
    let lines = test.app.highlighted(1..2);
    assert_eq!(lines.len(), 1);
    // `(domain` is nested, so only its paren is a bracket
    assert_eq!(lines[0][0].span, 0..1);
}

#[test]
fn test_backspace_and_quit() {
    let mut test = TestApp::with_content("(a\n)");
    test.key(KeyCode::Down);
    test.key(KeyCode::Backspace);
    assert_eq!(test.lines(), vec!["(a)".to_string()]);
    assert_eq!(test.app.unclosed_count(), 0);
    assert_eq!(test.ctrl('q'), AppEvent::Quit);
    assert_eq!(test.key(KeyCode::Esc), AppEvent::Quit);
}

#[test]
fn test_save_writes_buffer() {
    let path = std::env::temp_dir().join(format!("pddl-editor-{}.pddl", std::process::id()));
    let mut test = TestApp::at_path(path.clone(), "");
    test.type_text("(define)");
    assert_eq!(test.ctrl('s'), AppEvent::Continue);
    assert!(!test.app.is_dirty());
    let saved = std::fs::read_to_string(&path).expect("file to be written");
    std::fs::remove_file(&path).ok();
    assert_eq!(saved, "(define)");
}

#[test]
fn test_save_keeps_line_ending_of_source() {
    let path = std::env::temp_dir().join(format!("pddl-editor-eol-{}.pddl", std::process::id()));
    for source in ["(define)", "(define)\n"] {
        let mut test = TestApp::at_path(path.clone(), source);
        test.key(KeyCode::End);
        test.key(KeyCode::Backspace);
        test.type_text(")");
        test.ctrl('s');
        let saved = std::fs::read_to_string(&path).expect("file to be written");
        assert_eq!(saved, source);
    }
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_scroll_offset_keeps_cursor_visible() {
    assert_eq!(ui::scroll_offset(3, 10), 0);
    assert_eq!(ui::scroll_offset(10, 10), 1);
    assert_eq!(ui::scroll_offset(25, 10), 16);
}
