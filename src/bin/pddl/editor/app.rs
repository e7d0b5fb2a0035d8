//! Editor application state
//!
//! The app plays the host role for a [Mode]: it recomputes the unclosed-line
//! decorations after every edit and asks the tokenizer for the visible lines
//! when rendering. Indentation on Enter and on electric chars comes from the
//! mode as well.

use super::buffer::Buffer;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pddl::pddl::lexing::{Lexeme, TokenizerState};
use pddl::pddl::mode::Mode;
use pddl::pddl::structure::LineDecoration;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};

/// What the run loop should do after a key was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Continue,
    Quit,
}

pub struct App {
    buffer: Buffer,
    mode: Box<dyn Mode>,
    decorations: Vec<LineDecoration>,
    path: PathBuf,
    dirty: bool,
    status: String,
}

impl App {
    pub fn new(path: PathBuf, content: &str, mode: Box<dyn Mode>) -> Self {
        let mut app = App {
            buffer: Buffer::from_text(content),
            mode,
            decorations: Vec::new(),
            path,
            dirty: false,
            status: "Ctrl-S save | Esc/Ctrl-Q quit".to_string(),
        };
        app.refresh_decorations();
        app
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn mode(&self) -> &dyn Mode {
        self.mode.as_ref()
    }

    pub fn decorations(&self) -> &[LineDecoration] {
        &self.decorations
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("untitled")
            .to_string()
    }

    pub fn unclosed_count(&self) -> usize {
        self.decorations.iter().filter(|d| d.unclosed).count()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppEvent {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return AppEvent::Quit,
            KeyCode::Char('q') if ctrl => return AppEvent::Quit,
            KeyCode::Char('s') if ctrl => self.save(),
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Char(ch) => self.type_char(ch),
            KeyCode::Enter => self.newline(),
            KeyCode::Tab => {
                let unit = " ".repeat(self.mode.indent_unit());
                self.buffer.insert_str(&unit);
                self.changed();
            }
            KeyCode::Backspace => {
                if self.buffer.backspace() {
                    self.changed();
                }
            }
            KeyCode::Up => self.buffer.move_up(),
            KeyCode::Down => self.buffer.move_down(),
            KeyCode::Left => self.buffer.move_left(),
            KeyCode::Right => self.buffer.move_right(),
            KeyCode::Home => self.buffer.move_home(),
            KeyCode::End => self.buffer.move_end(),
            _ => {}
        }
        AppEvent::Continue
    }

    fn type_char(&mut self, ch: char) {
        self.buffer.insert_char(ch);
        if self.mode.spec().electric_chars.contains(ch) {
            let (row, _) = self.buffer.cursor();
            let text_after = self.buffer.line(row).trim_start().to_string();
            if text_after.starts_with(ch) {
                let width = self.indent_width(row, &text_after);
                self.buffer.reindent_line(width);
            }
        }
        self.changed();
    }

    fn newline(&mut self) {
        let (row, _) = self.buffer.cursor();
        let rest = self.buffer.line(row)[self.buffer.cursor_byte()..]
            .trim_start()
            .to_string();
        // The new line is indented by the state after everything above it.
        let mut state = self.state_before_line(row);
        self.tokenize_into(row, &mut state, self.buffer.cursor_byte());
        let width = self.mode.indent(&state, &rest) * self.mode.indent_unit();
        self.buffer.split_line(width);
        self.changed();
    }

    fn indent_width(&self, row: usize, text_after: &str) -> usize {
        let state = self.state_before_line(row);
        self.mode.indent(&state, text_after) * self.mode.indent_unit()
    }

    /// Tokenizer state after every line above `row`.
    pub fn state_before_line(&self, row: usize) -> TokenizerState {
        let mut state = self.mode.start_state();
        for line_no in 0..row {
            let len = self.buffer.line(line_no).len();
            self.tokenize_into(line_no, &mut state, len);
        }
        state
    }

    /// Tokenize line `row` up to byte `end`, feeding `state`.
    fn tokenize_into(&self, row: usize, state: &mut TokenizerState, end: usize) -> Vec<Lexeme> {
        let line = &self.buffer.line(row)[..end];
        state.enter_line(row);
        let mut lexemes = Vec::new();
        let mut pos = 0;
        while let Some(lexeme) = self.mode.token(line, pos, state) {
            pos = lexeme.span.end;
            lexemes.push(lexeme);
        }
        lexemes
    }

    /// Lexemes of the lines in `rows`, tokenized with the state carried from the top of the buffer.
    pub fn highlighted(&self, rows: std::ops::Range<usize>) -> Vec<Vec<Lexeme>> {
        let mut state = self.state_before_line(rows.start);
        rows.filter(|&row| row < self.buffer.lines().len())
            .map(|row| {
                let len = self.buffer.line(row).len();
                self.tokenize_into(row, &mut state, len)
            })
            .collect()
    }

    fn changed(&mut self) {
        self.dirty = true;
        self.refresh_decorations();
    }

    fn refresh_decorations(&mut self) {
        let lines: Vec<&str> = self.buffer.lines().iter().map(String::as_str).collect();
        self.decorations = self.mode.decorate(&lines);
        debug!(
            lines = lines.len(),
            unclosed = self.unclosed_count(),
            "decorations refreshed"
        );
    }

    pub fn save(&mut self) {
        match self.write_file() {
            Ok(()) => {
                self.dirty = false;
                self.status = format!("Saved {}", self.path.display());
                info!(path = %self.path.display(), "saved buffer");
            }
            Err(err) => {
                self.status = format!("Save failed: {err}");
            }
        }
    }

    fn write_file(&self) -> io::Result<()> {
        fs::write(&self.path, self.buffer.text())
    }
}
