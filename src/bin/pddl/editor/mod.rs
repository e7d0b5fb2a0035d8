//! Interactive terminal editor for PDDL files
//!
//! A small editor surface that hosts a language [Mode]: lines are colored by
//! the tokenizer as they are drawn and unclosed lines are marked after every
//! edit.

pub mod app;
pub mod buffer;
pub mod ui;

#[cfg(test)]
mod tests;

use app::{App, AppEvent};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use pddl::pddl::mode::Mode;
use ratatui::prelude::*;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Run the editor on `file_path`. A missing file starts as an empty buffer.
pub fn run_editor(file_path: PathBuf, mode: Box<dyn Mode>) -> io::Result<()> {
    let content = match fs::read_to_string(&file_path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
        Err(err) => return Err(err),
    };

    let mut app = App::new(file_path, &content, mode);

    // Setup terminal
    enable_raw_mode()?;
    let stdout = io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    terminal.clear()?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            // Resize needs no handling: the next draw uses the new dimensions
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) == AppEvent::Quit {
                    return Ok(());
                }
            }
        }
    }
}
