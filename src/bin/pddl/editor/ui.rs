//! UI rendering logic
//!
//! Layout structure:
//! - Title bar (1 line, fixed)
//! - Text area with a line-number gutter (remaining space)
//! - Status line (1 line, fixed)
//!
//! Unclosed lines get a marker in the gutter and a shaded cell at their
//! indentation column, which is where the scope they opened starts.

use super::app::App;
use pddl::pddl::lexing::{Category, Lexeme};
use pddl::pddl::structure::LineDecoration;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Width of the line number gutter, marker column included
pub const GUTTER_WIDTH: u16 = 6;
const MARKER: &str = "▎";

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(1),    // Text area
            Constraint::Length(1), // Status line
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0], app);
    render_text(frame, chunks[1], app);
    render_status_line(frame, chunks[2], app);
}

/// First visible row for a text area of `height` rows.
pub fn scroll_offset(cursor_row: usize, height: usize) -> usize {
    if height == 0 || cursor_row < height {
        0
    } else {
        cursor_row + 1 - height
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect, app: &App) {
    let spec = app.mode().spec();
    let dirty = if app.is_dirty() { " [+]" } else { "" };
    let title = format!("{}:: {}{} ({})", spec.name, app.file_name(), dirty, spec.mime);
    let paragraph = Paragraph::new(title).style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(paragraph, area);
}

fn render_text(frame: &mut Frame, area: Rect, app: &App) {
    let buffer = app.buffer();
    let (cursor_row, cursor_col) = buffer.cursor();
    let height = area.height as usize;
    let top = scroll_offset(cursor_row, height);
    let bottom = (top + height).min(buffer.lines().len());

    let lexemes = app.highlighted(top..bottom);
    let lines: Vec<Line> = (top..bottom)
        .zip(lexemes.iter())
        .map(|(row, lexemes)| {
            let decoration = app.decorations().get(row).copied();
            render_line(row, buffer.line(row), lexemes, decoration)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);

    let x = area.x + GUTTER_WIDTH + cursor_col as u16;
    let y = area.y + (cursor_row - top) as u16;
    if x < area.right() && y < area.bottom() {
        frame.set_cursor_position((x, y));
    }
}

/// Build the styled line for one buffer row, gutter included.
pub fn render_line(
    row: usize,
    text: &str,
    lexemes: &[Lexeme],
    decoration: Option<LineDecoration>,
) -> Line<'static> {
    let unclosed = decoration.filter(|d| d.unclosed);

    let mut spans = vec![Span::styled(
        format!("{:>4} ", row + 1),
        Style::default().fg(Color::DarkGray),
    )];
    spans.push(match unclosed {
        Some(_) => Span::styled(MARKER, Style::default().fg(Color::Yellow)),
        None => Span::raw(" "),
    });

    // Style per byte, then group consecutive chars sharing a style.
    let mut byte_styles = vec![Style::default(); text.len()];
    for lexeme in lexemes {
        let style = category_style(lexeme.category);
        for slot in &mut byte_styles[lexeme.span.clone()] {
            *slot = style;
        }
    }

    let mut current: Option<(Style, String)> = None;
    for (column, (offset, ch)) in text.char_indices().enumerate() {
        let mut style = byte_styles[offset];
        if unclosed.is_some_and(|d| d.indent_column == column) {
            style = style.bg(Color::DarkGray);
        }
        match current.as_mut() {
            Some((run_style, run)) if *run_style == style => run.push(ch),
            _ => {
                if let Some((run_style, run)) = current.take() {
                    spans.push(Span::styled(run, run_style));
                }
                current = Some((style, ch.to_string()));
            }
        }
    }
    if let Some((run_style, run)) = current {
        spans.push(Span::styled(run, run_style));
    }

    Line::from(spans)
}

/// Terminal style for each category tag.
pub fn category_style(category: Category) -> Style {
    match category.style_tag() {
        Some("keyword") => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        Some("operator") => Style::default().fg(Color::Cyan),
        Some("type") => Style::default().fg(Color::Green),
        Some("variable") => Style::default().fg(Color::Yellow),
        Some("bracket") => Style::default().fg(Color::DarkGray),
        _ => Style::default(),
    }
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let (row, col) = app.buffer().cursor();
    let status = format!(
        "{}:{} | unclosed: {} | {}",
        row + 1,
        col + 1,
        app.unclosed_count(),
        app.status()
    );
    let paragraph = Paragraph::new(status).style(Style::default().fg(Color::Gray));
    frame.render_widget(paragraph, area);
}
