//! Editable text buffer with a cursor
//!
//! Lines are stored without their terminators; whether the source ended with
//! a newline is remembered so saving writes it back the same way. The cursor
//! column counts chars, not bytes, so it can be shown on screen as is.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<String>,
    row: usize,
    col: usize,
    trailing_newline: bool,
}

impl Buffer {
    pub fn from_text(text: &str) -> Self {
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Buffer {
            lines,
            row: 0,
            col: 0,
            trailing_newline: text.ends_with('\n'),
        }
    }

    /// Buffer contents, ending in a newline only if the source did.
    pub fn text(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map(String::as_str).unwrap_or("")
    }

    /// Cursor as (row, char column).
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Byte offset of the cursor within its line.
    pub fn cursor_byte(&self) -> usize {
        byte_offset(&self.lines[self.row], self.col)
    }

    pub fn insert_char(&mut self, ch: char) {
        let at = self.cursor_byte();
        self.lines[self.row].insert(at, ch);
        self.col += 1;
    }

    pub fn insert_str(&mut self, text: &str) {
        let at = self.cursor_byte();
        self.lines[self.row].insert_str(at, text);
        self.col += text.chars().count();
    }

    /// Split the line at the cursor. The new line keeps the text after the
    /// cursor, with its leading whitespace replaced by `indent` spaces.
    pub fn split_line(&mut self, indent: usize) {
        let at = self.cursor_byte();
        let rest = self.lines[self.row].split_off(at);
        let new_line = format!("{}{}", " ".repeat(indent), rest.trim_start());
        self.row += 1;
        self.lines.insert(self.row, new_line);
        self.col = indent;
    }

    /// Delete the char before the cursor, joining lines at column 0.
    ///
    /// Returns `false` when there was nothing to delete.
    pub fn backspace(&mut self) -> bool {
        if self.col > 0 {
            self.col -= 1;
            let at = self.cursor_byte();
            self.lines[self.row].remove(at);
            true
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.lines[self.row].chars().count();
            self.lines[self.row].push_str(&line);
            true
        } else {
            false
        }
    }

    /// Replace the leading whitespace of the cursor line with `width` spaces,
    /// keeping the cursor on the same char.
    pub fn reindent_line(&mut self, width: usize) {
        let line = &self.lines[self.row];
        let current = line.chars().take_while(|ch| ch.is_whitespace()).count();
        let body = line.trim_start().to_string();
        self.lines[self.row] = format!("{}{}", " ".repeat(width), body);
        self.col = if self.col >= current {
            self.col - current + width
        } else {
            width
        };
        self.clamp_col();
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.clamp_col();
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.clamp_col();
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len();
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_len() {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.line_len();
    }

    fn line_len(&self) -> usize {
        self.lines[self.row].chars().count()
    }

    fn clamp_col(&mut self) {
        self.col = self.col.min(self.line_len());
    }
}

/// Byte offset of char column `col` in `line`, clamped to the line end.
fn byte_offset(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(offset, _)| offset)
        .unwrap_or(line.len())
}
