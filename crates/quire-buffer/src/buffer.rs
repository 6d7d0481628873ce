//! Core text buffer implementation.
//!
//! ## Why a grid of cells?
//!
//! The editor works one printable character at a time and the cursor is a
//! `(row, col)` pair, so the document is stored exactly that way: a vector
//! of lines, each a vector of cells. Every operation is a direct index
//! into that grid and there is no byte/char conversion to get wrong.
//!
//! ## Learning: Ownership in Action
//!
//! ```rust,ignore
//! let mut buffer = TextBuffer::new(); // buffer OWNS the lines
//! let line = buffer.line(0)?;         // line BORROWS from buffer
//! // buffer.insert_char(mode, 'x');   // ERROR! Can't mutate while borrowed
//! let len = line.len();               // last use ends the borrow
//! buffer.insert_char(mode, 'x')?;     // Now OK!
//! ```

use serde::{Deserialize, Serialize};

use crate::line::{Cell, Line};
use crate::{BufferError, BufferResult, Edge, Mode, Position};

/// What "accept newline" does with the text after the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewlinePolicy {
    /// Always open a blank line below; the current line is untouched.
    #[default]
    Blank,
    /// Move the cells after the cursor onto the new line.
    Split,
}

/// What backspace does at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackspacePolicy {
    /// Nothing happens at column 0.
    #[default]
    Stop,
    /// Join the current line onto the end of the previous one.
    Join,
}

/// Configuration for buffer behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferConfig {
    pub newline: NewlinePolicy,
    pub backspace: BackspacePolicy,
}

/// The document being edited plus its cursor.
///
/// # Invariants
///
/// - `lines` is never empty
/// - `cursor.row < lines.len()`
/// - `cursor.col <= lines[cursor.row].len()`
///
/// Every public method upholds these; nothing outside this type can touch
/// the cursor.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// Document content, never empty
    lines: Vec<Line>,

    /// Insertion point
    cursor: Position,

    /// Whether the buffer changed since the last save
    modified: bool,

    /// Edit policies
    config: BufferConfig,
}

impl TextBuffer {
    /// Creates a new buffer with one empty line and the cursor at `(0, 0)`.
    ///
    /// # Example
    /// ```
    /// use quire_buffer::{Position, TextBuffer};
    ///
    /// let buffer = TextBuffer::new();
    /// assert_eq!(buffer.line_count(), 1);
    /// assert_eq!(buffer.cursor(), Position::ZERO);
    /// ```
    pub fn new() -> Self {
        Self::with_config(BufferConfig::default())
    }

    /// Creates an empty buffer with custom edit policies.
    pub fn with_config(config: BufferConfig) -> Self {
        Self {
            lines: vec![Line::new()],
            cursor: Position::ZERO,
            modified: false,
            config,
        }
    }

    /// Builds a buffer from existing text.
    ///
    /// `\n` and `\r\n` end a line and a single trailing newline does not
    /// open an extra line, so `from_text(b.to_text())` reproduces `b`.
    /// Characters outside printable ASCII are dropped.
    pub fn from_text(text: &str, config: BufferConfig) -> Self {
        let body = text.strip_suffix('\n').unwrap_or(text);
        let lines = body
            .split('\n')
            .map(|l| Line::from_text(l.strip_suffix('\r').unwrap_or(l)))
            .collect();

        Self {
            lines,
            cursor: Position::ZERO,
            modified: false,
            config,
        }
    }

    // ==================== Text Access ====================

    /// Returns the line at `row`.
    pub fn line(&self, row: usize) -> BufferResult<&Line> {
        self.lines.get(row).ok_or(BufferError::RowOutOfBounds(row))
    }

    /// Returns the content of line `row` as a string.
    pub fn line_text(&self, row: usize) -> BufferResult<String> {
        self.line(row).map(Line::text)
    }

    /// Returns all lines.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Serializes the document: every line followed by `\n`.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.extend(line.cells().iter().map(|c| c.as_char()));
            out.push('\n');
        }
        out
    }

    // ==================== Measurements ====================

    /// Returns the number of lines. Always at least 1.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the length of a specific line in cells.
    pub fn line_len(&self, row: usize) -> BufferResult<usize> {
        self.line(row).map(Line::len)
    }

    /// Returns true if the document is a single empty line.
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Returns the cursor position.
    #[inline]
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    fn current_line_len(&self) -> usize {
        self.lines[self.cursor.row].len()
    }

    fn last_row(&self) -> usize {
        self.lines.len() - 1
    }

    // ==================== Mutations ====================

    fn require_insert(mode: Mode) -> BufferResult<()> {
        if mode.accepts_edits() {
            Ok(())
        } else {
            Err(BufferError::ModeGuard {
                required: Mode::Insert,
                actual: mode,
            })
        }
    }

    /// Inserts `c` at the cursor and advances the cursor by one.
    pub fn insert_char(&mut self, mode: Mode, c: char) -> BufferResult<()> {
        Self::require_insert(mode)?;
        let cell = Cell::new(c).ok_or(BufferError::NonPrintable(c))?;

        let Position { row, col } = self.cursor;
        self.lines[row].insert(col, cell);
        self.cursor.col += 1;
        self.modified = true;
        Ok(())
    }

    /// Handles "accept newline" according to the configured [`NewlinePolicy`].
    ///
    /// The cursor always ends up at the start of the new line.
    pub fn split_line(&mut self, mode: Mode) -> BufferResult<()> {
        Self::require_insert(mode)?;

        let Position { row, col } = self.cursor;
        let new_line = match self.config.newline {
            NewlinePolicy::Blank => Line::new(),
            NewlinePolicy::Split => self.lines[row].split_off(col),
        };
        self.lines.insert(row + 1, new_line);
        self.cursor = Position::new(row + 1, 0);
        self.modified = true;
        Ok(())
    }

    /// Backspace: removes the cell before the cursor.
    ///
    /// At column 0 the [`BackspacePolicy`] decides between a no-op and
    /// joining with the previous line.
    pub fn delete_char_before_cursor(&mut self, mode: Mode) -> BufferResult<()> {
        Self::require_insert(mode)?;

        let Position { row, col } = self.cursor;
        if col > 0 {
            self.lines[row].remove(col - 1);
            self.cursor.col -= 1;
            self.modified = true;
            return Ok(());
        }

        match self.config.backspace {
            BackspacePolicy::Join if row > 0 => {
                let mut current = self.lines.remove(row);
                let prev = &mut self.lines[row - 1];
                let join_col = prev.len();
                prev.append(&mut current);
                self.cursor = Position::new(row - 1, join_col);
                self.modified = true;
                Ok(())
            }
            _ => Err(BufferError::AtBoundary(Edge::Start)),
        }
    }

    // ==================== Cursor Movement ====================

    /// Moves left one cell, wrapping to the end of the previous line.
    pub fn move_cursor_left(&mut self) -> BufferResult<()> {
        let Position { row, col } = self.cursor;
        if col > 0 {
            self.cursor.col -= 1;
        } else if row > 0 {
            self.cursor = Position::new(row - 1, self.lines[row - 1].len());
        } else {
            return Err(BufferError::AtBoundary(Edge::Start));
        }
        Ok(())
    }

    /// Moves right one cell, wrapping to the start of the next line.
    pub fn move_cursor_right(&mut self) -> BufferResult<()> {
        let Position { row, col } = self.cursor;
        if col < self.current_line_len() {
            self.cursor.col += 1;
        } else if row < self.last_row() {
            self.cursor = Position::new(row + 1, 0);
        } else {
            return Err(BufferError::AtBoundary(Edge::End));
        }
        Ok(())
    }

    /// Moves up one line, clamping the column to the destination length.
    pub fn move_cursor_up(&mut self) -> BufferResult<()> {
        if self.cursor.row == 0 {
            return Err(BufferError::AtBoundary(Edge::Top));
        }
        self.cursor.row -= 1;
        self.clamp_cursor_to_line();
        Ok(())
    }

    /// Moves down one line, clamping the column to the destination length.
    pub fn move_cursor_down(&mut self) -> BufferResult<()> {
        if self.cursor.row >= self.last_row() {
            return Err(BufferError::AtBoundary(Edge::Bottom));
        }
        self.cursor.row += 1;
        self.clamp_cursor_to_line();
        Ok(())
    }

    fn clamp_cursor_to_line(&mut self) {
        self.cursor.col = self.cursor.col.min(self.current_line_len());
    }

    // ==================== State Queries ====================

    /// Returns true if the buffer has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Clears the modified flag after a successful save.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Returns the buffer's configuration.
    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Sets new edit policies.
    pub fn set_config(&mut self, config: BufferConfig) {
        self.config = config;
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        Self::from_text(s, BufferConfig::default())
    }
}

impl From<String> for TextBuffer {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
