//! Cursor position type.
//!
//! ## Learning: Newtype Pattern
//!
//! `Position` wraps row/column coordinates instead of a bare
//! `(usize, usize)`, so row and column can't be swapped by accident.

use serde::{Deserialize, Serialize};

/// A position in the text buffer (row and column).
///
/// Both are 0-indexed. `col` may equal the line length, which denotes the
/// end-of-line insertion point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub row: usize,
    /// Cell index within the line (0-indexed)
    pub col: usize,
}

impl Position {
    /// Position at the start of the document.
    pub const ZERO: Position = Position { row: 0, col: 0 };

    /// Creates a new position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display as 1-indexed for user-facing output
        write!(f, "{}:{}", self.row + 1, self.col + 1)
    }
}
