//! Cells and lines.
//!
//! A `Cell` is one printable ASCII character. It is only constructible
//! through [`Cell::new`], so a line can never contain a control byte.
//! Layout data (pixel offsets, glyph widths) belongs to the renderer and
//! is deliberately absent here.

use serde::{Deserialize, Serialize};

/// One printable ASCII character (32..=126).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub struct Cell(u8);

impl Cell {
    /// Creates a cell, or `None` if `c` is not printable ASCII.
    pub fn new(c: char) -> Option<Self> {
        if is_printable(c) {
            Some(Self(c as u8))
        } else {
            None
        }
    }

    /// Returns the character stored in this cell.
    #[inline]
    pub fn as_char(self) -> char {
        self.0 as char
    }
}

/// Returns true for printable ASCII (space through tilde).
#[inline]
pub fn is_printable(c: char) -> bool {
    matches!(c, ' '..='~')
}

impl From<Cell> for char {
    fn from(cell: Cell) -> char {
        cell.as_char()
    }
}

impl TryFrom<char> for Cell {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Cell::new(c).ok_or_else(|| format!("{c:?} is not printable ASCII"))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An ordered run of cells. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    cells: Vec<Cell>,
}

impl Line {
    /// Creates an empty line.
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Builds a line from text, dropping anything that isn't printable ASCII.
    pub fn from_text(text: &str) -> Self {
        Self {
            cells: text.chars().filter_map(Cell::new).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn insert(&mut self, col: usize, cell: Cell) {
        self.cells.insert(col, cell);
    }

    pub(crate) fn remove(&mut self, col: usize) -> Cell {
        self.cells.remove(col)
    }

    /// Splits off every cell from `col` onwards into a new line.
    pub(crate) fn split_off(&mut self, col: usize) -> Line {
        Line {
            cells: self.cells.split_off(col),
        }
    }

    pub(crate) fn append(&mut self, other: &mut Line) {
        self.cells.append(&mut other.cells);
    }

    /// Returns the line content as a `String`.
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.as_char()).collect()
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cell in &self.cells {
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}
