//! # Quire Buffer
//!
//! The document model of the editor: a grid of lines made of printable
//! ASCII cells, plus the cursor that walks over it.
//!
//! ## Key Concepts
//!
//! ### Ownership & Borrowing
//! - `TextBuffer` owns every line and the cursor
//! - Readers borrow lines as `&[Cell]` / `&Line`
//! - Mutations require `&mut self` and the current [`Mode`]
//!
//! ### Invariants
//! - The document never has zero lines
//! - The cursor always points at a cell or at the end of its line

mod buffer;
mod cursor;
mod line;
mod mode;

pub use buffer::{BackspacePolicy, BufferConfig, NewlinePolicy, TextBuffer};
pub use cursor::Position;
pub use line::{Cell, Line};
pub use mode::Mode;

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// The document edge an operation ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Start of the document, or start of a line for deletion
    Start,
    /// End of the last line
    End,
    /// First row (moving up)
    Top,
    /// Last row (moving down)
    Bottom,
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Edge::Start => "start",
            Edge::End => "end",
            Edge::Top => "top",
            Edge::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during buffer operations.
///
/// None of these are fatal: the editor loop recovers from all of them by
/// ignoring the offending input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("Character {0:?} is not printable ASCII")]
    NonPrintable(char),

    #[error("Operation requires {required} mode, editor is in {actual} mode")]
    ModeGuard { required: Mode, actual: Mode },

    #[error("Cursor is already at the {0} of the document")]
    AtBoundary(Edge),

    #[error("Row {0} is out of bounds")]
    RowOutOfBounds(usize),
}
