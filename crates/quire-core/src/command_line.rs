//! The mini-buffer used to compose `:` commands.

use quire_buffer::Cell;

use crate::{CoreError, CoreResult};

/// Pending command text.
///
/// Only fed while the editor is in command mode. The content is transient:
/// it is taken by [`CommandLine::submit`] and discarded by
/// [`CommandLine::clear`] when command mode is left early.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    content: String,
}

impl CommandLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a printable ASCII character.
    pub fn append_char(&mut self, c: char) -> CoreResult<()> {
        let cell = Cell::new(c).ok_or(CoreError::NonPrintable(c))?;
        self.content.push(cell.as_char());
        Ok(())
    }

    /// Removes the last character. Returns `false` if there was nothing to remove.
    pub fn delete_last_char(&mut self) -> bool {
        self.content.pop().is_some()
    }

    /// Takes the pending command, leaving the line empty.
    ///
    /// Returns `None` (and keeps nothing) when there is nothing to submit.
    pub fn submit(&mut self) -> Option<String> {
        if self.content.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.content))
        }
    }

    /// Discards the pending command.
    pub fn clear(&mut self) {
        self.content.clear();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Column of the mini-buffer cursor (always the end of the content).
    pub fn cursor_col(&self) -> usize {
        self.content.len()
    }
}
