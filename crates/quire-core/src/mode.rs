//! The mode state machine.
//!
//! ```text
//!            ┌── EnterInsert ──▶ Insert ──┐
//!  Normal ───┼── EnterSelect ──▶ Select ──┼── Escape ──▶ Normal
//!            └── EnterCommand ─▶ Command ─┘
//! ```
//!
//! Every edge not drawn above is illegal and leaves the mode unchanged.

use quire_buffer::Mode;

use crate::{CoreError, CoreResult};

/// A request to change mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    EnterInsert,
    EnterSelect,
    EnterCommand,
    Escape,
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Transition::EnterInsert => "enter-insert",
            Transition::EnterSelect => "enter-select",
            Transition::EnterCommand => "enter-command",
            Transition::Escape => "escape",
        };
        f.write_str(name)
    }
}

/// Owns the current [`Mode`] and enforces the transition table.
///
/// The controller has no entry/exit side effects; clearing the command line
/// or anything else is up to the caller.
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    mode: Mode,
}

impl ModeController {
    /// Starts in `Normal`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the mode `transition` leads to from `from`, if legal.
    pub fn target(from: Mode, transition: Transition) -> Option<Mode> {
        match (from, transition) {
            (Mode::Normal, Transition::EnterInsert) => Some(Mode::Insert),
            (Mode::Normal, Transition::EnterSelect) => Some(Mode::Select),
            (Mode::Normal, Transition::EnterCommand) => Some(Mode::Command),
            (Mode::Insert | Mode::Select | Mode::Command, Transition::Escape) => Some(Mode::Normal),
            _ => None,
        }
    }

    /// Applies a transition and returns the new mode.
    ///
    /// Illegal requests return [`CoreError::IllegalTransition`] and the
    /// mode stays as it was.
    pub fn request(&mut self, transition: Transition) -> CoreResult<Mode> {
        let from = self.mode;
        let to = Self::target(from, transition)
            .ok_or(CoreError::IllegalTransition { from, transition })?;
        self.mode = to;
        Ok(to)
    }
}
