//! Editor modes.

use serde::{Deserialize, Serialize};

/// Editor modes (inspired by modal editors like Vim).
///
/// The mode itself is owned by the core's mode controller. The buffer only
/// reads it to decide whether an edit is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Normal mode - navigation and mode switches
    #[default]
    Normal,
    /// Insert mode - typing text
    Insert,
    /// Select mode - moving over text
    Select,
    /// Command mode - composing a `:` command
    Command,
}

impl Mode {
    /// Returns the label shown in a status line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Select => "SELECT",
            Mode::Command => "COMMAND",
        }
    }

    /// Returns true if text edits are accepted in this mode.
    pub fn accepts_edits(&self) -> bool {
        matches!(self, Mode::Insert)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
