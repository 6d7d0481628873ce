//! Read-only view of editor state for renderers and tests.

use quire_buffer::{Mode, Position};
use serde::{Deserialize, Serialize};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A user-visible message that stays up until dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Everything a renderer needs to draw a frame.
///
/// Owned data: holding a snapshot never blocks the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSnapshot {
    pub lines: Vec<String>,
    pub cursor: Position,
    pub mode: Mode,
    /// Pending command text, present only in command mode
    pub command_line: Option<String>,
    pub notification: Option<Notification>,
    pub modified: bool,
}

impl EditorSnapshot {
    /// Serializes the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Status-line text, e.g. `INSERT 1:3` or `:wq`.
    pub fn status_line(&self) -> String {
        match &self.command_line {
            Some(pending) => format!(":{pending}"),
            None => format!("{} {}", self.mode, self.cursor),
        }
    }
}
