//! # Quire Core
//!
//! Modal editing on top of [`quire_buffer`]: the mode state machine, the
//! `:` command line and the command table, driven one tick at a time.
//!
//! ## Architecture Overview
//!
//! ```text
//!  key events ──▶ ┌──────────────────────── Editor ────────────────────────┐
//!                 │  ModeController ── Keymap                              │
//!                 │        │                                               │
//!                 │  INSERT ▼            COMMAND ▼                          │
//!                 │  TextBuffer          CommandLine ──▶ CommandRegistry ──┼──▶ Persistence / Lifecycle
//!                 └──────────────────────────┬─────────────────────────────┘
//!                                            ▼
//!                                  EditorSnapshot / EventBus ──▶ renderer
//! ```

pub mod command;
pub mod command_line;
pub mod config;
pub mod editor;
pub mod event;
pub mod keymap;
pub mod mode;
pub mod persistence;
pub mod snapshot;

pub use command::{Command, CommandContext, CommandHandler, CommandOutcome, CommandRegistry};
pub use command_line::CommandLine;
pub use config::{Config, ConfigError, UnknownCommandPolicy};
pub use editor::{Direction, Editor};
pub use event::{EditorEvent, EventBus, EventHandler};
pub use keymap::{parse_keys, KeyEvent, Keymap, NamedKey};
pub use mode::{ModeController, Transition};
pub use persistence::{FileStore, Lifecycle, Persistence, PersistenceError, QuitSignal};
pub use snapshot::{EditorSnapshot, Notification, NotificationLevel};

pub use quire_buffer::{Mode, Position, TextBuffer};

use quire_buffer::BufferError;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations.
///
/// Every variant is recoverable; the editor loop never stops on one.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Cannot {transition} from {from} mode")]
    IllegalTransition { from: Mode, transition: Transition },

    #[error("Character {0:?} is not printable ASCII")]
    NonPrintable(char),

    #[error("Not an editor command: {0}")]
    UnknownCommand(String),

    #[error("Save failed: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
