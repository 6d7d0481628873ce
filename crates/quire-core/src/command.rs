//! Command table and dispatch for `:` commands.
//!
//! ## Trait Objects vs Enums
//!
//! Built-in commands are an enum (exhaustive, no allocation); extra
//! commands are trait objects registered at runtime. Both live in the same
//! name → action table and are looked up by exact, case-sensitive name.

use std::collections::HashMap;
use std::path::PathBuf;

use quire_buffer::TextBuffer;

use crate::persistence::{Lifecycle, Persistence};
use crate::{CoreError, CoreResult};

/// Built-in commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// `:w` - save the document
    Write,
    /// `:q` - end the session
    Quit,
    /// `:wq` - save, then quit if the save worked
    WriteQuit,
}

/// What a dispatched command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Saved(PathBuf),
    Quit,
    SavedAndQuit(PathBuf),
    /// A registered handler ran
    Handled,
}

/// Everything a command may act on.
pub struct CommandContext<'a> {
    pub buffer: &'a mut TextBuffer,
    pub persistence: &'a mut dyn Persistence,
    pub lifecycle: &'a mut dyn Lifecycle,
}

impl CommandContext<'_> {
    fn save(&mut self) -> CoreResult<PathBuf> {
        self.persistence.save(self.buffer)?;
        self.buffer.mark_saved();
        let path = self.persistence.path().to_path_buf();
        tracing::info!("Saved {}", path.display());
        Ok(path)
    }

    fn quit(&mut self) {
        tracing::info!("Terminating session");
        self.lifecycle.terminate();
    }
}

/// Trait for custom command handlers.
///
/// `Send + Sync` so a registry can be shared with a host that builds it on
/// another thread.
pub trait CommandHandler: Send + Sync {
    /// Returns the command name typed after `:`.
    fn name(&self) -> &str;

    /// Executes the command.
    fn execute(&self, ctx: &mut CommandContext<'_>) -> CoreResult<()>;
}

enum Entry {
    Builtin(Command),
    Handler(Box<dyn CommandHandler>),
}

/// The command table.
pub struct CommandRegistry {
    entries: HashMap<String, Entry>,
}

impl CommandRegistry {
    /// Creates a registry holding the built-in `w`, `q` and `wq`.
    pub fn new() -> Self {
        let mut registry = Self {
            entries: HashMap::new(),
        };
        registry.register_builtin("w", Command::Write);
        registry.register_builtin("q", Command::Quit);
        registry.register_builtin("wq", Command::WriteQuit);
        registry
    }

    fn register_builtin(&mut self, name: &str, command: Command) {
        self.entries.insert(name.to_string(), Entry::Builtin(command));
    }

    /// Registers a custom command handler, replacing any entry with the same name.
    pub fn register(&mut self, handler: Box<dyn CommandHandler>) {
        let name = handler.name().to_string();
        self.entries.insert(name, Entry::Handler(handler));
    }

    /// Returns true if `name` is in the table.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Looks up `name` and runs it.
    ///
    /// Unknown names return [`CoreError::UnknownCommand`]; whether that is
    /// shown to the user is the caller's policy.
    pub fn dispatch(&self, name: &str, ctx: &mut CommandContext<'_>) -> CoreResult<CommandOutcome> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| CoreError::UnknownCommand(name.to_string()))?;

        match entry {
            Entry::Builtin(Command::Write) => ctx.save().map(CommandOutcome::Saved),
            Entry::Builtin(Command::Quit) => {
                ctx.quit();
                Ok(CommandOutcome::Quit)
            }
            Entry::Builtin(Command::WriteQuit) => {
                let path = ctx.save()?;
                ctx.quit();
                Ok(CommandOutcome::SavedAndQuit(path))
            }
            Entry::Handler(handler) => {
                tracing::debug!("Running command handler: {}", handler.name());
                handler.execute(ctx)?;
                Ok(CommandOutcome::Handled)
            }
        }
    }

    /// Returns all command names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
