//! Main editor orchestration.
//!
//! ## Learning: The Facade Pattern
//!
//! `Editor` ties the buffer, the mode controller, the command line and the
//! command table together behind a single entry point, [`Editor::tick`].
//! Hosts feed it key events and read back [`EditorSnapshot`]s.
//!
//! ## Tick order
//!
//! 1. Characters are drained first (text in insert mode, command text in
//!    command mode), then Enter/Backspace act on the text.
//! 2. Mode switches: the first character in normal mode, dedicated mode
//!    keys, Escape.
//! 3. Arrow keys, except in command mode.
//! 4. Enter in command mode submits the pending command.
//!
//! Each named key acts at most once per tick.

use quire_buffer::{BufferResult, Mode, Position, TextBuffer};

use crate::command::{CommandContext, CommandOutcome, CommandRegistry};
use crate::command_line::CommandLine;
use crate::config::{Config, UnknownCommandPolicy};
use crate::event::{EditorEvent, EventBus};
use crate::keymap::{KeyEvent, Keymap, NamedKey};
use crate::mode::{ModeController, Transition};
use crate::persistence::{Lifecycle, Persistence};
use crate::snapshot::{EditorSnapshot, Notification};
use crate::{CoreError, CoreResult};

/// Cursor movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// A single editing session.
///
/// ## Thread Safety
///
/// `Editor` is owned by one thread and mutated only from the tick path.
/// Other components observe it through snapshots or the event bus.
pub struct Editor<P, L> {
    buffer: TextBuffer,
    modes: ModeController,
    command_line: CommandLine,
    commands: CommandRegistry,
    keymap: Keymap,
    config: Config,
    event_bus: EventBus,
    notification: Option<Notification>,
    persistence: P,
    lifecycle: L,
    should_quit: bool,
}

impl<P: Persistence, L: Lifecycle> Editor<P, L> {
    /// Creates an editor with an empty document and default configuration.
    pub fn new(persistence: P, lifecycle: L) -> Self {
        Self {
            buffer: TextBuffer::new(),
            modes: ModeController::new(),
            command_line: CommandLine::new(),
            commands: CommandRegistry::new(),
            keymap: Keymap::new(),
            config: Config::default(),
            event_bus: EventBus::new(),
            notification: None,
            persistence,
            lifecycle,
            should_quit: false,
        }
    }

    /// Creates an editor over an existing buffer with custom configuration.
    ///
    /// The buffer's edit policies are replaced by the ones in `config`.
    pub fn with_config(
        config: Config,
        mut buffer: TextBuffer,
        persistence: P,
        lifecycle: L,
    ) -> CoreResult<Self> {
        let keymap = Keymap::from_config(&config)?;
        buffer.set_config(config.buffer_config());
        Ok(Self {
            buffer,
            keymap,
            config,
            ..Self::new(persistence, lifecycle)
        })
    }

    // ==================== Input ====================

    /// Processes one batch of key events.
    ///
    /// Never fails: invalid input, illegal transitions and edge no-ops are
    /// logged and dropped, and command failures surface as notifications.
    pub fn tick(&mut self, events: &[KeyEvent]) {
        let mut chars = Vec::new();
        let mut named: Vec<NamedKey> = Vec::new();
        for event in events {
            match *event {
                KeyEvent::Character(c) => chars.push(c),
                KeyEvent::Named(key) if !named.contains(&key) => named.push(key),
                KeyEvent::Named(_) => {}
            }
        }
        let pressed = |key: NamedKey| named.contains(&key);

        match self.mode() {
            Mode::Insert => {
                let mut changed = false;
                for &c in &chars {
                    changed |= applied(self.apply(|buffer, mode| buffer.insert_char(mode, c)));
                }
                if pressed(NamedKey::Enter) {
                    changed |= applied(self.apply(TextBuffer::split_line));
                }
                if pressed(NamedKey::Backspace) {
                    changed |= applied(self.apply(TextBuffer::delete_char_before_cursor));
                }
                // One change event per tick, however long the batch
                if changed {
                    self.emit(EditorEvent::DocumentChanged);
                    self.emit(EditorEvent::CursorMoved);
                }
            }
            Mode::Command => {
                for &c in &chars {
                    ignore(self.command_line.append_char(c));
                }
                if pressed(NamedKey::Backspace) && !self.command_line.delete_last_char() {
                    tracing::trace!("Command line already empty");
                }
            }
            Mode::Normal | Mode::Select => {}
        }

        if self.mode() == Mode::Normal {
            let requests = chars
                .first()
                .map(|&c| KeyEvent::Character(c))
                .into_iter()
                .chain(
                    named
                        .iter()
                        .filter(|k| matches!(k, NamedKey::Insert | NamedKey::Select))
                        .map(|&k| KeyEvent::Named(k)),
                )
                .filter_map(|event| self.keymap.resolve(event))
                .collect::<Vec<_>>();
            for transition in requests {
                ignore(self.request(transition));
            }
        }

        if pressed(NamedKey::Escape) {
            self.escape();
        }

        if self.mode() != Mode::Command {
            for key in named.iter().filter(|k| k.is_arrow()) {
                let direction = match key {
                    NamedKey::Left => Direction::Left,
                    NamedKey::Right => Direction::Right,
                    NamedKey::Up => Direction::Up,
                    _ => Direction::Down,
                };
                ignore(self.move_cursor(direction));
            }
        }

        if self.mode() == Mode::Command && pressed(NamedKey::Enter) {
            // Outcome already reported through events/notifications
            let _ = self.submit_command();
        }
    }

    /// Convenience for a tick holding a single event.
    pub fn handle_key(&mut self, event: impl Into<KeyEvent>) {
        self.tick(&[event.into()]);
    }

    // ==================== Text Editing ====================

    /// Inserts a character at the cursor (insert mode only).
    pub fn insert_char(&mut self, c: char) -> CoreResult<()> {
        self.edit(|buffer, mode| buffer.insert_char(mode, c))
    }

    /// Accept-newline (insert mode only).
    pub fn split_line(&mut self) -> CoreResult<()> {
        self.edit(TextBuffer::split_line)
    }

    /// Backspace (insert mode only).
    pub fn delete_char_before_cursor(&mut self) -> CoreResult<()> {
        self.edit(TextBuffer::delete_char_before_cursor)
    }

    fn edit(&mut self, op: impl FnOnce(&mut TextBuffer, Mode) -> BufferResult<()>) -> CoreResult<()> {
        self.apply(op)?;
        self.emit(EditorEvent::DocumentChanged);
        self.emit(EditorEvent::CursorMoved);
        Ok(())
    }

    fn apply(&mut self, op: impl FnOnce(&mut TextBuffer, Mode) -> BufferResult<()>) -> CoreResult<()> {
        op(&mut self.buffer, self.modes.mode())?;
        Ok(())
    }

    // ==================== Cursor Movement ====================

    /// Moves the cursor one step. Valid in every mode.
    pub fn move_cursor(&mut self, direction: Direction) -> CoreResult<Position> {
        match direction {
            Direction::Left => self.buffer.move_cursor_left(),
            Direction::Right => self.buffer.move_cursor_right(),
            Direction::Up => self.buffer.move_cursor_up(),
            Direction::Down => self.buffer.move_cursor_down(),
        }?;
        self.emit(EditorEvent::CursorMoved);
        Ok(self.buffer.cursor())
    }

    // ==================== Mode ====================

    /// Returns the current editor mode.
    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    /// Requests a mode transition.
    ///
    /// Leaving command mode discards whatever is pending on the command line.
    pub fn request(&mut self, transition: Transition) -> CoreResult<Mode> {
        let from = self.mode();
        let mode = self.modes.request(transition)?;
        if from == Mode::Command {
            self.command_line.clear();
        }
        tracing::debug!("Mode changed to {}", mode);
        self.emit(EditorEvent::ModeChanged(mode));
        Ok(mode)
    }

    /// Escape: dismisses any notification, abandons a pending command and
    /// returns to normal mode.
    pub fn escape(&mut self) {
        self.dismiss_notification();
        ignore(self.request(Transition::Escape));
    }

    // ==================== Commands ====================

    /// Submits the pending command line.
    ///
    /// Returns `None` when not in command mode or when nothing is pending.
    /// Otherwise the command is dispatched, the command line is cleared and
    /// the editor is back in normal mode regardless of the outcome.
    pub fn submit_command(&mut self) -> Option<CoreResult<CommandOutcome>> {
        if self.mode() != Mode::Command {
            return None;
        }
        let name = self.command_line.submit()?;
        self.emit(EditorEvent::CommandSubmitted(name.clone()));

        let mut ctx = CommandContext {
            buffer: &mut self.buffer,
            persistence: &mut self.persistence,
            lifecycle: &mut self.lifecycle,
        };
        let result = self.commands.dispatch(&name, &mut ctx);
        self.report(&result);

        ignore(self.request(Transition::Escape));
        Some(result)
    }

    fn report(&mut self, result: &CoreResult<CommandOutcome>) {
        match result {
            Ok(CommandOutcome::Saved(path)) => {
                self.notification = None;
                self.emit(EditorEvent::DocumentSaved(path.clone()));
            }
            Ok(CommandOutcome::Quit) => {
                self.should_quit = true;
                self.emit(EditorEvent::Quit);
            }
            Ok(CommandOutcome::SavedAndQuit(path)) => {
                self.notification = None;
                self.emit(EditorEvent::DocumentSaved(path.clone()));
                self.should_quit = true;
                self.emit(EditorEvent::Quit);
            }
            Ok(CommandOutcome::Handled) => {}
            Err(CoreError::UnknownCommand(name)) => {
                tracing::debug!("Unknown command discarded: {:?}", name);
                self.emit(EditorEvent::UnknownCommand(name.clone()));
                if self.config.editor.unknown_command == UnknownCommandPolicy::Notify {
                    self.notification = Some(Notification::info(format!(
                        "Not an editor command: {name}"
                    )));
                }
            }
            Err(CoreError::Persistence(e)) => {
                let message = format!("Error saving file: {e}");
                tracing::warn!("{}", message);
                self.emit(EditorEvent::SaveFailed(message.clone()));
                self.notification = Some(Notification::error(message));
            }
            Err(e) => {
                tracing::warn!("Command failed: {}", e);
                self.notification = Some(Notification::error(e.to_string()));
            }
        }
    }

    /// Returns the command table, for registering custom commands.
    pub fn commands_mut(&mut self) -> &mut CommandRegistry {
        &mut self.commands
    }

    // ==================== Notifications ====================

    /// Returns the notification currently on screen, if any.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Removes the current notification.
    pub fn dismiss_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    // ==================== State Access ====================

    /// Returns the document.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Returns the pending command line.
    pub fn command_line(&self) -> &CommandLine {
        &self.command_line
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn lifecycle(&self) -> &L {
        &self.lifecycle
    }

    /// Returns true once a quit command has been dispatched.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Captures the state a renderer needs.
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            lines: self.buffer.lines().iter().map(|l| l.text()).collect(),
            cursor: self.buffer.cursor(),
            mode: self.mode(),
            command_line: (self.mode() == Mode::Command)
                .then(|| self.command_line.content().to_string()),
            notification: self.notification.clone(),
            modified: self.buffer.is_modified(),
        }
    }

    // ==================== Events ====================

    /// Subscribes to editor events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<EditorEvent> {
        self.event_bus.subscribe()
    }

    fn emit(&self, event: EditorEvent) {
        self.event_bus.emit(event);
    }
}

/// Drops a recoverable error after logging it.
fn ignore<T>(result: CoreResult<T>) {
    applied(result);
}

/// Like [`ignore`], but reports whether the operation went through.
fn applied<T>(result: CoreResult<T>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            tracing::trace!("Ignored: {}", e);
            false
        }
    }
}
