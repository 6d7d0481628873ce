//! Boundary contracts for saving the document and ending the session.
//!
//! The editor never touches the filesystem or the process itself; it calls
//! out through these traits. The host decides what "save" and "quit" mean.

use std::path::{Path, PathBuf};

use quire_buffer::{BufferConfig, TextBuffer};

/// Errors reported by a [`Persistence`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Durable storage for the document.
///
/// `save` only borrows the buffer, so a failed save cannot alter the
/// document or cursor.
pub trait Persistence {
    /// Path the document is associated with.
    fn path(&self) -> &Path;

    /// Writes the document to [`Persistence::path`].
    fn save(&mut self, buffer: &TextBuffer) -> Result<(), PersistenceError>;
}

/// Ends the editing session.
pub trait Lifecycle {
    fn terminate(&mut self);
}

/// Saves to a file on disk, one `\n`-terminated line per document line.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the file into a buffer, or returns an empty buffer if the file
    /// doesn't exist yet.
    pub fn load(&self, config: BufferConfig) -> Result<TextBuffer, PersistenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(TextBuffer::from_text(&content, config)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(TextBuffer::with_config(config))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".quire.tmp");
        self.path.with_file_name(name)
    }
}

impl Persistence for FileStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn save(&mut self, buffer: &TextBuffer) -> Result<(), PersistenceError> {
        // Write to a temporary file first, then rename (atomic write)
        let temp_path = self.temp_path();
        std::fs::write(&temp_path, buffer.to_text().as_bytes())?;
        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }
        Ok(())
    }
}

/// Records a termination request; the host polls it to stop its loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuitSignal {
    requested: bool,
}

impl QuitSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }
}

impl Lifecycle for QuitSignal {
    fn terminate(&mut self) {
        self.requested = true;
    }
}
