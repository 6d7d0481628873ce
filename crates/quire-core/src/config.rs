//! Editor configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! `#[derive(Serialize, Deserialize)]` generates the TOML conversion, and
//! `#[serde(default)]` fills missing fields from `Default::default()`, so
//! a config file only needs the keys the user wants to change.

use quire_buffer::{BackspacePolicy, BufferConfig, NewlinePolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main editor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Editing behavior
    pub editor: EditorConfig,

    /// Mode-switch keys
    pub keyboard: KeyboardConfig,

    /// File handling
    pub files: FileConfig,
}

impl Config {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default config: {}", e);
                Self::default()
            }
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads from the default config path.
    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("quire").join("config.toml"))
    }

    /// Saves the config to `path`, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Buffer policies derived from the editor section.
    pub fn buffer_config(&self) -> BufferConfig {
        BufferConfig {
            newline: self.editor.newline,
            backspace: self.editor.backspace,
        }
    }
}

/// How an unrecognised `:` command is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCommandPolicy {
    /// Discard without telling the user
    #[default]
    Silent,
    /// Show a transient notification
    Notify,
}

/// Editor behavior configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Enter opens a blank line, or splits at the cursor
    pub newline: NewlinePolicy,

    /// Backspace at column 0 stops, or joins lines
    pub backspace: BackspacePolicy,

    pub unknown_command: UnknownCommandPolicy,
}

/// Keyboard configuration. Each value must be one printable character.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    pub enter_insert: String,
    pub enter_select: String,
    pub command_prefix: String,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            enter_insert: "i".to_string(),
            enter_select: "v".to_string(),
            command_prefix: ":".to_string(),
        }
    }
}

/// File handling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Document path used when none is given on the command line
    pub default_path: PathBuf,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            default_path: PathBuf::from("./first_file.txt"),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Key binding must be a single printable character, got {0:?}")]
    InvalidKey(String),
}
