//! Store configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Persistence mode
///
/// Only `keyvalue` is implemented. Any other name is kept so that data
/// operations can report which mode was asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mode {
    /// Key-value records
    KeyValue,
    /// A mode this crate does not implement
    Unsupported(String),
}

impl Mode {
    /// Name of the mode as written in configuration
    pub fn name(&self) -> &str {
        match self {
            Mode::KeyValue => "keyvalue",
            Mode::Unsupported(name) => name,
        }
    }

    /// Whether data operations are available in this mode
    pub fn is_supported(&self) -> bool {
        matches!(self, Mode::KeyValue)
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::KeyValue
    }
}

impl From<&str> for Mode {
    fn from(name: &str) -> Self {
        match name {
            "keyvalue" => Mode::KeyValue,
            other => Mode::Unsupported(other.to_string()),
        }
    }
}

impl From<String> for Mode {
    fn from(name: String) -> Self {
        Mode::from(name.as_str())
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.name().to_string()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldConfig {
    /// Path to the storage file
    pub path: PathBuf,
    /// Persistence mode
    pub mode: Mode,
    /// Save the whole store after every mutation
    pub auto_sync: bool,
    /// Load the storage file on construction if it exists
    pub auto_reload: bool,
}

impl HoldConfig {
    /// Default configuration for a storage path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HoldConfig {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set the persistence mode
    pub fn with_mode(mut self, mode: impl Into<Mode>) -> Self {
        self.mode = mode.into();
        self
    }

    /// Enable or disable write-through persistence
    pub fn with_auto_sync(mut self, enabled: bool) -> Self {
        self.auto_sync = enabled;
        self
    }

    /// Enable or disable loading on construction
    pub fn with_auto_reload(mut self, enabled: bool) -> Self {
        self.auto_reload = enabled;
        self
    }
}

impl Default for HoldConfig {
    fn default() -> Self {
        HoldConfig {
            path: PathBuf::from("holdkv.xml"),
            mode: Mode::default(),
            auto_sync: true,
            auto_reload: true,
        }
    }
}
