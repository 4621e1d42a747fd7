//! Error handling for channel-map and hardware-map construction and queries.
//!
//! Construction failures (missing configuration, unreadable files, malformed
//! channel tables) are reported through [`Error`]. Routine lookup misses are
//! not errors and are signalled with `Option`, empty slices or flagged
//! records instead.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for detchannelmaps operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for map loading and lookup operations
#[derive(Error, Debug)]
pub enum Error {
    /// Required configuration missing or invalid
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Map file missing or cannot be opened
    #[error("Invalid map file: {path}")]
    FileNotFound { path: PathBuf },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed hardware-map line (strict parsing only)
    #[error("Hardware map format error in '{path}' line {line}: {message}")]
    HardwareMapFormat {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Malformed channel-map table line
    #[error("Channel map format error in '{path}' line {line}: {message}")]
    ChannelMapFormat {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// JSON import or export failed
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// No DRO unit for the requested host/card pair
    #[error("Invalid DRO host/card pair {host}/{card}")]
    DroNotFound { host: String, card: u16 },

    /// No channel-map implementation registered under this name
    #[error("Unknown channel map: {name}")]
    UnknownChannelMap { name: String },
}

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl AsRef<Path>) -> Self {
        Self::FileNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a hardware-map format error
    pub fn hardware_map_format(
        path: impl AsRef<Path>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::HardwareMapFormat {
            path: path.as_ref().to_path_buf(),
            line,
            message: message.into(),
        }
    }

    /// Create a channel-map format error
    pub fn channel_map_format(
        path: impl AsRef<Path>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::ChannelMapFormat {
            path: path.as_ref().to_path_buf(),
            line,
            message: message.into(),
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a DRO not found error
    pub fn dro_not_found(host: impl Into<String>, card: u16) -> Self {
        Self::DroNotFound {
            host: host.into(),
            card,
        }
    }

    /// Create an unknown channel map error
    pub fn unknown_channel_map(name: impl Into<String>) -> Self {
        Self::UnknownChannelMap { name: name.into() }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON conversion failed".to_string(),
            source: error,
        }
    }
}
