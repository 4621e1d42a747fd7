//! Configuration management and validation.
//!
//! Provides configuration structures for the channel-map and hardware-map
//! services. Reading the environment is confined to the `from_env`
//! constructors so that library code only ever receives explicit values.

use crate::constants::{DEFAULT_CHANNEL_MAP, HARDWARE_MAP_ENV, SHARE_DIR_ENV, pd2hd};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for building a channel map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMapConfig {
    /// Base directory holding the versioned channel-map tables
    pub share_dir: Option<PathBuf>,

    /// Registry name of the channel-map variant to build
    pub detector: String,
}

impl Default for ChannelMapConfig {
    fn default() -> Self {
        Self {
            share_dir: None,
            detector: DEFAULT_CHANNEL_MAP.to_string(),
        }
    }
}

impl ChannelMapConfig {
    /// Create configuration for an explicit share directory
    pub fn new(share_dir: impl Into<PathBuf>) -> Self {
        Self {
            share_dir: Some(share_dir.into()),
            ..Self::default()
        }
    }

    /// Build configuration from the `DETCHANNELMAPS_SHARE` environment variable
    pub fn from_env() -> Self {
        Self::from_share_var(std::env::var_os(SHARE_DIR_ENV))
    }

    /// Build configuration from a raw share-directory value
    ///
    /// Empty values are treated as unset.
    pub fn from_share_var(value: Option<OsString>) -> Self {
        let share_dir = value.filter(|v| !v.is_empty()).map(PathBuf::from);
        debug!("Channel map share directory: {:?}", share_dir);
        Self {
            share_dir,
            ..Self::default()
        }
    }

    /// Select a channel-map variant by registry name
    pub fn with_detector(mut self, detector: impl Into<String>) -> Self {
        self.detector = detector.into();
        self
    }

    /// Override the share directory
    pub fn with_share_dir(mut self, share_dir: impl Into<PathBuf>) -> Self {
        self.share_dir = Some(share_dir.into());
        self
    }

    /// Get the share directory, failing if it was never configured
    pub fn require_share_dir(&self) -> Result<&Path> {
        self.share_dir.as_deref().ok_or_else(|| {
            Error::configuration(format!(
                "Environment variable {} is not set and no share directory was given",
                SHARE_DIR_ENV
            ))
        })
    }

    /// Full path of the PD2HD channel table under the share directory
    pub fn pd2hd_table_path(&self) -> Result<PathBuf> {
        Ok(self
            .require_share_dir()?
            .join(pd2hd::TABLE_DIR)
            .join(pd2hd::TABLE_FILE))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.detector.trim().is_empty() {
            return Err(Error::configuration("Channel map name cannot be empty"));
        }
        self.require_share_dir()?;
        Ok(())
    }
}

/// Configuration for building a hardware map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareMapConfig {
    /// Path to the whitespace-delimited hardware-map file
    pub path: PathBuf,

    /// Reject short or malformed lines instead of defaulting their fields
    pub strict: bool,
}

impl HardwareMapConfig {
    /// Create lenient configuration for a hardware-map file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            strict: false,
        }
    }

    /// Build configuration from the `DETCHANNELMAPS_HARDWARE_MAP` environment variable
    pub fn from_env() -> Option<Self> {
        std::env::var_os(HARDWARE_MAP_ENV)
            .filter(|v| !v.is_empty())
            .map(Self::new)
    }

    /// Enable strict line parsing
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::configuration("Hardware map path cannot be empty"));
        }
        Ok(())
    }
}
