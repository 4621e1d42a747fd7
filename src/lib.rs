//! Detector Channel Map Library
//!
//! Lookup services for TPC detector data acquisition.
//!
//! This library provides tools for:
//! - Translating between front-end electronics addresses and offline channels
//! - Loading readout hardware maps from text or JSON files
//! - Packing and unpacking detector geo-ids
//! - Grouping readout links into DRO (data readout) units
//!
//! Both services are built once from their configuration files and are
//! read-only afterwards.

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod channel_map;
        pub mod hardware_map;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ChanInfo, DroInfo, GeoInfo, HardwareMap, HwInfo, TpcCoords};
pub use app::services::channel_map::{
    ChannelMapRegistry, Pd2hdChannelMap, TpcChannelMap, make_channel_map,
};
pub use app::services::hardware_map::HardwareMapService;
pub use config::{ChannelMapConfig, HardwareMapConfig};
pub use error::{Error, Result};
