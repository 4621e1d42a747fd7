//! Application constants for detchannelmaps
//!
//! This module contains configuration constants, file locations and the
//! geo-id bit layout used throughout the crate.

// =============================================================================
// Configuration Discovery
// =============================================================================

/// Environment variable holding the base directory of the channel-map tables
pub const SHARE_DIR_ENV: &str = "DETCHANNELMAPS_SHARE";

/// Environment variable holding the default hardware-map file
pub const HARDWARE_MAP_ENV: &str = "DETCHANNELMAPS_HARDWARE_MAP";

/// Comment marker for hardware-map and channel-table files
pub const COMMENT_MARKER: char = '#';

// =============================================================================
// Channel Map Variants
// =============================================================================

/// ProtoDUNE-II horizontal drift channel map
pub mod pd2hd {
    /// Registry name of the PD2HD channel map
    pub const NAME: &str = "PD2HDChannelMap";

    /// Table location relative to the share directory
    pub const TABLE_DIR: &str = "config/pd2hd";

    /// Table file name
    pub const TABLE_FILE: &str = "PD2HDChannelMap_v6.txt";

    /// Number of offline channels (4 APAs x 2560 channels)
    pub const CHANNEL_COUNT: u32 = 2560 * 4;

    /// Number of whitespace-separated fields per table line
    pub const FIELDS_PER_LINE: usize = 13;
}

/// Channel map used when none is requested explicitly
pub const DEFAULT_CHANNEL_MAP: &str = pd2hd::NAME;

// =============================================================================
// Hardware Map Layout
// =============================================================================

/// Number of whitespace-separated fields per hardware-map line
pub const HW_FIELDS_PER_LINE: usize = 9;

/// Bit layout of the packed geo-id
pub mod geo_id {
    /// Width of each packed field
    pub const FIELD_MASK: u64 = 0xffff;

    /// Shift of the detector link field
    pub const LINK_SHIFT: u32 = 48;

    /// Shift of the detector slot field
    pub const SLOT_SHIFT: u32 = 32;

    /// Shift of the detector crate field
    pub const CRATE_SHIFT: u32 = 16;

    /// Shift of the detector id field
    pub const DET_ID_SHIFT: u32 = 0;
}

// =============================================================================
// Logging
// =============================================================================

/// Target used by the default log filter
pub const LOG_TARGET: &str = "detchannelmaps";
