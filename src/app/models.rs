//! Data models for channel and hardware mapping
//!
//! This module contains the value records shared by the hardware-map and
//! channel-map services: hardware link records, geographic ids, DRO groupings
//! and TPC front-end coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Hardware Map Records
// =============================================================================

/// One hardware link: a detector-side connection point and the readout
/// resources it feeds
///
/// Detector-side fields are carried as `u32` as read from the map file; only
/// their low 16 bits take part in the packed geo-id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HwInfo {
    /// Readout source identifier
    pub dro_source_id: u32,

    /// Detector link number
    pub det_link: u32,

    /// Detector slot number
    pub det_slot: u32,

    /// Detector crate number
    pub det_crate: u32,

    /// Detector subsystem id
    pub det_id: u32,

    /// Host running the readout application
    pub dro_host: String,

    /// Readout card on the host
    pub dro_card: u16,

    /// Super logic region on the card
    pub dro_slr: u16,

    /// Link on the card
    pub dro_link: u16,

    /// Whether the record was populated from a parsed line
    #[serde(skip)]
    pub from_file: bool,
}

impl HwInfo {
    /// Create a hardware link record not tied to any file
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dro_source_id: u32,
        det_link: u32,
        det_slot: u32,
        det_crate: u32,
        det_id: u32,
        dro_host: impl Into<String>,
        dro_card: u16,
        dro_slr: u16,
        dro_link: u16,
    ) -> Self {
        Self {
            dro_source_id,
            det_link,
            det_slot,
            det_crate,
            det_id,
            dro_host: dro_host.into(),
            dro_card,
            dro_slr,
            dro_link,
            from_file: false,
        }
    }

    /// Key of the DRO unit this link feeds
    pub fn dro_key(&self) -> (&str, u16) {
        (&self.dro_host, self.dro_card)
    }

    /// Check whether any detector-side field is too wide for the geo-id
    pub fn has_wide_geo_fields(&self) -> bool {
        [self.det_link, self.det_slot, self.det_crate, self.det_id]
            .iter()
            .any(|&v| v > u32::from(u16::MAX))
    }
}

impl fmt::Display for HwInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {} {}",
            self.dro_source_id,
            self.det_link,
            self.det_slot,
            self.det_crate,
            self.det_id,
            self.dro_host,
            self.dro_card,
            self.dro_slr,
            self.dro_link
        )
    }
}

/// Detector-side coordinates unpacked from a geo-id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeoInfo {
    pub det_link: u16,
    pub det_slot: u16,
    pub det_crate: u16,
    pub det_id: u16,
}

/// A data-readout unit identified by host and card, with the links feeding it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroInfo {
    /// Host running the readout application
    pub host: String,

    /// Readout card on the host
    pub card: u16,

    /// Links in ascending geo-id order
    pub links: Vec<HwInfo>,
}

impl DroInfo {
    /// Start a DRO unit from its first link
    pub fn from_link(link: HwInfo) -> Self {
        Self {
            host: link.dro_host.clone(),
            card: link.dro_card,
            links: vec![link],
        }
    }
}

/// Ordered list of hardware links, used for loading and export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareMap {
    pub link_infos: Vec<HwInfo>,
}

impl HardwareMap {
    pub fn new(link_infos: Vec<HwInfo>) -> Self {
        Self { link_infos }
    }

    pub fn len(&self) -> usize {
        self.link_infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.link_infos.is_empty()
    }
}

impl From<Vec<HwInfo>> for HardwareMap {
    fn from(link_infos: Vec<HwInfo>) -> Self {
        Self { link_infos }
    }
}

// =============================================================================
// Channel Map Records
// =============================================================================

/// Raw front-end coordinates recovered from an offline channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TpcCoords {
    pub crate_no: u32,
    /// Slot of the WIB, i.e. the table's WIB number minus one
    pub wib: u32,
    pub link: u32,
    pub wibframechan: u32,
}

/// One channel-table record
///
/// `valid` is false only for the placeholder returned on a lookup miss.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChanInfo {
    /// Offline channel number
    pub offline_channel: u32,

    /// Readout crate number
    pub crate_no: u32,

    /// Anode plane assembly name (e.g. "APA_P02SU")
    pub apa_name: String,

    /// WIB number, counted from 1
    pub wib: u32,

    /// Link on the WIB (0 or 1)
    pub link: u32,

    /// FEMB on the link (0 or 1)
    pub femb_on_link: u32,

    /// Cold electronics board channel (0 to 127)
    pub cebchan: u32,

    /// Plane: 0 = U, 1 = V, 2 = X (collection)
    pub plane: u32,

    /// Channel number within the plane
    pub chan_in_plane: u32,

    /// FEMB number on the APA
    pub femb: u32,

    /// ASIC on the FEMB
    pub asic: u32,

    /// Channel within the ASIC
    pub asicchan: u32,

    /// Channel within the WIB frame
    pub wibframechan: u32,

    pub valid: bool,
}

impl ChanInfo {
    /// Placeholder returned when a lookup finds nothing
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Front-end coordinates of this channel, with the WIB reported as a slot
    pub fn tpc_coords(&self) -> TpcCoords {
        TpcCoords {
            crate_no: self.crate_no,
            wib: self.wib.wrapping_sub(1),
            link: self.link,
            wibframechan: self.wibframechan,
        }
    }
}
