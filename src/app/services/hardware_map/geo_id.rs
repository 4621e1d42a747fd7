//! Geo-id packing
//!
//! A geo-id packs four 16-bit detector coordinates into one `u64`:
//!
//! ```text
//!  63        48 47        32 31        16 15         0
//! +------------+------------+------------+------------+
//! |  det_link  |  det_slot  | det_crate  |   det_id   |
//! +------------+------------+------------+------------+
//! ```

use super::HardwareMapService;
use crate::app::models::{GeoInfo, HwInfo};
use crate::constants::geo_id::{CRATE_SHIFT, DET_ID_SHIFT, FIELD_MASK, LINK_SHIFT, SLOT_SHIFT};

/// Pack detector coordinates into a geo-id
pub fn pack_geo_id(det_link: u16, det_slot: u16, det_crate: u16, det_id: u16) -> u64 {
    (u64::from(det_link) << LINK_SHIFT)
        | (u64::from(det_slot) << SLOT_SHIFT)
        | (u64::from(det_crate) << CRATE_SHIFT)
        | (u64::from(det_id) << DET_ID_SHIFT)
}

/// Unpack a geo-id into detector coordinates
pub fn unpack_geo_id(geo_id: u64) -> GeoInfo {
    GeoInfo {
        det_link: ((geo_id >> LINK_SHIFT) & FIELD_MASK) as u16,
        det_slot: ((geo_id >> SLOT_SHIFT) & FIELD_MASK) as u16,
        det_crate: ((geo_id >> CRATE_SHIFT) & FIELD_MASK) as u16,
        det_id: ((geo_id >> DET_ID_SHIFT) & FIELD_MASK) as u16,
    }
}

/// Keep the low 16 bits of a detector field
fn low_bits(value: u32) -> u16 {
    (u64::from(value) & FIELD_MASK) as u16
}

impl GeoInfo {
    /// Packed geo-id of these coordinates
    pub fn geo_id(&self) -> u64 {
        pack_geo_id(self.det_link, self.det_slot, self.det_crate, self.det_id)
    }
}

impl From<u64> for GeoInfo {
    fn from(geo_id: u64) -> Self {
        unpack_geo_id(geo_id)
    }
}

impl HardwareMapService {
    /// Geo-id of a hardware link
    ///
    /// Detector fields wider than 16 bits are truncated to their low 16 bits.
    pub fn get_geo_id(hw_info: &HwInfo) -> u64 {
        Self::geo_id(
            low_bits(hw_info.det_link),
            low_bits(hw_info.det_slot),
            low_bits(hw_info.det_crate),
            low_bits(hw_info.det_id),
        )
    }

    /// Geo-id of explicit detector coordinates
    pub fn geo_id(det_link: u16, det_slot: u16, det_crate: u16, det_id: u16) -> u64 {
        pack_geo_id(det_link, det_slot, det_crate, det_id)
    }

    /// Detector coordinates of a geo-id
    pub fn parse_geo_id(geo_id: u64) -> GeoInfo {
        unpack_geo_id(geo_id)
    }
}
