//! Hardware map service for readout link lookups
//!
//! This module provides a read-only lookup service over a list of hardware
//! links. From one source list it derives three indexes:
//!
//! - geo-id → link (unique, ordered by ascending geo-id)
//! - readout source id → links (one-to-many, insertion order)
//! - (host, card) → DRO unit (links grouped in ascending geo-id order)
//!
//! The indexes are built once at construction and never mutated afterwards,
//! so a service can be shared freely between readers.

use crate::app::models::{DroInfo, HardwareMap, HwInfo};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

pub mod geo_id;
pub mod loader;
pub mod metadata;
pub mod parser;
pub mod query;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use geo_id::{pack_geo_id, unpack_geo_id};
pub use metadata::LoadStats;

/// Hardware map service providing geo-id, source-id and DRO lookups
#[derive(Debug, Clone, Default)]
pub struct HardwareMapService {
    /// Links indexed by packed geo-id
    pub(crate) geo_id_to_info: BTreeMap<u64, HwInfo>,

    /// Links indexed by readout source id, in insertion order
    pub(crate) source_id_to_infos: HashMap<u32, Vec<HwInfo>>,

    /// DRO units indexed by (host, card)
    pub(crate) dro_infos: BTreeMap<(String, u16), DroInfo>,
}

impl HardwareMapService {
    /// Build the service from an in-memory hardware map
    ///
    /// Records keep whatever provenance flag they already carry.
    pub fn from_hardware_map(map: &HardwareMap) -> Self {
        let mut service = Self::default();
        service.setup_maps(map);
        service
    }

    /// Rebuild every index from `map`
    fn setup_maps(&mut self, map: &HardwareMap) {
        self.geo_id_to_info.clear();
        self.source_id_to_infos.clear();
        self.dro_infos.clear();

        for hw_info in &map.link_infos {
            if hw_info.has_wide_geo_fields() {
                warn!(
                    "Link for source {} has detector fields wider than 16 bits, geo-id will be truncated",
                    hw_info.dro_source_id
                );
            }

            let geo_id = Self::get_geo_id(hw_info);
            if let Some(previous) = self.geo_id_to_info.insert(geo_id, hw_info.clone()) {
                warn!(
                    "Duplicate geo-id {:#018x}: source {} replaces source {}",
                    geo_id, hw_info.dro_source_id, previous.dro_source_id
                );
            }

            self.source_id_to_infos
                .entry(hw_info.dro_source_id)
                .or_default()
                .push(hw_info.clone());
        }

        // DRO is defined by a host-card pair; links are grouped in geo-id order
        for hw_info in self.geo_id_to_info.values() {
            let key = (hw_info.dro_host.clone(), hw_info.dro_card);
            match self.dro_infos.get_mut(&key) {
                Some(dro) => dro.links.push(hw_info.clone()),
                None => {
                    self.dro_infos
                        .insert(key, DroInfo::from_link(hw_info.clone()));
                }
            }
        }

        debug!(
            "Hardware map indexed: {} links, {} source ids, {} DRO units",
            self.geo_id_to_info.len(),
            self.source_id_to_infos.len(),
            self.dro_infos.len()
        );
    }
}

impl From<&HardwareMap> for HardwareMapService {
    fn from(map: &HardwareMap) -> Self {
        Self::from_hardware_map(map)
    }
}
