//! Hardware map queries
//!
//! All queries are read-only. Misses are reported without errors except for
//! [`HardwareMapService::get_dro_info`], where an unknown host/card pair means
//! the configuration is inconsistent.

use super::HardwareMapService;
use crate::app::models::{DroInfo, HardwareMap, HwInfo};
use crate::{Error, Result};

impl HardwareMapService {
    /// Export every link in ascending geo-id order
    pub fn get_hardware_map(&self) -> HardwareMap {
        HardwareMap::new(self.geo_id_to_info.values().cloned().collect())
    }

    /// Export every link in ascending geo-id order as JSON
    pub fn get_hardware_map_json(&self) -> Result<String> {
        serde_json::to_string(&self.get_hardware_map())
            .map_err(|e| Error::json("Failed to serialize hardware map", e))
    }

    /// Export every link as indented JSON
    pub fn get_hardware_map_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.get_hardware_map())
            .map_err(|e| Error::json("Failed to serialize hardware map", e))
    }

    /// Links fed by a readout source, in insertion order
    ///
    /// An empty slice means the source id is not mapped.
    pub fn get_hw_info_from_source_id(&self, dro_source_id: u32) -> &[HwInfo] {
        self.source_id_to_infos
            .get(&dro_source_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Link with the given geo-id
    ///
    /// Returns a zero-valued record with `from_file == false` when nothing
    /// matches; callers must check the flag.
    pub fn get_hw_info_from_geo_id(&self, geo_id: u64) -> HwInfo {
        self.find_hw_info_by_geo_id(geo_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Link with the given geo-id, if any
    pub fn find_hw_info_by_geo_id(&self, geo_id: u64) -> Option<&HwInfo> {
        self.geo_id_to_info.get(&geo_id)
    }

    /// All DRO units ordered by host, then card
    pub fn get_all_dro_info(&self) -> Vec<DroInfo> {
        self.dro_infos.values().cloned().collect()
    }

    /// DRO unit for a host/card pair
    ///
    /// # Errors
    /// * Returns `Error::DroNotFound` if no link uses the pair
    pub fn get_dro_info(&self, host_name: &str, dro_card: u16) -> Result<&DroInfo> {
        self.dro_infos
            .get(&(host_name.to_string(), dro_card))
            .ok_or_else(|| Error::dro_not_found(host_name, dro_card))
    }

    /// Number of distinct geo-ids
    pub fn link_count(&self) -> usize {
        self.geo_id_to_info.len()
    }

    /// Number of DRO units
    pub fn dro_count(&self) -> usize {
        self.dro_infos.len()
    }

    /// Mapped readout source ids in ascending order
    pub fn source_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.source_id_to_infos.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Indexed geo-ids in ascending order
    pub fn geo_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.geo_id_to_info.keys().copied()
    }
}
