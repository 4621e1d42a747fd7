//! ProtoDUNE-II horizontal drift channel map

use super::TpcChannelMap;
use super::table::Pd2hdChannelTable;
use crate::Result;
use crate::app::models::TpcCoords;
use crate::config::ChannelMapConfig;
use crate::constants::pd2hd;
use std::path::Path;
use tracing::debug;

/// PD2HD channel map owning its channel table
///
/// Not `Clone`: each instance owns one table exclusively.
#[derive(Debug)]
pub struct Pd2hdChannelMap {
    table: Pd2hdChannelTable,
}

impl Pd2hdChannelMap {
    /// Load the versioned PD2HD table from the configured share directory
    ///
    /// # Errors
    /// * Returns `Error::Configuration` if no share directory is configured
    /// * Returns `Error::FileNotFound`, `Error::Io` or
    ///   `Error::ChannelMapFormat` if the table cannot be read
    pub fn new(config: &ChannelMapConfig) -> Result<Self> {
        let table_path = config.pd2hd_table_path()?;
        Self::from_table_file(&table_path)
    }

    /// Load a PD2HD table from an explicit path
    pub fn from_table_file(path: &Path) -> Result<Self> {
        let map = Self::from_table(Pd2hdChannelTable::read_from_file(path)?);
        debug!("{} created from {}", pd2hd::NAME, path.display());
        Ok(map)
    }

    /// Wrap an already loaded table
    pub fn from_table(table: Pd2hdChannelTable) -> Self {
        Self { table }
    }

    /// Underlying channel table
    pub fn table(&self) -> &Pd2hdChannelTable {
        &self.table
    }
}

impl TpcChannelMap for Pd2hdChannelMap {
    fn name(&self) -> &'static str {
        pd2hd::NAME
    }

    fn get_offline_channel_from_crate_slot_fiber_chan(
        &self,
        crate_no: u32,
        slot: u32,
        link: u32,
        wibframechan: u32,
    ) -> Option<u32> {
        let chan_info = self
            .table
            .chan_info_from_wib_elements(crate_no, slot, link, wibframechan);
        chan_info.valid.then_some(chan_info.offline_channel)
    }

    fn get_plane_from_offline_channel(&self, offline_channel: u32) -> Option<u32> {
        let chan_info = self.table.chan_info_from_offline_channel(offline_channel);
        chan_info.valid.then_some(chan_info.plane)
    }

    fn get_crate_slot_fiber_chan_from_offline_channel(
        &self,
        offline_channel: u32,
    ) -> Option<TpcCoords> {
        let chan_info = self.table.chan_info_from_offline_channel(offline_channel);
        chan_info.valid.then(|| chan_info.tpc_coords())
    }
}
