//! TPC channel maps
//!
//! A channel map translates between raw front-end addressing
//! (crate, slot, link, channel in the WIB frame) and offline channel numbers.
//! Each detector variant implements [`TpcChannelMap`] over its own channel
//! table, and variants are looked up by name through a
//! [`ChannelMapRegistry`].

use crate::app::models::TpcCoords;

pub mod pd2hd;
pub mod registry;
pub mod table;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use pd2hd::Pd2hdChannelMap;
pub use registry::{ChannelMapFactory, ChannelMapRegistry, make_channel_map};
pub use table::Pd2hdChannelTable;

/// Query interface shared by every detector channel map
///
/// Misses are reported as `None` rather than sentinel values.
pub trait TpcChannelMap: Send + Sync {
    /// Registry name of this channel map
    fn name(&self) -> &'static str;

    /// Offline channel for a raw electronics address
    fn get_offline_channel_from_crate_slot_fiber_chan(
        &self,
        crate_no: u32,
        slot: u32,
        link: u32,
        wibframechan: u32,
    ) -> Option<u32>;

    /// Plane of an offline channel
    fn get_plane_from_offline_channel(&self, offline_channel: u32) -> Option<u32>;

    /// Raw electronics address of an offline channel
    fn get_crate_slot_fiber_chan_from_offline_channel(
        &self,
        offline_channel: u32,
    ) -> Option<TpcCoords>;
}
