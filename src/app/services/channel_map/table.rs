//! PD2HD channel table
//!
//! The table file has one channel per line with thirteen whitespace-separated
//! fields:
//!
//! ```text
//! offlchan crate APAName wib link femb_on_link cebchan plane chan_in_plane femb asic asicchan wibframechan
//! ```
//!
//! Unlike the hardware map, any short or malformed line fails the load.

use crate::app::models::ChanInfo;
use crate::constants::{COMMENT_MARKER, pd2hd};
use crate::{Error, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};
use tracing::{debug, info};

/// Key of the electronics index: (crate, wib, link, wibframechan)
type WibKey = (u32, u32, u32, u32);

/// Channel table indexed by offline channel and by WIB elements
#[derive(Debug, Clone, Default)]
pub struct Pd2hdChannelTable {
    wib_to_chan_info: HashMap<WibKey, ChanInfo>,
    offline_to_chan_info: HashMap<u32, ChanInfo>,
}

impl Pd2hdChannelTable {
    /// Read and index a channel table file
    ///
    /// # Errors
    /// * Returns `Error::FileNotFound` if the file cannot be opened
    /// * Returns `Error::Io` if reading fails part way through
    /// * Returns `Error::ChannelMapFormat` for malformed lines or offline
    ///   channels outside the detector
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Reading channel map table: {}", path.display());

        let file = File::open(path).map_err(|e| {
            debug!("Failed to open channel map {}: {}", path.display(), e);
            Error::file_not_found(path)
        })?;

        let mut table = Self::default();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                Error::io(
                    format!("Failed reading line {} of {}", index + 1, path.display()),
                    e,
                )
            })?;

            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
                continue;
            }

            let chan_info = parse_chan_info(trimmed)
                .map_err(|message| Error::channel_map_format(path, index + 1, message))?;
            table.insert(chan_info);
        }

        info!(
            "Channel map table loaded: {} channels from {}",
            table.channel_count(),
            path.display()
        );
        Ok(table)
    }

    /// Build a table from already validated records
    pub fn from_records(records: impl IntoIterator<Item = ChanInfo>) -> Self {
        let mut table = Self::default();
        for record in records {
            table.insert(record);
        }
        table
    }

    fn insert(&mut self, chan_info: ChanInfo) {
        let key = (
            chan_info.crate_no,
            chan_info.wib,
            chan_info.link,
            chan_info.wibframechan,
        );
        if self.offline_to_chan_info.contains_key(&chan_info.offline_channel) {
            debug!(
                "Offline channel {} listed twice, keeping the later entry",
                chan_info.offline_channel
            );
        }
        self.wib_to_chan_info.insert(key, chan_info.clone());
        self.offline_to_chan_info
            .insert(chan_info.offline_channel, chan_info);
    }

    /// Channel record for a raw electronics address
    ///
    /// `slot` counts from 0 while the table counts WIBs from 1. Returns an
    /// invalid record when the address is not mapped.
    pub fn chan_info_from_wib_elements(
        &self,
        crate_no: u32,
        slot: u32,
        link: u32,
        wibframechan: u32,
    ) -> ChanInfo {
        let wib = slot.wrapping_add(1);
        self.wib_to_chan_info
            .get(&(crate_no, wib, link, wibframechan))
            .cloned()
            .unwrap_or_else(ChanInfo::invalid)
    }

    /// Channel record for an offline channel
    ///
    /// Returns an invalid record when the channel is not mapped.
    pub fn chan_info_from_offline_channel(&self, offline_channel: u32) -> ChanInfo {
        self.offline_to_chan_info
            .get(&offline_channel)
            .cloned()
            .unwrap_or_else(ChanInfo::invalid)
    }

    /// Number of offline channels in the table
    pub fn channel_count(&self) -> usize {
        self.offline_to_chan_info.len()
    }

    /// Offline channels on a plane, in ascending order
    pub fn offline_channels_in_plane(&self, plane: u32) -> Vec<u32> {
        let mut channels: Vec<u32> = self
            .offline_to_chan_info
            .values()
            .filter(|info| info.plane == plane)
            .map(|info| info.offline_channel)
            .collect();
        channels.sort_unstable();
        channels
    }
}

/// Parse one table line into a valid channel record
fn parse_chan_info(line: &str) -> std::result::Result<ChanInfo, String> {
    let mut tokens = line.split_whitespace();

    let offline_channel = next_field(&mut tokens, "offlchan")?;
    let crate_no = next_field(&mut tokens, "crate")?;
    let apa_name = tokens
        .next()
        .ok_or_else(|| "missing field 'APAName'".to_string())?
        .to_string();

    let chan_info = ChanInfo {
        offline_channel,
        crate_no,
        apa_name,
        wib: next_field(&mut tokens, "wib")?,
        link: next_field(&mut tokens, "link")?,
        femb_on_link: next_field(&mut tokens, "femb_on_link")?,
        cebchan: next_field(&mut tokens, "cebchan")?,
        plane: next_field(&mut tokens, "plane")?,
        chan_in_plane: next_field(&mut tokens, "chan_in_plane")?,
        femb: next_field(&mut tokens, "femb")?,
        asic: next_field(&mut tokens, "asic")?,
        asicchan: next_field(&mut tokens, "asicchan")?,
        wibframechan: next_field(&mut tokens, "wibframechan")?,
        valid: true,
    };

    let extra = tokens.count();
    if extra > 0 {
        return Err(format!(
            "expected {} fields, found {} extra",
            pd2hd::FIELDS_PER_LINE,
            extra
        ));
    }

    if chan_info.offline_channel >= pd2hd::CHANNEL_COUNT {
        return Err(format!(
            "offline channel {} out of range (detector has {} channels)",
            chan_info.offline_channel,
            pd2hd::CHANNEL_COUNT
        ));
    }

    Ok(chan_info)
}

fn next_field<T: FromStr>(
    tokens: &mut SplitWhitespace<'_>,
    name: &str,
) -> std::result::Result<T, String> {
    let token = tokens
        .next()
        .ok_or_else(|| format!("missing field '{}'", name))?;
    token
        .parse()
        .map_err(|_| format!("invalid value '{}' for field '{}'", token, name))
}
