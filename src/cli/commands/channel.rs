//! Channel command implementation
//!
//! Builds the requested channel map through the registry and answers one
//! query against it. The share directory comes from `--share-dir` or, failing
//! that, from the environment.

use super::shared::render;
use crate::Result;
use crate::app::models::TpcCoords;
use crate::app::services::channel_map::{ChannelMapRegistry, TpcChannelMap};
use crate::cli::args::{ChannelArgs, ChannelQuery, OutputFormat};
use crate::config::ChannelMapConfig;
use serde_json::json;
use tracing::debug;

/// Channel command runner
pub fn run_channel(args: &ChannelArgs, format: OutputFormat) -> Result<()> {
    let registry = ChannelMapRegistry::with_builtin();

    let output = match &args.query {
        ChannelQuery::List => render(format, &registry.names(), |names| names.join("\n"))?,
        query => {
            let config = build_config(args);
            config.validate()?;
            let channel_map = registry.make_from_config(&config)?;
            execute_query(channel_map.as_ref(), query, format)?
        }
    };

    println!("{}", output);
    Ok(())
}

/// Combine command-line and environment settings into a channel map config
pub fn build_config(args: &ChannelArgs) -> ChannelMapConfig {
    let config = match &args.share_dir {
        Some(share_dir) => ChannelMapConfig::new(share_dir),
        None => ChannelMapConfig::from_env(),
    };
    config.with_detector(&args.detector)
}

/// Answer a channel query, returning the rendered output
pub fn execute_query(
    channel_map: &dyn TpcChannelMap,
    query: &ChannelQuery,
    format: OutputFormat,
) -> Result<String> {
    debug!("Executing {} query: {:?}", channel_map.name(), query);

    match query {
        ChannelQuery::Offline {
            crate_no,
            slot,
            link,
            wibframechan,
        } => {
            let offline = channel_map.get_offline_channel_from_crate_slot_fiber_chan(
                *crate_no,
                *slot,
                *link,
                *wibframechan,
            );
            render(format, &json!({ "offline_channel": offline }), |_| {
                match offline {
                    Some(channel) => channel.to_string(),
                    None => format!(
                        "No offline channel for crate {} slot {} link {} channel {}",
                        crate_no, slot, link, wibframechan
                    ),
                }
            })
        }
        ChannelQuery::Plane { offline_channel } => {
            let plane = channel_map.get_plane_from_offline_channel(*offline_channel);
            render(format, &json!({ "plane": plane }), |_| match plane {
                Some(plane) => plane.to_string(),
                None => format!("Unknown plane for offline channel {}", offline_channel),
            })
        }
        ChannelQuery::Coords { offline_channel } => {
            let coords =
                channel_map.get_crate_slot_fiber_chan_from_offline_channel(*offline_channel);
            render(format, &coords, |coords: &Option<TpcCoords>| match coords {
                Some(c) => format!(
                    "crate={} slot={} link={} wibframechan={}",
                    c.crate_no, c.wib, c.link, c.wibframechan
                ),
                None => format!("No coordinates for offline channel {}", offline_channel),
            })
        }
        ChannelQuery::List => render(format, &[channel_map.name()], |names| names.join("\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::ChanInfo;
    use crate::app::services::channel_map::{Pd2hdChannelMap, Pd2hdChannelTable};
    use std::path::PathBuf;

    fn create_test_map() -> Pd2hdChannelMap {
        Pd2hdChannelMap::from_table(Pd2hdChannelTable::from_records(vec![ChanInfo {
            offline_channel: 800,
            crate_no: 4,
            apa_name: "APA_P02SU".to_string(),
            wib: 3,
            link: 1,
            plane: 1,
            wibframechan: 192,
            valid: true,
            ..ChanInfo::default()
        }]))
    }

    #[test]
    fn test_offline_query() {
        let map = create_test_map();
        let query = ChannelQuery::Offline {
            crate_no: 4,
            slot: 2,
            link: 1,
            wibframechan: 192,
        };

        assert_eq!(
            execute_query(&map, &query, OutputFormat::Human).unwrap(),
            "800"
        );

        let json = execute_query(&map, &query, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["offline_channel"], 800);
    }

    #[test]
    fn test_plane_miss() {
        let map = create_test_map();
        let query = ChannelQuery::Plane { offline_channel: 3 };

        assert_eq!(
            execute_query(&map, &query, OutputFormat::Human).unwrap(),
            "Unknown plane for offline channel 3"
        );

        let json = execute_query(&map, &query, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["plane"].is_null());
    }

    #[test]
    fn test_coords_query() {
        let map = create_test_map();
        let query = ChannelQuery::Coords {
            offline_channel: 800,
        };
        assert_eq!(
            execute_query(&map, &query, OutputFormat::Human).unwrap(),
            "crate=4 slot=2 link=1 wibframechan=192"
        );
    }

    #[test]
    fn test_build_config_prefers_share_dir_arg() {
        let args = ChannelArgs {
            share_dir: Some(PathBuf::from("/opt/share")),
            detector: "PD2HDChannelMap".to_string(),
            query: ChannelQuery::List,
        };
        let config = build_config(&args);
        assert_eq!(config.share_dir, Some(PathBuf::from("/opt/share")));
        assert_eq!(config.detector, "PD2HDChannelMap");
    }
}
