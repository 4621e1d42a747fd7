//! Command-line argument definitions for detchannelmaps
//!
//! This module defines the CLI interface using the clap derive API.

use crate::constants::DEFAULT_CHANNEL_MAP;
use crate::{Error, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the detector channel and hardware map tools
///
/// Queries hardware maps (readout links, geo-ids, DRO units) and detector
/// channel maps (offline channels, planes, electronics coordinates).
#[derive(Debug, Clone, Parser)]
#[command(
    name = "detchannelmaps",
    version,
    about = "Query detector channel maps and readout hardware maps"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format for query results
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "human",
        global = true
    )]
    pub format: OutputFormat,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Query a readout hardware map
    Hardware(HardwareArgs),
    /// Query a detector channel map
    Channel(ChannelArgs),
}

/// Arguments for hardware map queries
#[derive(Debug, Clone, Parser)]
pub struct HardwareArgs {
    /// Hardware map file
    ///
    /// Defaults to the file named by DETCHANNELMAPS_HARDWARE_MAP.
    #[arg(short = 'm', long = "map", value_name = "PATH")]
    pub map: Option<PathBuf>,

    /// Read the map as a JSON export instead of whitespace-delimited text
    #[arg(long = "json-input")]
    pub json_input: bool,

    /// Reject short or malformed map lines
    #[arg(long = "strict", conflicts_with = "json_input")]
    pub strict: bool,

    #[command(subcommand)]
    pub query: HardwareQuery,
}

/// Hardware map queries
#[derive(Debug, Clone, Subcommand)]
pub enum HardwareQuery {
    /// Print every link in ascending geo-id order
    Dump,
    /// Print the links fed by a readout source id
    Source { source_id: u32 },
    /// Print the link with a geo-id (decimal or 0x-prefixed hex)
    Geo { geo_id: GeoIdArg },
    /// Pack detector coordinates into a geo-id
    Encode {
        det_link: u16,
        det_slot: u16,
        det_crate: u16,
        det_id: u16,
    },
    /// Unpack a geo-id into detector coordinates
    Decode { geo_id: GeoIdArg },
    /// Print DRO units, or one unit when host and card are given
    Dro {
        #[arg(long = "host", requires = "card")]
        host: Option<String>,
        #[arg(long = "card", requires = "host")]
        card: Option<u16>,
    },
}

/// Arguments for channel map queries
#[derive(Debug, Clone, Parser)]
pub struct ChannelArgs {
    /// Base directory of the channel-map tables
    ///
    /// Defaults to DETCHANNELMAPS_SHARE.
    #[arg(long = "share-dir", value_name = "PATH")]
    pub share_dir: Option<PathBuf>,

    /// Channel map variant
    #[arg(short = 'd', long = "detector", default_value = DEFAULT_CHANNEL_MAP)]
    pub detector: String,

    #[command(subcommand)]
    pub query: ChannelQuery,
}

/// Channel map queries
#[derive(Debug, Clone, Subcommand)]
pub enum ChannelQuery {
    /// Offline channel of an electronics address
    Offline {
        crate_no: u32,
        slot: u32,
        link: u32,
        wibframechan: u32,
    },
    /// Plane of an offline channel
    Plane { offline_channel: u32 },
    /// Electronics address of an offline channel
    Coords { offline_channel: u32 },
    /// List registered channel map variants
    List,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// Geo-id given as decimal or `0x`-prefixed hexadecimal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoIdArg(pub u64);

impl FromStr for GeoIdArg {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
            None => s.replace('_', "").parse(),
        };
        parsed
            .map(GeoIdArg)
            .map_err(|_| Error::configuration(format!("Invalid geo-id '{}'", s)))
    }
}

impl Args {
    /// Get the log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_id_arg_parsing() {
        assert_eq!(GeoIdArg::from_str("42").unwrap(), GeoIdArg(42));
        assert_eq!(
            GeoIdArg::from_str("0x0001_0002_0003_0004").unwrap(),
            GeoIdArg(0x0001_0002_0003_0004)
        );
        assert_eq!(GeoIdArg::from_str(" 0XFF ").unwrap(), GeoIdArg(255));
        assert!(GeoIdArg::from_str("0xzz").is_err());
        assert!(GeoIdArg::from_str("-1").is_err());
        assert!(GeoIdArg::from_str("").is_err());
    }

    #[test]
    fn test_log_levels() {
        let args = Args::try_parse_from(["detchannelmaps", "channel", "list"]).unwrap();
        assert_eq!(args.get_log_level(), "warn");

        let args = Args::try_parse_from(["detchannelmaps", "-vv", "channel", "list"]).unwrap();
        assert_eq!(args.get_log_level(), "debug");

        let args = Args::try_parse_from(["detchannelmaps", "channel", "list", "-q"]).unwrap();
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn test_hardware_args() {
        let args = Args::try_parse_from([
            "detchannelmaps",
            "--format",
            "json",
            "hardware",
            "--map",
            "hw.txt",
            "--strict",
            "dro",
            "--host",
            "node1",
            "--card",
            "2",
        ])
        .unwrap();

        assert_eq!(args.format, OutputFormat::Json);
        match args.command {
            Commands::Hardware(hw) => {
                assert_eq!(hw.map, Some(PathBuf::from("hw.txt")));
                assert!(hw.strict);
                match hw.query {
                    HardwareQuery::Dro { host, card } => {
                        assert_eq!(host.as_deref(), Some("node1"));
                        assert_eq!(card, Some(2));
                    }
                    other => panic!("unexpected query {:?}", other),
                }
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_dro_host_requires_card() {
        assert!(
            Args::try_parse_from(["detchannelmaps", "hardware", "dro", "--host", "node1"])
                .is_err()
        );
    }

    #[test]
    fn test_channel_args_defaults() {
        let args = Args::try_parse_from([
            "detchannelmaps",
            "channel",
            "offline",
            "4",
            "2",
            "1",
            "192",
        ])
        .unwrap();

        match args.command {
            Commands::Channel(ch) => {
                assert_eq!(ch.detector, "PD2HDChannelMap");
                assert!(ch.share_dir.is_none());
                assert!(matches!(
                    ch.query,
                    ChannelQuery::Offline {
                        crate_no: 4,
                        slot: 2,
                        link: 1,
                        wibframechan: 192
                    }
                ));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
