//! Hardware map loading from text and JSON files

use super::HardwareMapService;
use super::metadata::LoadStats;
use super::parser::{LineKind, classify_line, parse_hardware_line};
use crate::app::models::HardwareMap;
use crate::config::HardwareMapConfig;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

impl HardwareMapService {
    /// Build the service from a whitespace-delimited hardware-map file
    ///
    /// Short or malformed lines are tolerated: fields after the first bad
    /// token keep their default values.
    ///
    /// # Errors
    /// * Returns `Error::FileNotFound` if the file cannot be opened
    /// * Returns `Error::Io` if reading fails part way through
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_config(&HardwareMapConfig::new(path.as_ref()))
    }

    /// Build the service as described by a hardware-map configuration
    pub fn from_config(config: &HardwareMapConfig) -> Result<Self> {
        Self::load_with_stats(config).map(|(service, _)| service)
    }

    /// Build the service from a file and report loading statistics
    ///
    /// # Errors
    /// * Returns `Error::Configuration` if the configuration is invalid
    /// * Returns `Error::FileNotFound` if the file cannot be opened
    /// * Returns `Error::Io` if reading fails part way through
    /// * Returns `Error::HardwareMapFormat` for incomplete lines in strict mode
    pub fn load_with_stats(config: &HardwareMapConfig) -> Result<(Self, LoadStats)> {
        config.validate()?;
        info!("Loading hardware map from: {}", config.path.display());

        let start_time = Instant::now();
        let mut stats = LoadStats::new();

        let map = Self::read_hardware_map(&config.path, config.strict, &mut stats)?;
        let service = Self::from_hardware_map(&map);

        stats.links_indexed = service.link_count();
        stats.dro_units = service.dro_count();
        stats.load_duration = start_time.elapsed();

        if stats.duplicate_geo_ids() > 0 {
            warn!(
                "{} records in {} collided on geo-id and were overwritten",
                stats.duplicate_geo_ids(),
                config.path.display()
            );
        }
        info!("Hardware map loaded: {}", stats.summary());

        Ok((service, stats))
    }

    /// Read the records of a hardware-map file in file order
    pub fn read_hardware_map(
        path: &Path,
        strict: bool,
        stats: &mut LoadStats,
    ) -> Result<HardwareMap> {
        let file = File::open(path).map_err(|e| {
            debug!("Failed to open hardware map {}: {}", path.display(), e);
            Error::file_not_found(path)
        })?;

        let mut map = HardwareMap::default();

        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                Error::io(
                    format!("Failed reading line {} of {}", index + 1, path.display()),
                    e,
                )
            })?;
            let line_number = index + 1;
            stats.lines_read += 1;

            let record = match classify_line(&line) {
                LineKind::Blank => {
                    stats.blank_lines += 1;
                    continue;
                }
                LineKind::Comment => {
                    stats.comment_lines += 1;
                    continue;
                }
                LineKind::Record(record) => record,
            };

            let parsed = parse_hardware_line(record);

            if !parsed.is_complete() {
                let missing = parsed.first_missing_field().unwrap_or("unknown");
                if strict {
                    return Err(Error::hardware_map_format(
                        path,
                        line_number,
                        format!(
                            "expected 9 fields, field '{}' is missing or malformed",
                            missing
                        ),
                    ));
                }
                warn!(
                    "{}:{}: field '{}' is missing or malformed, remaining fields defaulted",
                    path.display(),
                    line_number,
                    missing
                );
                stats.short_lines += 1;
            } else if parsed.trailing_tokens > 0 {
                if strict {
                    return Err(Error::hardware_map_format(
                        path,
                        line_number,
                        format!("{} unexpected tokens after field 9", parsed.trailing_tokens),
                    ));
                }
                debug!(
                    "{}:{}: ignoring {} trailing tokens",
                    path.display(),
                    line_number,
                    parsed.trailing_tokens
                );
                stats.lines_with_trailing_tokens += 1;
            }

            map.link_infos.push(parsed.info);
            stats.records_loaded += 1;
        }

        Ok(map)
    }

    /// Build the service from a JSON hardware-map document
    ///
    /// Imported records carry `from_file = false`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let map: HardwareMap = serde_json::from_str(json)
            .map_err(|e| Error::json("Failed to parse hardware map JSON", e))?;
        Ok(Self::from_hardware_map(&map))
    }

    /// Build the service from a JSON hardware-map file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading hardware map JSON from: {}", path.display());

        let json = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::file_not_found(path)
            } else {
                Error::io(format!("Failed to read {}", path.display()), e)
            }
        })?;
        Self::from_json_str(&json)
    }
}
