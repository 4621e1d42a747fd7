//! Hardware command implementation
//!
//! Loads a hardware map (text or JSON) and answers one query against it.

use super::shared::render;
use crate::app::models::{DroInfo, GeoInfo, HwInfo};
use crate::app::services::hardware_map::HardwareMapService;
use crate::app::services::hardware_map::parser::FIELD_NAMES;
use crate::cli::args::{HardwareArgs, HardwareQuery, OutputFormat};
use crate::config::HardwareMapConfig;
use crate::constants::HARDWARE_MAP_ENV;
use crate::{Error, Result};
use serde_json::json;
use std::path::PathBuf;
use tracing::{debug, info};

/// Hardware command runner
pub fn run_hardware(args: &HardwareArgs, format: OutputFormat) -> Result<()> {
    let output = match &args.query {
        HardwareQuery::Encode {
            det_link,
            det_slot,
            det_crate,
            det_id,
        } => encode_geo_id(*det_link, *det_slot, *det_crate, *det_id, format)?,
        HardwareQuery::Decode { geo_id } => decode_geo_id(geo_id.0, format)?,
        query => {
            let service = load_service(args)?;
            execute_query(&service, query, format)?
        }
    };

    println!("{}", output);
    Ok(())
}

/// Load the hardware map named by the arguments or the environment
pub fn load_service(args: &HardwareArgs) -> Result<HardwareMapService> {
    let path = resolve_map_path(args)?;

    if args.json_input {
        return HardwareMapService::from_json_file(&path);
    }

    let config = HardwareMapConfig::new(path).with_strict(args.strict);
    let (service, stats) = HardwareMapService::load_with_stats(&config)?;
    info!("{}", stats.summary());
    Ok(service)
}

fn resolve_map_path(args: &HardwareArgs) -> Result<PathBuf> {
    if let Some(path) = &args.map {
        return Ok(path.clone());
    }
    HardwareMapConfig::from_env()
        .map(|config| config.path)
        .ok_or_else(|| {
            Error::configuration(format!(
                "No hardware map given: use --map or set {}",
                HARDWARE_MAP_ENV
            ))
        })
}

/// Answer a map query, returning the rendered output
pub fn execute_query(
    service: &HardwareMapService,
    query: &HardwareQuery,
    format: OutputFormat,
) -> Result<String> {
    debug!("Executing hardware query: {:?}", query);

    match query {
        HardwareQuery::Dump => match format {
            OutputFormat::Json => service.get_hardware_map_json_pretty(),
            OutputFormat::Human => Ok(format_links(&service.get_hardware_map().link_infos)),
        },
        HardwareQuery::Source { source_id } => {
            let links = service.get_hw_info_from_source_id(*source_id);
            render(format, &links, |links| {
                if links.is_empty() {
                    format!("No links for source id {}", source_id)
                } else {
                    format_links(links)
                }
            })
        }
        HardwareQuery::Geo { geo_id } => {
            let link = service.find_hw_info_by_geo_id(geo_id.0);
            render(format, &link, |link| match link {
                Some(link) => format_links(std::slice::from_ref(*link)),
                None => format!("No link for geo-id {:#018x}", geo_id.0),
            })
        }
        HardwareQuery::Dro {
            host: Some(host),
            card: Some(card),
        } => {
            let dro = service.get_dro_info(host, *card)?;
            render(format, dro, format_dro)
        }
        HardwareQuery::Dro { .. } => {
            let dros = service.get_all_dro_info();
            render(format, &dros, |dros| {
                dros.iter().map(format_dro).collect::<Vec<_>>().join("\n")
            })
        }
        HardwareQuery::Encode {
            det_link,
            det_slot,
            det_crate,
            det_id,
        } => encode_geo_id(*det_link, *det_slot, *det_crate, *det_id, format),
        HardwareQuery::Decode { geo_id } => decode_geo_id(geo_id.0, format),
    }
}

fn encode_geo_id(
    det_link: u16,
    det_slot: u16,
    det_crate: u16,
    det_id: u16,
    format: OutputFormat,
) -> Result<String> {
    let geo_id = HardwareMapService::geo_id(det_link, det_slot, det_crate, det_id);
    render(format, &json!({ "geo_id": geo_id }), |_| {
        format!("{:#018x} ({})", geo_id, geo_id)
    })
}

fn decode_geo_id(geo_id: u64, format: OutputFormat) -> Result<String> {
    let geo = HardwareMapService::parse_geo_id(geo_id);
    render(format, &geo, |geo: &GeoInfo| {
        format!(
            "det_link={} det_slot={} det_crate={} det_id={}",
            geo.det_link, geo.det_slot, geo.det_crate, geo.det_id
        )
    })
}

/// Format links in the hardware-map text layout, with a header comment
fn format_links(links: &[HwInfo]) -> String {
    let mut lines = Vec::with_capacity(links.len() + 1);
    lines.push(format!("# {}", FIELD_NAMES.join(" ")));
    lines.extend(links.iter().map(HwInfo::to_string));
    lines.join("\n")
}

fn format_dro(dro: &DroInfo) -> String {
    let mut lines = vec![format!("{}/{}: {} links", dro.host, dro.card, dro.links.len())];
    lines.extend(dro.links.iter().map(|link| format!("  {}", link)));
    lines.join("\n")
}
