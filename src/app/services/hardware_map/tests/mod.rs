//! Shared test utilities and fixtures for hardware map tests

use crate::app::models::{HardwareMap, HwInfo};
use std::fs;
use std::path::{Path, PathBuf};

pub mod geo_id_tests;
pub mod query_tests;

/// Create a hardware link with the given detector and readout coordinates
#[allow(clippy::too_many_arguments)]
pub fn create_test_link(
    source_id: u32,
    link: u32,
    slot: u32,
    crate_no: u32,
    host: &str,
    card: u16,
    slr: u16,
    dro_link: u16,
) -> HwInfo {
    HwInfo::new(source_id, link, slot, crate_no, 3, host, card, slr, dro_link)
}

/// Small map spanning two hosts, three DRO units and a fanned-out source id
///
/// Records are deliberately not in geo-id order.
pub fn create_test_map() -> HardwareMap {
    HardwareMap::new(vec![
        create_test_link(7, 1, 2, 1, "node1", 2, 0, 1),
        create_test_link(7, 0, 2, 1, "node1", 2, 0, 0),
        create_test_link(8, 0, 3, 1, "node1", 3, 1, 0),
        create_test_link(9, 5, 0, 2, "node2", 0, 0, 5),
        create_test_link(10, 0, 0, 1, "node1", 2, 1, 2),
    ])
}

/// Hardware-map text matching `create_test_map`, with comments and blanks
pub const TEST_MAP_TEXT: &str = "\
# dro_source_id det_link det_slot det_crate det_id dro_host dro_card dro_slr dro_link
7 1 2 1 3 node1 2 0 1
7 0 2 1 3 node1 2 0 0

   # indented comment
8 0 3 1 3 node1 3 1 0
9 5 0 2 3 node2 0 0 5
\t
10 0 0 1 3 node1 2 1 2
";

/// Write a hardware-map file into `dir`
pub fn create_test_map_file(dir: &Path, filename: &str, content: &str) -> std::io::Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Compare links ignoring provenance
pub fn assert_links_equal(actual: &HwInfo, expected: &HwInfo) {
    assert_eq!(actual.dro_source_id, expected.dro_source_id);
    assert_eq!(actual.det_link, expected.det_link);
    assert_eq!(actual.det_slot, expected.det_slot);
    assert_eq!(actual.det_crate, expected.det_crate);
    assert_eq!(actual.det_id, expected.det_id);
    assert_eq!(actual.dro_host, expected.dro_host);
    assert_eq!(actual.dro_card, expected.dro_card);
    assert_eq!(actual.dro_slr, expected.dro_slr);
    assert_eq!(actual.dro_link, expected.dro_link);
}
