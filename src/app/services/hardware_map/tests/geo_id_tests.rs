//! Tests for geo-id packing and unpacking

use super::*;
use crate::app::models::GeoInfo;
use crate::app::services::hardware_map::{HardwareMapService, pack_geo_id, unpack_geo_id};

#[test]
fn test_field_positions() {
    assert_eq!(pack_geo_id(1, 0, 0, 0), 1 << 48);
    assert_eq!(pack_geo_id(0, 1, 0, 0), 1 << 32);
    assert_eq!(pack_geo_id(0, 0, 1, 0), 1 << 16);
    assert_eq!(pack_geo_id(0, 0, 0, 1), 1);
    assert_eq!(
        HardwareMapService::geo_id(0x1234, 0x5678, 0x9abc, 0xdef0),
        0x1234_5678_9abc_def0
    );
}

#[test]
fn test_round_trip_boundaries() {
    let samples = [0u16, 1, 255, 256, 0x7fff, 0x8000, u16::MAX];
    for &link in &samples {
        for &slot in &samples {
            for &crate_no in &samples {
                for &det_id in &samples {
                    let geo = HardwareMapService::parse_geo_id(HardwareMapService::geo_id(
                        link, slot, crate_no, det_id,
                    ));
                    assert_eq!(
                        geo,
                        GeoInfo {
                            det_link: link,
                            det_slot: slot,
                            det_crate: crate_no,
                            det_id,
                        }
                    );
                }
            }
        }
    }
}

#[test]
fn test_unpack_then_pack_is_identity() {
    for geo_id in [0u64, 1, u64::MAX, 0x0001_0002_0003_0004, 0xdead_beef_cafe_f00d] {
        assert_eq!(unpack_geo_id(geo_id).geo_id(), geo_id);
        assert_eq!(GeoInfo::from(geo_id).geo_id(), geo_id);
    }
}

#[test]
fn test_hw_info_geo_id_matches_fields() {
    let link = create_test_link(7, 1, 2, 1, "node1", 2, 0, 1);
    assert_eq!(
        HardwareMapService::get_geo_id(&link),
        HardwareMapService::geo_id(1, 2, 1, 3)
    );
}

#[test]
fn test_wide_fields_are_truncated() {
    let mut link = create_test_link(7, 1, 2, 1, "node1", 2, 0, 1);
    link.det_slot = 0x1_0002;

    let geo = HardwareMapService::parse_geo_id(HardwareMapService::get_geo_id(&link));
    assert_eq!(geo.det_slot, 2);
    assert_eq!(geo.det_link, 1);
}
