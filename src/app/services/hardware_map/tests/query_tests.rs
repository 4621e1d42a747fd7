//! Tests for hardware map queries

use super::*;
use crate::Error;
use crate::app::models::HardwareMap;
use crate::app::services::hardware_map::HardwareMapService;

fn create_test_service() -> HardwareMapService {
    HardwareMapService::from_hardware_map(&create_test_map())
}

#[test]
fn test_every_geo_id_reachable() {
    let map = create_test_map();
    let service = HardwareMapService::from_hardware_map(&map);

    assert_eq!(service.link_count(), map.len());
    for link in &map.link_infos {
        let found = service.get_hw_info_from_geo_id(HardwareMapService::get_geo_id(link));
        assert_eq!(&found, link);
    }
}

#[test]
fn test_geo_id_miss_returns_flagged_default() {
    let service = create_test_service();
    let missing = service.get_hw_info_from_geo_id(HardwareMapService::geo_id(99, 99, 99, 99));

    assert!(!missing.from_file);
    assert_eq!(missing.dro_source_id, 0);
    assert!(missing.dro_host.is_empty());
    assert!(
        service
            .find_hw_info_by_geo_id(HardwareMapService::geo_id(99, 99, 99, 99))
            .is_none()
    );
}

#[test]
fn test_source_fan_out_in_insertion_order() {
    let service = create_test_service();

    let links = service.get_hw_info_from_source_id(7);
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].det_link, 1);
    assert_eq!(links[1].det_link, 0);

    assert!(service.get_hw_info_from_source_id(999).is_empty());
    assert_eq!(service.source_ids(), vec![7, 8, 9, 10]);
}

#[test]
fn test_dro_grouping() {
    let service = create_test_service();

    let dro = service.get_dro_info("node1", 2).unwrap();
    assert_eq!(dro.host, "node1");
    assert_eq!(dro.card, 2);
    assert_eq!(dro.links.len(), 3);
    assert!(
        dro.links
            .iter()
            .all(|l| l.dro_host == "node1" && l.dro_card == 2)
    );

    // Other units never contain node1/2 links
    for other in service.get_all_dro_info() {
        if (other.host.as_str(), other.card) != ("node1", 2) {
            assert!(other.links.iter().all(|l| l.dro_key() != ("node1", 2)));
        }
    }
}

#[test]
fn test_dro_links_in_ascending_geo_id_order() {
    let service = create_test_service();
    let dro = service.get_dro_info("node1", 2).unwrap();

    let geo_ids: Vec<u64> = dro.links.iter().map(HardwareMapService::get_geo_id).collect();
    let mut sorted = geo_ids.clone();
    sorted.sort_unstable();
    assert_eq!(geo_ids, sorted);

    // Source 10 sits at slot 0 so it leads despite being listed last
    assert_eq!(dro.links[0].dro_source_id, 10);
}

#[test]
fn test_dro_order_independent_of_input_order() {
    let map = create_test_map();
    let mut reversed = map.link_infos.clone();
    reversed.reverse();

    let forward = HardwareMapService::from_hardware_map(&map);
    let backward = HardwareMapService::from_hardware_map(&HardwareMap::new(reversed));

    assert_eq!(forward.get_all_dro_info(), backward.get_all_dro_info());
    assert_eq!(forward.get_hardware_map(), backward.get_hardware_map());
}

#[test]
fn test_unknown_dro_is_error() {
    let service = create_test_service();

    match service.get_dro_info("node3", 2) {
        Err(Error::DroNotFound { host, card }) => {
            assert_eq!(host, "node3");
            assert_eq!(card, 2);
        }
        other => panic!("expected DroNotFound, got {:?}", other),
    }
    assert!(service.get_dro_info("node1", 7).is_err());
}

#[test]
fn test_all_dro_info_sorted_by_host_then_card() {
    let service = create_test_service();
    let keys: Vec<(String, u16)> = service
        .get_all_dro_info()
        .into_iter()
        .map(|d| (d.host, d.card))
        .collect();

    assert_eq!(
        keys,
        vec![
            ("node1".to_string(), 2),
            ("node1".to_string(), 3),
            ("node2".to_string(), 0),
        ]
    );
}

#[test]
fn test_export_same_records_in_geo_id_order() {
    let map = create_test_map();
    let service = HardwareMapService::from_hardware_map(&map);
    let exported = service.get_hardware_map();

    assert_eq!(exported.len(), map.len());
    for link in &map.link_infos {
        assert!(exported.link_infos.contains(link));
    }

    let geo_ids: Vec<u64> = exported
        .link_infos
        .iter()
        .map(HardwareMapService::get_geo_id)
        .collect();
    assert!(geo_ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(geo_ids, service.geo_ids().collect::<Vec<_>>());
}

#[test]
fn test_json_export() {
    let service = create_test_service();
    let json = service.get_hardware_map_json().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let links = value["link_infos"].as_array().unwrap();
    assert_eq!(links.len(), 5);
    assert_eq!(links[0]["dro_source_id"], 10);
    assert_eq!(links[0]["dro_host"], "node1");
    assert!(links[0].get("from_file").is_none());

    let pretty = service.get_hardware_map_json_pretty().unwrap();
    let reparsed = HardwareMapService::from_json_str(&pretty).unwrap();
    assert_eq!(reparsed.get_hardware_map(), service.get_hardware_map());
}

#[test]
fn test_from_hardware_map_keeps_provenance() {
    let mut map = create_test_map();
    map.link_infos[0].from_file = true;

    let service = HardwareMapService::from_hardware_map(&map);
    let first = &map.link_infos[0];
    assert!(
        service
            .get_hw_info_from_geo_id(HardwareMapService::get_geo_id(first))
            .from_file
    );
    assert!(!service.get_hw_info_from_source_id(9)[0].from_file);
}
