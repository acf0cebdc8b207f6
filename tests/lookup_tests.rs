mod support;

use mmdb::{MmdbError, PathOutcome, Value};

#[test]
fn longest_prefix_match_picks_the_more_specific_record() {
    let reader = mmdb::Reader::from_bytes(support::two_node_v4_database()).unwrap();

    let hit_a = reader.lookup_string("0.1.2.3").unwrap();
    assert!(hit_a.found);
    assert_eq!(hit_a.netmask, 2);
    assert_eq!(
        hit_a.entry.get_value(&["name"]).unwrap(),
        PathOutcome::Found(Value::String("A"))
    );

    let hit_b = reader.lookup_string("200.1.2.3").unwrap();
    assert!(hit_b.found);
    assert_eq!(hit_b.netmask, 1);
    assert_eq!(
        hit_b.entry.get_value(&["name"]).unwrap(),
        PathOutcome::Found(Value::String("B"))
    );
}

#[test]
fn address_in_the_unmapped_gap_is_not_found() {
    let reader = mmdb::Reader::from_bytes(support::two_node_v4_database()).unwrap();
    // 64.0.0.0 starts with bits "01" -> node0.left, node1.right -> not found.
    let result = reader.lookup_string("64.0.0.0").unwrap();
    assert!(!result.found);
}

#[test]
fn nested_path_navigation_through_map_and_array() {
    let reader = mmdb::Reader::from_bytes(support::single_node_v6_database_with_nested_record()).unwrap();
    let result = reader.lookup_string("2001:db8::1").unwrap();
    assert!(result.found);

    assert_eq!(
        result.entry.get_value(&["country", "iso_code"]).unwrap(),
        PathOutcome::Found(Value::String("US"))
    );
    assert_eq!(
        result.entry.get_value(&["names", "-1"]).unwrap(),
        PathOutcome::Found(Value::String("b"))
    );
    assert_eq!(result.entry.get_value(&["missing"]).unwrap(), PathOutcome::NotFound);
}

#[test]
fn ipv4_embedded_in_ipv6_database_resolves_via_96_bit_prefix() {
    let reader = mmdb::Reader::from_bytes(support::single_node_v6_database_with_nested_record()).unwrap();
    // The fixture's tree has no dedicated ::ffff:0:0/96 subtree, so an
    // IPv4-mapped lookup walks all 96 zero bits straight into the same
    // single node and resolves identically to a native v6 lookup.
    let v4_result = reader.lookup_string("0.0.0.1").unwrap();
    assert!(v4_result.found);
    assert_eq!(
        v4_result.entry.get_value(&["country", "iso_code"]).unwrap(),
        PathOutcome::Found(Value::String("US"))
    );
}

#[test]
fn v4_only_database_rejects_v6_lookup() {
    let reader = mmdb::Reader::from_bytes(support::two_node_v4_database()).unwrap();
    let result = reader.lookup_string("::1");
    assert!(matches!(result, Err(MmdbError::Ipv6LookupInIpv4Database)));
}

#[test]
fn entry_data_list_materializes_whole_record_depth_first() {
    let reader = mmdb::Reader::from_bytes(support::single_node_v6_database_with_nested_record()).unwrap();
    let result = reader.lookup_string("::").unwrap();
    let list = result.entry.get_entry_data_list().unwrap();

    let text = mmdb::dump::pretty_print(&list);
    assert!(text.contains("country"));
    assert!(text.contains("iso_code"));
    assert!(text.contains("US"));
    assert!(text.contains("names"));
}

#[test]
fn pretty_printed_record_round_trips_through_the_parser() {
    let reader = mmdb::Reader::from_bytes(support::single_node_v6_database_with_nested_record()).unwrap();
    let result = reader.lookup_string("::").unwrap();
    let list = result.entry.get_entry_data_list().unwrap();

    let printed = mmdb::dump::pretty_print(&list);
    let parsed = mmdb::dump::parse_pretty(&printed).unwrap();
    let reprinted = mmdb::dump::to_owned(&list);
    assert_eq!(parsed, reprinted);
}
