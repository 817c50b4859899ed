use parcelbeam::config::FieldMap;
use parcelbeam::record::{Feature, GroupKey};
use parcelbeam::testing::*;
use parcelbeam::{chunk, partition, partition_by_field, sorted_chunk};

fn owners(names: &[&str]) -> Vec<Feature> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| FeatureBuilder::new().prop("owner", *name).prop("seq", i).build())
        .collect()
}

#[test]
fn groups_are_total_and_first_seen_ordered() {
    let records = owners(&["b", "a", "b", "c", "a", "b"]);
    let groups = partition_by_field(&records, "owner", "Unknown");

    assert_partition_total(&groups, &records);
    assert_group_order(&groups, &["b", "a", "c"]);
    assert_group_sizes(&groups, &[3, 2, 1]);
    assert_eq!(groups.record_count(), records.len());
}

#[test]
fn records_keep_input_order_within_a_group() {
    let records = owners(&["x", "y", "x", "x"]);
    let groups = partition_by_field(&records, "owner", "Unknown");
    let seq: Vec<String> = groups
        .get("x")
        .unwrap_or_default()
        .iter()
        .filter_map(|f| f.text("seq"))
        .collect();
    assert_eq!(seq, ["0", "2", "3"]);
}

#[test]
fn absent_field_uses_the_default_key() {
    let records = vec![
        FeatureBuilder::new().prop("owner", "Alice").build(),
        FeatureBuilder::new().build(),
        FeatureBuilder::new().prop("owner", serde_json::Value::Null).build(),
    ];
    let groups = partition_by_field(&records, "owner", "Unknown");
    assert_group_order(&groups, &["Alice", "Unknown"]);
    assert_group_sizes(&groups, &[1, 2]);
}

#[test]
fn numeric_and_string_years_share_a_group() {
    let records = vec![
        FeatureBuilder::new().prop("year", 2020).build(),
        FeatureBuilder::new().prop("year", "2020").build(),
    ];
    let groups = partition_by_field(&records, "year", "Unknown");
    assert_group_order(&groups, &["2020"]);
    assert_group_sizes(&groups, &[2]);
}

#[test]
fn two_owner_scenario() {
    let fields = FieldMap::default();
    let dataset = two_owner_dataset(&fields);

    let by_owner = partition_by_field(dataset.features(), &fields.owner, "Unknown");
    assert_group_order(&by_owner, &["Alice"]);
    assert_group_sizes(&by_owner, &[2]);

    let by_zoning = partition_by_field(dataset.features(), &fields.zoning, "Unknown");
    assert_group_order(&by_zoning, &["R-1", "C-1"]);
    assert_group_sizes(&by_zoning, &[1, 1]);
}

#[test]
fn custom_key_function() {
    let records = owners(&["Alpha", "beta", "ALPHA"]);
    let groups = partition(&records, |f| GroupKey::new(f.text_or("owner", "").to_lowercase()));
    assert_partition_total(&groups, &records);
    assert_group_order(&groups, &["alpha", "beta"]);
}

#[test]
fn empty_input_has_no_groups() {
    let groups = partition_by_field(&[], "owner", "Unknown");
    assert!(groups.is_empty());
    assert_eq!(groups.record_count(), 0);
}

#[test]
fn chunk_sizes_and_count() {
    let records = owners(&["a"; 7]);
    let chunks = chunk(&records, 3);
    let sizes: Vec<usize> = chunks.iter().map(|c| c.records.len()).collect();
    let indices: Vec<usize> = chunks.iter().map(|c| c.index).collect();
    assert_eq!(sizes, [3, 3, 1]);
    assert_eq!(indices, [1, 2, 3]);

    assert_eq!(chunk(&records, 7).len(), 1);
    assert_eq!(chunk(&records, 100).len(), 1);
    assert_eq!(chunk(&records, 0).len(), 7);
    assert!(chunk(&[], 5).is_empty());
}

#[test]
fn sorted_chunk_is_stable_and_exposes_boundaries() {
    let records = vec![
        FeatureBuilder::new().prop("addr", "B ST").prop("seq", 0).build(),
        FeatureBuilder::new().prop("addr", "A ST").prop("seq", 1).build(),
        FeatureBuilder::new().prop("seq", 2).build(),
        FeatureBuilder::new().prop("addr", "B ST").prop("seq", 3).build(),
        FeatureBuilder::new().prop("addr", "C ST").prop("seq", 4).build(),
    ];
    let chunks = sorted_chunk(&records, 2, |f| f.text_or("addr", ""));

    assert_eq!(chunks.len(), 3);
    let bounds: Vec<(&str, &str)> = chunks
        .iter()
        .map(|c| (c.first_key.as_str(), c.last_key.as_str()))
        .collect();
    assert_eq!(bounds, [("", "A ST"), ("B ST", "B ST"), ("C ST", "C ST")]);

    let order: Vec<String> = chunks
        .iter()
        .flat_map(|c| c.records.iter().filter_map(|f| f.text("seq")))
        .collect();
    assert_eq!(order, ["2", "1", "0", "3", "4"]);
}
