use anyhow::Result;
use parcelbeam::io::csv::{read_table_header, read_table_rows};
use parcelbeam::error::WriteError;
use parcelbeam::naming::{CATEGORY_KEY_LIMIT, NamingPolicy};
use parcelbeam::record::Feature;
use parcelbeam::testing::FeatureBuilder;
use parcelbeam::writer::{
    Format, GroupExport, write_chunks, write_collection, write_partition, write_sorted_chunks,
};
use parcelbeam::{ShapePolicy, chunk, load_dataset, partition_by_field, sorted_chunk};
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

fn export(format: Format, naming: NamingPolicy) -> GroupExport<'static> {
    GroupExport {
        prefix: "owner",
        max_len: CATEGORY_KEY_LIMIT,
        format,
        naming,
    }
}

#[test]
fn json_groups_are_feature_collections() -> Result<()> {
    let dir = tempdir()?;
    let records = vec![
        FeatureBuilder::new().prop("owner", "Alice").prop("hood", "Señorío").point(-80.2, 25.7).build(),
        FeatureBuilder::new().prop("owner", "Bob Smith").build(),
        FeatureBuilder::new().prop("owner", "Alice").build(),
    ];
    let groups = partition_by_field(&records, "owner", "Unknown");
    let out = dir.path().join("by_owner");

    let written = write_partition(&groups, &out, export(Format::Json, NamingPolicy::Legacy))?;
    assert_eq!(written.len(), 2);
    assert!(out.join("owner_Alice.json").exists());
    assert!(out.join("owner_Bob_Smith.json").exists());

    let text = fs::read_to_string(out.join("owner_Alice.json"))?;
    assert!(text.contains("Señorío"), "non-ASCII must be written literally");
    assert!(text.contains("\n  \"type\": \"FeatureCollection\""), "two-space indentation");

    let alice = load_dataset(out.join("owner_Alice.json"), ShapePolicy::Strict)?;
    assert_eq!(alice.features(), [records[0].clone(), records[2].clone()]);
    Ok(())
}

#[test]
fn csv_round_trip_uses_per_group_columns() -> Result<()> {
    let dir = tempdir()?;
    let records = vec![
        FeatureBuilder::new().prop("owner", "Alice").prop("zip", 33134).prop("flag", true).build(),
        FeatureBuilder::new().prop("owner", "Alice").prop("note", "a, \"quoted\" value").build(),
        FeatureBuilder::new().prop("owner", "Bob").prop("year", 1950).build(),
    ];
    let groups = partition_by_field(&records, "owner", "Unknown");
    write_partition(&groups, dir.path(), export(Format::Csv, NamingPolicy::Legacy))?;

    let alice = dir.path().join("owner_Alice.csv");
    assert_eq!(read_table_header(&alice)?, ["flag", "note", "owner", "zip"]);
    let rows = read_table_rows(&alice)?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["zip"], "33134");
    assert_eq!(rows[0]["flag"], "true");
    assert_eq!(rows[0]["note"], "");
    assert_eq!(rows[1]["note"], "a, \"quoted\" value");
    assert_eq!(rows[1]["zip"], "");

    assert_eq!(read_table_header(dir.path().join("owner_Bob.csv"))?, ["owner", "year"]);

    let raw = fs::read_to_string(&alice)?;
    assert!(raw.starts_with("flag,note,owner,zip\r\n"));
    Ok(())
}

#[test]
fn truncation_collision_overwrites_under_legacy() -> Result<()> {
    let dir = tempdir()?;
    let base = "Z".repeat(55);
    let records = vec![
        FeatureBuilder::new().prop("owner", format!("{base}-first")).build(),
        FeatureBuilder::new().prop("owner", format!("{base}-second")).build(),
    ];
    let groups = partition_by_field(&records, "owner", "Unknown");
    assert_eq!(groups.len(), 2);

    let written = write_partition(&groups, dir.path(), export(Format::Json, NamingPolicy::Legacy))?;
    assert_eq!(written.len(), 2);
    assert_eq!(written[0], written[1]);
    assert_eq!(fs::read_dir(dir.path())?.count(), 1);

    let survivor = load_dataset(&written[1], ShapePolicy::Strict)?;
    assert_eq!(survivor.features()[0].text("owner"), Some(format!("{base}-second")));
    Ok(())
}

#[test]
fn disambiguate_keeps_colliding_groups_apart() -> Result<()> {
    let dir = tempdir()?;
    let base = "Z".repeat(55);
    let records = vec![
        FeatureBuilder::new().prop("owner", format!("{base}-first")).build(),
        FeatureBuilder::new().prop("owner", format!("{base}-second")).build(),
    ];
    let groups = partition_by_field(&records, "owner", "Unknown");

    let written = write_partition(&groups, dir.path(), export(Format::Json, NamingPolicy::Disambiguate))?;
    assert_ne!(written[0], written[1]);
    assert_eq!(fs::read_dir(dir.path())?.count(), 2);
    Ok(())
}

#[test]
fn failing_group_stops_the_export_and_keeps_earlier_files() -> Result<()> {
    let dir = tempdir()?;
    // a directory squatting on Bob's file name makes that write fail
    fs::create_dir(dir.path().join("owner_Bob.json"))?;
    let records = vec![
        FeatureBuilder::new().prop("owner", "Alice").build(),
        FeatureBuilder::new().prop("owner", "Bob").build(),
        FeatureBuilder::new().prop("owner", "Carol").build(),
    ];
    let groups = partition_by_field(&records, "owner", "Unknown");

    let err = write_partition(&groups, dir.path(), export(Format::Json, NamingPolicy::Legacy))
        .expect_err("writing over a directory must fail");
    match &err {
        WriteError::Io { target, path, .. } => {
            assert_eq!(target, "Bob");
            assert_eq!(path, &dir.path().join("owner_Bob.json"));
        }
        other => panic!("expected an I/O error, got {other:?}"),
    }
    assert!(err.to_string().contains("`Bob`"));
    assert!(dir.path().join("owner_Alice.json").is_file());
    assert!(!dir.path().join("owner_Carol.json").exists());
    Ok(())
}

#[test]
fn chunk_files_are_numbered() -> Result<()> {
    let dir = tempdir()?;
    let records: Vec<Feature> = (0..5).map(|i| FeatureBuilder::new().prop("i", i).build()).collect();
    let written = write_chunks(&chunk(&records, 2), dir.path(), Format::Json)?;

    let names: Vec<String> = written
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    assert_eq!(names, ["chunk_001.json", "chunk_002.json", "chunk_003.json"]);

    let last: Value = serde_json::from_str(&fs::read_to_string(&written[2])?)?;
    assert_eq!(last["features"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[test]
fn range_files_name_unknown_boundaries() -> Result<()> {
    let dir = tempdir()?;
    let records = vec![
        FeatureBuilder::new().prop("addr", "10 ALMERIA AVE").build(),
        FeatureBuilder::new().build(),
        FeatureBuilder::new().prop("addr", "5 BALBOA PLZ").build(),
    ];
    let ranges = sorted_chunk(&records, 2, |f| f.text_or("addr", ""));
    let written = write_sorted_chunks(&ranges, dir.path(), Format::Json, |f| f.text("addr"))?;

    assert!(dir.path().join("address_range_001_Unknown_to_10_ALMERIA_AVE.json").exists());
    assert!(dir.path().join("address_range_002_5_BALBOA_PLZ_to_5_BALBOA_PLZ.json").exists());
    assert_eq!(written.len(), 2);
    Ok(())
}

#[test]
fn empty_boundary_addresses_keep_their_empty_label() -> Result<()> {
    let dir = tempdir()?;
    let records = vec![
        FeatureBuilder::new().prop("addr", "10 ALMERIA AVE").build(),
        FeatureBuilder::new().build(),
        FeatureBuilder::new().prop("addr", "").build(),
    ];
    let ranges = sorted_chunk(&records, 2, |f| f.text_or("addr", ""));
    write_sorted_chunks(&ranges, dir.path(), Format::Json, |f| f.text("addr"))?;

    assert!(dir.path().join("address_range_001_Unknown_to_.json").exists());
    assert!(dir.path().join("address_range_002_10_ALMERIA_AVE_to_10_ALMERIA_AVE.json").exists());
    Ok(())
}

#[test]
fn flat_export_skips_empty_input() -> Result<()> {
    let dir = tempdir()?;
    assert!(write_collection(&[], dir.path(), "all_properties.csv", Format::Csv)?.is_none());
    assert!(!dir.path().join("all_properties.csv").exists());

    let records = vec![
        FeatureBuilder::new().prop("b", 1).build(),
        FeatureBuilder::new().prop("a", 2).build(),
    ];
    let path = write_collection(&records, dir.path(), "all_properties.csv", Format::Csv)?;
    assert_eq!(path.as_deref(), Some(dir.path().join("all_properties.csv").as_path()));
    assert_eq!(read_table_header(dir.path().join("all_properties.csv"))?, ["a", "b"]);
    assert_eq!(read_table_rows(dir.path().join("all_properties.csv"))?.len(), 2);
    Ok(())
}

#[test]
fn rewriting_overwrites_instead_of_appending() -> Result<()> {
    let dir = tempdir()?;
    let records = vec![FeatureBuilder::new().prop("owner", "Alice").build()];
    let groups = partition_by_field(&records, "owner", "Unknown");
    write_partition(&groups, dir.path(), export(Format::Csv, NamingPolicy::Legacy))?;
    write_partition(&groups, dir.path(), export(Format::Csv, NamingPolicy::Legacy))?;

    assert_eq!(read_table_rows(dir.path().join("owner_Alice.csv"))?.len(), 1);
    Ok(())
}
