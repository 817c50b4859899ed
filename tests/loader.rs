use anyhow::Result;
use parcelbeam::testing::{FeatureBuilder, write_collection_file};
use parcelbeam::{LoadError, ShapePolicy, load_dataset, parse_dataset};
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_features_in_document_order() -> Result<()> {
    let dir = tempdir()?;
    let features = vec![
        FeatureBuilder::new().prop("name", "first").point(1.0, 2.0).build(),
        FeatureBuilder::new().prop("name", "second").build(),
    ];
    let path = write_collection_file(dir.path(), "in.json", &features)?;

    let dataset = load_dataset(&path, ShapePolicy::Tolerant)?;
    assert_eq!(dataset.kind.as_deref(), Some("FeatureCollection"));
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.features()[0].text("name").as_deref(), Some("first"));
    assert_eq!(dataset.features()[1].text("name").as_deref(), Some("second"));
    assert_eq!(dataset.features()[0].lon_lat(), Some((1.0, 2.0)));
    Ok(())
}

#[test]
fn missing_file_is_not_found() {
    let err = load_dataset("definitely/not/here.json", ShapePolicy::Tolerant).unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }), "got {err:?}");
}

#[test]
fn syntax_error_reports_position() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("bad.json");
    fs::write(&path, "{\n  \"type\": \"FeatureCollection\",\n  \"features\": [\n")?;

    match load_dataset(&path, ShapePolicy::Tolerant) {
        Err(LoadError::Malformed { line, .. }) => assert!(line >= 3, "line {line}"),
        other => panic!("expected Malformed, got {other:?}"),
    }
    Ok(())
}

#[test]
fn wrong_type_is_empty_when_tolerant() -> Result<()> {
    let dataset = parse_dataset(r#"{"type":"Feature","properties":{}}"#, ShapePolicy::Tolerant)?;
    assert!(dataset.is_empty());
    assert_eq!(dataset.kind.as_deref(), Some("Feature"));
    Ok(())
}

#[test]
fn wrong_type_is_an_error_when_strict() {
    let err = parse_dataset(r#"{"type":"Feature"}"#, ShapePolicy::Strict).unwrap_err();
    assert!(matches!(err, LoadError::UnexpectedShape { .. }), "got {err:?}");

    let err = parse_dataset("[1, 2]", ShapePolicy::Strict).unwrap_err();
    assert!(matches!(err, LoadError::UnexpectedShape { .. }), "got {err:?}");
}

#[test]
fn missing_features_member_is_empty() -> Result<()> {
    let dataset = parse_dataset(r#"{"type":"FeatureCollection"}"#, ShapePolicy::Strict)?;
    assert!(dataset.is_empty());
    Ok(())
}

#[test]
fn non_array_features_follow_the_policy() -> Result<()> {
    let doc = r#"{"type":"FeatureCollection","features":{"a":1}}"#;
    assert!(parse_dataset(doc, ShapePolicy::Tolerant)?.is_empty());
    assert!(parse_dataset(doc, ShapePolicy::Strict).is_err());
    Ok(())
}

#[test]
fn non_object_members_are_skipped_when_tolerant() -> Result<()> {
    let doc = r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"a":1}}, 7, "x"]}"#;
    let dataset = parse_dataset(doc, ShapePolicy::Tolerant)?;
    assert_eq!(dataset.len(), 1);

    let err = parse_dataset(doc, ShapePolicy::Strict).unwrap_err();
    assert!(matches!(err, LoadError::UnexpectedShape { .. }), "got {err:?}");
    Ok(())
}

#[test]
fn feature_without_properties_has_an_empty_bag() -> Result<()> {
    let doc = r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":null}]}"#;
    let dataset = parse_dataset(doc, ShapePolicy::Strict)?;
    let feature = &dataset.features()[0];
    assert!(feature.properties().is_empty());
    assert!(feature.geometry().is_none());
    assert_eq!(feature.coordinates_value(), serde_json::json!([]));
    Ok(())
}

#[test]
fn null_properties_count_as_absent() -> Result<()> {
    let doc = r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"owner":null}}]}"#;
    let dataset = parse_dataset(doc, ShapePolicy::Strict)?;
    let feature = &dataset.features()[0];
    assert!(feature.property("owner").is_none());
    assert_eq!(feature.text_or("owner", "Unknown"), "Unknown");
    Ok(())
}
