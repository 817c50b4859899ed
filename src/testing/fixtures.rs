//! Ready-made datasets and feature-collection files.

use super::FeatureBuilder;
use crate::config::FieldMap;
use crate::record::{Dataset, Feature};
use serde_json::{Value, json};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Two features owned by `Alice`, zoned `R-1` and `C-1`, valued 50,000 and
/// 1,200,000.
#[must_use]
pub fn two_owner_dataset(fields: &FieldMap) -> Dataset {
    Dataset::new(
        Some("FeatureCollection".into()),
        vec![
            FeatureBuilder::new()
                .prop(&fields.address, "100 MAIN ST")
                .prop(&fields.owner, "Alice")
                .prop(&fields.zoning, "R-1")
                .prop(&fields.total_value, 50_000)
                .point(-80.27, 25.72)
                .build(),
            FeatureBuilder::new()
                .prop(&fields.address, "200 OAK AVE")
                .prop(&fields.owner, "Alice")
                .prop(&fields.zoning, "C-1")
                .prop(&fields.total_value, 1_200_000)
                .point(-80.26, 25.73)
                .build(),
        ],
    )
}

/// A varied dataset: mixed owner kinds, numeric and string years, a missing
/// address, a non-numeric value and a non-ASCII neighborhood.
#[must_use]
pub fn sample_properties(fields: &FieldMap) -> Dataset {
    let row = |address: Option<&str>, owner: &str, zoning: &str, year: Value, value: Value, hood: &str| {
        let mut b = FeatureBuilder::new()
            .prop(&fields.owner, owner)
            .prop(&fields.zoning, zoning)
            .prop(&fields.year_built, year)
            .prop(&fields.total_value, value)
            .prop(&fields.neighborhood, hood)
            .prop(&fields.municipality, "CORAL GABLES")
            .prop(&fields.route, "R12");
        if let Some(address) = address {
            b = b.prop(&fields.address, address);
        }
        b.point(-80.27, 25.72).build()
    };
    Dataset::new(
        Some("FeatureCollection".into()),
        vec![
            row(Some("1 ALHAMBRA CIR"), "SMITH JOHN", "R-1", json!(1925), json!(850_000), "Granada"),
            row(Some("2 ALHAMBRA CIR"), "GABLES HOLDINGS LLC", "C-1", json!("1960"), json!("2600000"), "Granada"),
            row(None, "SMITH JOHN", "R-1", json!(2005), json!("n/a"), "Señorío"),
            row(Some("4 MIRACLE MILE"), "BAY TRUST", "C-1", json!(1750), json!(0), "Miracle"),
            row(Some("5 MIRACLE MILE"), "DOE JANE", "R-2", json!("unknown"), json!(120_000), "Miracle"),
        ],
    )
}

/// The JSON document for `features` as a feature collection.
#[must_use]
pub fn collection_value(features: &[Feature]) -> Value {
    json!({ "type": "FeatureCollection", "features": features })
}

/// Write `features` as `name` under `dir` and return the path.
///
/// # Errors
/// Propagates I/O errors.
pub fn write_collection_file(dir: &Path, name: &str, features: &[Feature]) -> io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, collection_value(features).to_string())?;
    Ok(path)
}
