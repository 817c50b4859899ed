//! Tabular (CSV) export of feature property bags.
//!
//! This module provides:
//! - **Per-group column sets**: [`table_header`] computes the sorted union of
//!   property keys over exactly the features being written
//! - **Serialization**: [`table_bytes`], persisted by [`crate::writer`]
//! - **Reading back**: [`read_table_rows`], used to verify exports
//!
//! # Design notes
//! - Column sets are computed per call, so two groups exported separately may
//!   have different headers.
//! - Missing properties (and `null`) become empty cells; every other value is
//!   rendered through [`crate::values::canonical`].
//! - Rows end with `\r\n`, matching common spreadsheet tooling.

use crate::record::Feature;
use crate::values::canonical;
use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::path::Path;

/// Sorted union of property keys across `features`.
#[must_use]
pub fn table_header(features: &[&Feature]) -> Vec<String> {
    let keys: BTreeSet<&str> = features
        .iter()
        .flat_map(|f| f.properties().keys().map(String::as_str))
        .collect();
    keys.into_iter().map(str::to_string).collect()
}

/// Cell text for one property of one feature.
#[must_use]
pub fn cell(feature: &Feature, column: &str) -> String {
    feature
        .properties()
        .get(column)
        .and_then(canonical)
        .unwrap_or_default()
}

/// Serialize `features` as CSV: a header row, then one row per feature.
///
/// An empty slice produces an empty buffer (no header).
///
/// # Errors
/// Returns the underlying CSV error on serialization failure.
pub fn table_bytes(features: &[&Feature]) -> Result<Vec<u8>, csv::Error> {
    let mut buf = Vec::with_capacity(features.len().saturating_mul(128)); // heuristic
    if features.is_empty() {
        return Ok(buf);
    }
    let header = table_header(features);
    {
        let mut wtr = WriterBuilder::new()
            .terminator(Terminator::CRLF)
            .from_writer(&mut buf);
        wtr.write_record(&header)?;
        for feature in features {
            wtr.write_record(header.iter().map(|column| cell(feature, column)))?;
        }
        wtr.flush()?;
    }
    Ok(buf)
}

/// Read a CSV file with headers into one column -> cell map per row.
///
/// # Errors
/// Returns an error if the file cannot be opened or any record fails to parse.
pub fn read_table_rows(path: impl AsRef<Path>) -> Result<Vec<HashMap<String, String>>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(f);
    let mut out = Vec::new();
    for (i, rec) in rdr.deserialize::<HashMap<String, String>>().enumerate() {
        let row = rec.with_context(|| format!("parse CSV record #{}", i + 1))?;
        out.push(row);
    }
    Ok(out)
}

/// Header row of a CSV file, in file order.
///
/// # Errors
/// Returns an error if the file cannot be opened or the header cannot be read.
pub fn read_table_header(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(f);
    let header = rdr
        .headers()
        .with_context(|| format!("read CSV header of {}", path.display()))?;
    Ok(header.iter().map(str::to_string).collect())
}
