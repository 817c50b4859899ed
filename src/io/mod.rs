//! File formats read and written by the exports.
//!
//! - [`geojson`]: the input feature collection and the structured artifacts
//! - [`csv`]: tabular artifacts
//! - [`jsonl`]: training-data streams

pub mod csv;
pub mod geojson;
pub mod jsonl;
