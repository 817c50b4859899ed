//! # parcelbeam
//!
//! Splits a GeoJSON property dataset (address points for a municipality) into
//! derived artifacts: per-group JSON and CSV files, fixed-size batches,
//! address-sorted ranges, narrative training data and descriptive statistics.
//!
//! ## Key Features
//!
//! - **One parameterized partitioner** - group by any field through a key function
//! - **Insertion-ordered groups** - group order is the order of first occurrence
//! - **JSON and CSV artifacts** - per-group column sets, CRLF rows, literal non-ASCII
//! - **Explicit naming policy** - keep the legacy truncated names or disambiguate them
//! - **Built-in combiners** - frequency, numeric summary and monetary buckets
//! - **Training data** - stories, Q&A pairs, retrieval chunks, search queries and
//!   a plain-text story corpus with a lookup index
//!
//! ## Quick Start
//!
//! ```no_run
//! use parcelbeam::config::FieldMap;
//! use parcelbeam::io::geojson::{ShapePolicy, load_dataset};
//! use parcelbeam::splitter::{Method, SplitOptions, Splitter};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let fields = FieldMap::default();
//! let dataset = load_dataset("CGProperties.json", ShapePolicy::Tolerant)?;
//!
//! let splitter = Splitter::new(&dataset, &fields, SplitOptions::default());
//! let written = splitter.run(Method::All, Path::new("split_output"))?;
//! println!("wrote {} files", written.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Dataset and Feature
//!
//! A [`Dataset`] is the ordered list of [`Feature`]s read from one feature
//! collection. Features keep their original JSON object, so every export
//! re-emits properties and geometry exactly as read. Nothing mutates a loaded
//! dataset; every export borrows it.
//!
//! ### Partition
//!
//! [`partition::partition`] groups features by a [`GroupKey`] computed per
//! feature. Values are compared by their canonical text, so the number `2020`
//! and the string `"2020"` share a group. Positional [`partition::chunk`] and
//! address-sorted [`partition::sorted_chunk`] are the key-less variants.
//!
//! ### Artifacts
//!
//! [`writer`] turns each group into one file named by [`naming`], written
//! into a directory passed explicitly by the caller.
//!
//! ### Reports
//!
//! [`report::PropertyAnalysis`] and [`summary`] fold the dataset through the
//! [`combiners`] and serialize the result.
//!
//! ## Testing
//!
//! [`testing`] offers a feature builder, small fixtures and partition
//! assertions for downstream tests.

pub mod combiners;
pub mod config;
pub mod error;
pub mod io;
pub mod naming;
pub mod narrative;
pub mod partition;
pub mod record;
pub mod report;
pub mod splitter;
pub mod summary;
pub mod testing;
pub mod values;
pub mod writer;

pub use config::{Dimension, FieldMap};
pub use error::{LoadError, ValueError, WriteError};
pub use io::geojson::{ShapePolicy, load_dataset, parse_dataset};
pub use naming::NamingPolicy;
pub use partition::{Partition, chunk, partition, partition_by_field, sorted_chunk};
pub use record::{Dataset, Feature, GroupKey};
pub use report::{AnalysisOptions, PropertyAnalysis};
pub use splitter::{Method, SplitOptions, Splitter};
pub use writer::Format;
