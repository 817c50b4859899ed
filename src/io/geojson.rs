//! GeoJSON feature-collection I/O.
//!
//! This module provides:
//! - **Loading** with shape validation: [`load_dataset`] and [`parse_dataset`]
//! - **Structured-document output**: [`feature_collection_bytes`], persisted by
//!   [`crate::writer`]
//!
//! # Notes
//! - The whole document is read into memory; there is no streaming path.
//! - Output uses 2-space indentation and keeps non-ASCII text literal.

use crate::error::{LoadError, WriteError};
use crate::record::{Dataset, Feature};
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, create_dir_all};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// The collection type every input document must declare.
pub const FEATURE_COLLECTION: &str = "FeatureCollection";

/// What to do with a document that parses but is not a feature collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShapePolicy {
    /// Log a warning and continue with an empty dataset.
    #[default]
    Tolerant,
    /// Fail with [`LoadError::UnexpectedShape`].
    Strict,
}

/// Read and decode a feature collection from `path`.
///
/// # Errors
/// * [`LoadError::NotFound`] if the file does not exist
/// * [`LoadError::Io`] for any other read failure
/// * [`LoadError::Malformed`] if the text is not valid JSON
/// * [`LoadError::UnexpectedShape`] under [`ShapePolicy::Strict`] only: for a
///   non-collection document, a non-array `features` member, or a feature that
///   is not an object. [`ShapePolicy::Tolerant`] logs these and skips them.
pub fn load_dataset(path: impl AsRef<Path>, policy: ShapePolicy) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading feature collection");
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let dataset = decode(path, &text, policy)?;
    info!(features = dataset.len(), "loaded feature collection");
    Ok(dataset)
}

/// Decode a feature collection held in memory.
///
/// # Errors
/// Same as [`load_dataset`], minus the file-system variants.
pub fn parse_dataset(text: &str, policy: ShapePolicy) -> Result<Dataset, LoadError> {
    decode(Path::new("<memory>"), text, policy)
}

fn decode(path: &Path, text: &str, policy: ShapePolicy) -> Result<Dataset, LoadError> {
    let doc: Value = serde_json::from_str(text).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        line: source.line(),
        column: source.column(),
        source,
    })?;

    let shape_error = |reason: String| LoadError::UnexpectedShape {
        path: path.to_path_buf(),
        reason,
    };

    let Value::Object(mut root) = doc else {
        return reject(policy, path, shape_error("top level is not an object".into()));
    };

    let kind = root.get("type").and_then(Value::as_str).map(str::to_string);
    if kind.as_deref() != Some(FEATURE_COLLECTION) {
        let reason = match &kind {
            Some(k) => format!("expected type `{FEATURE_COLLECTION}`, found `{k}`"),
            None => "missing top-level `type`".to_string(),
        };
        return reject(policy, path, shape_error(reason)).map(|mut ds| {
            ds.kind = kind;
            ds
        });
    }

    let features = match root.remove("features") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => collect_features(path, items, policy)?,
        Some(_) => {
            return reject(policy, path, shape_error("`features` is not an array".into()))
                .map(|mut ds| {
                    ds.kind = kind;
                    ds
                });
        }
    };

    Ok(Dataset::new(kind, features))
}

fn collect_features(
    path: &Path,
    items: Vec<Value>,
    policy: ShapePolicy,
) -> Result<Vec<Feature>, LoadError> {
    let mut out = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(obj) => out.push(Feature::from_object(obj)),
            _ => match policy {
                ShapePolicy::Strict => {
                    return Err(LoadError::UnexpectedShape {
                        path: path.to_path_buf(),
                        reason: format!("feature #{idx} is not an object"),
                    });
                }
                ShapePolicy::Tolerant => {
                    warn!(path = %path.display(), index = idx, "skipping feature that is not an object");
                }
            },
        }
    }
    Ok(out)
}

fn reject(policy: ShapePolicy, path: &Path, err: LoadError) -> Result<Dataset, LoadError> {
    match policy {
        ShapePolicy::Strict => Err(err),
        ShapePolicy::Tolerant => {
            warn!(path = %path.display(), "{err}; continuing with an empty dataset");
            Ok(Dataset::default())
        }
    }
}

#[derive(Serialize)]
struct FeatureCollectionRef<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    features: &'a [&'a Feature],
}

/// Serialize `features` as a pretty-printed feature collection.
///
/// # Errors
/// Propagates serializer failures.
pub fn feature_collection_bytes(features: &[&Feature]) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec_pretty(&FeatureCollectionRef {
        kind: FEATURE_COLLECTION,
        features,
    })
}

/// Create `path`'s parent directory and write `bytes` to it.
pub(crate) fn write_bytes(target: &str, path: &Path, bytes: &[u8]) -> Result<(), WriteError> {
    let io_err = |path: PathBuf| {
        let target = target.to_string();
        move |source| WriteError::Io {
            target,
            path,
            source,
        }
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).map_err(io_err(parent.to_path_buf()))?;
    }
    fs::write(path, bytes).map_err(io_err(path.to_path_buf()))
}
