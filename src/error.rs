//! Error types for loading, writing, and value coercion.
//!
//! Load and write failures are fatal to the export that hit them. [`ValueError`]
//! is never propagated out of an export: call sites recover with a default
//! (see [`crate::values::number_or_zero`]).

use std::path::PathBuf;

/// Failure to turn an input document into a [`crate::Dataset`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed JSON in {} at line {line}, column {column}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        column: usize,
        source: serde_json::Error,
    },

    #[error("unexpected document shape in {}: {reason}", path.display())]
    UnexpectedShape { path: PathBuf, reason: String },
}

/// Failure to materialize one output artifact.
///
/// `target` names the group key (or stream name) being written so that a
/// failed multi-group export reports which group stopped it. Files written
/// before the failure stay on disk.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("write `{target}` to {}: {source}", path.display())]
    Io {
        target: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("serialize `{target}` as JSON: {source}")]
    Json {
        target: String,
        source: serde_json::Error,
    },

    #[error("serialize `{target}` as CSV: {source}")]
    Csv { target: String, source: csv::Error },
}

/// A property value could not be read as the type a formatter wanted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("expected a number, found {found:?}")]
    NotNumeric { found: String },

    #[error("expected an integer, found {found:?}")]
    NotInteger { found: String },
}
