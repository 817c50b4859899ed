//! JSON Lines (JSONL) streams for the training-data exports.
//!
//! - [`write_jsonl_vec`] writes one compact JSON value per line.
//! - [`read_jsonl_vec`] reads a stream back, skipping blank lines.
//!
//! Non-ASCII text is written literally.

use crate::error::WriteError;
use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{File, create_dir_all};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Load every record of a JSON Lines stream. Blank lines are ignored.
///
/// # Errors
/// Fails on I/O errors or on the first line that does not decode as `T`,
/// naming the 1-based line number.
pub fn read_jsonl_vec<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("cannot open stream {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();
    for (number, line) in (1..).zip(reader.lines()) {
        let line = line.with_context(|| format!("{}: line {number} unreadable", path.display()))?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        records.push(
            serde_json::from_str(text)
                .with_context(|| format!("{}: line {number} is not a valid record", path.display()))?,
        );
    }
    Ok(records)
}

/// Write `data` as one compact JSON record per line, replacing any existing
/// file and creating missing parent directories. Returns the record count.
///
/// # Errors
/// Returns [`WriteError`] with `target` set to the file name.
pub fn write_jsonl_vec<T: Serialize>(path: impl AsRef<Path>, data: &[T]) -> Result<usize, WriteError> {
    let path = path.as_ref();
    let target = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let io_err = |source| WriteError::Io {
        target: target.clone(),
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).map_err(io_err)?;
    }
    let mut stream = BufWriter::new(File::create(path).map_err(io_err)?);
    for record in data {
        serde_json::to_writer(&mut stream, record).map_err(|source| WriteError::Json {
            target: target.clone(),
            source,
        })?;
        stream.write_all(b"\n").map_err(io_err)?;
    }
    stream.flush().map_err(io_err)?;
    Ok(data.len())
}
