//! Materialize partitions and chunks as files.
//!
//! Each group becomes one [`Artifact`] (file name + serialized bytes), which is
//! then persisted into an explicitly passed target directory. The directory is
//! created on demand; existing files with the same name are overwritten.
//!
//! An I/O failure stops the export at the failing group. Files written for
//! earlier groups are left in place: there is no multi-file transaction.

use crate::config::UNKNOWN;
use crate::error::WriteError;
use crate::io::csv::table_bytes;
use crate::io::geojson::{feature_collection_bytes, write_bytes};
use crate::naming::{FileNamer, NamingPolicy, chunk_file_name};
use crate::partition::{Chunk, Partition, SortedChunk};
use crate::record::Feature;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Output encoding of an artifact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Pretty-printed GeoJSON feature collection.
    #[default]
    Json,
    /// Header of sorted property keys plus one row per feature.
    Csv,
}

impl Format {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// One output file, ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Number of records serialized into `bytes`.
    pub records: usize,
}

impl Artifact {
    /// Serialize `records` for the group named `target`.
    ///
    /// # Errors
    /// Returns [`WriteError::Json`] or [`WriteError::Csv`] naming `target`.
    pub fn render(
        target: &str,
        file_name: String,
        records: &[&Feature],
        format: Format,
    ) -> Result<Self, WriteError> {
        let bytes = match format {
            Format::Json => feature_collection_bytes(records).map_err(|source| WriteError::Json {
                target: target.to_string(),
                source,
            })?,
            Format::Csv => table_bytes(records).map_err(|source| WriteError::Csv {
                target: target.to_string(),
                source,
            })?,
        };
        Ok(Self {
            file_name,
            bytes,
            records: records.len(),
        })
    }

    /// Write into `dir`, creating it if needed.
    ///
    /// # Errors
    /// Returns [`WriteError::Io`] naming `target`.
    pub fn persist(&self, target: &str, dir: &Path) -> Result<PathBuf, WriteError> {
        let path = dir.join(&self.file_name);
        write_bytes(target, &path, &self.bytes)?;
        debug!(file = %self.file_name, records = self.records, "created artifact");
        Ok(path)
    }
}

/// Settings shared by every keyed export.
#[derive(Clone, Copy, Debug)]
pub struct GroupExport<'s> {
    /// File-name prefix, e.g. `owner`.
    pub prefix: &'s str,
    /// Sanitized key length limit.
    pub max_len: usize,
    pub format: Format,
    pub naming: NamingPolicy,
}

/// Write one file per group of `partition` into `dir`.
///
/// # Returns
/// The paths written, in group order.
///
/// # Errors
/// Stops at the first group that fails to serialize or write.
pub fn write_partition(
    partition: &Partition<'_>,
    dir: &Path,
    export: GroupExport<'_>,
) -> Result<Vec<PathBuf>, WriteError> {
    let mut namer = FileNamer::new(export.naming);
    let ext = export.format.extension();
    let mut written = Vec::with_capacity(partition.len());
    for (key, records) in partition {
        if records.is_empty() {
            continue;
        }
        let file_name = namer.group_name(export.prefix, key, export.max_len, ext);
        let artifact = Artifact::render(key.as_str(), file_name, records, export.format)?;
        written.push(artifact.persist(key.as_str(), dir)?);
    }
    info!(
        prefix = export.prefix,
        groups = written.len(),
        dir = %dir.display(),
        "wrote grouped export"
    );
    Ok(written)
}

/// Write one `chunk_NNN` file per chunk into `dir`.
///
/// # Errors
/// Stops at the first chunk that fails to serialize or write.
pub fn write_chunks(chunks: &[Chunk<'_>], dir: &Path, format: Format) -> Result<Vec<PathBuf>, WriteError> {
    let mut written = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let file_name = chunk_file_name(chunk.index, format.extension());
        let records: Vec<&Feature> = chunk.records.iter().collect();
        let target = format!("chunk {}", chunk.index);
        let artifact = Artifact::render(&target, file_name, &records, format)?;
        written.push(artifact.persist(&target, dir)?);
    }
    info!(chunks = written.len(), dir = %dir.display(), "wrote chunked export");
    Ok(written)
}

/// Write one `address_range_NNN_{first}_to_{last}` file per sorted chunk.
///
/// `boundary` reads the label of a chunk's first and last record. A record
/// without one is named `Unknown`; a present but empty label stays empty.
///
/// # Errors
/// Stops at the first chunk that fails to serialize or write.
pub fn write_sorted_chunks<K>(
    chunks: &[SortedChunk<'_, K>],
    dir: &Path,
    format: Format,
    boundary: impl Fn(&Feature) -> Option<String>,
) -> Result<Vec<PathBuf>, WriteError> {
    let label = |record: Option<&&Feature>| {
        record
            .and_then(|r| boundary(*r))
            .unwrap_or_else(|| UNKNOWN.to_string())
    };
    let mut namer = FileNamer::new(NamingPolicy::Legacy);
    let mut written = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let first = label(chunk.records.first());
        let last = label(chunk.records.last());
        let file_name = namer.range_name(chunk.index, &first, &last, format.extension());
        let target = format!("range {} ({first} to {last})", chunk.index);
        let artifact = Artifact::render(&target, file_name, &chunk.records, format)?;
        written.push(artifact.persist(&target, dir)?);
    }
    info!(ranges = written.len(), dir = %dir.display(), "wrote address-range export");
    Ok(written)
}

/// Write every record of `records` into a single file `dir/file_name`.
///
/// An empty input writes nothing and returns `None`.
///
/// # Errors
/// Returns [`WriteError`] naming `file_name`.
pub fn write_collection(
    records: &[Feature],
    dir: &Path,
    file_name: &str,
    format: Format,
) -> Result<Option<PathBuf>, WriteError> {
    if records.is_empty() {
        info!(file = file_name, "no features to export");
        return Ok(None);
    }
    let refs: Vec<&Feature> = records.iter().collect();
    let artifact = Artifact::render(file_name, file_name.to_string(), &refs, format)?;
    let path = artifact.persist(file_name, dir)?;
    info!(file = file_name, records = refs.len(), "wrote full export");
    Ok(Some(path))
}

/// Write `value` as a pretty-printed JSON document at `dir/file_name`.
///
/// # Errors
/// Returns [`WriteError`] naming `file_name`.
pub fn write_document<T: Serialize>(value: &T, dir: &Path, file_name: &str) -> Result<PathBuf, WriteError> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|source| WriteError::Json {
        target: file_name.to_string(),
        source,
    })?;
    let path = dir.join(file_name);
    write_bytes(file_name, &path, &bytes)?;
    info!(file = file_name, "wrote document");
    Ok(path)
}

/// Write `text` verbatim at `dir/file_name`.
///
/// # Errors
/// Returns [`WriteError::Io`] naming `file_name`.
pub fn write_text(text: &str, dir: &Path, file_name: &str) -> Result<PathBuf, WriteError> {
    let path = dir.join(file_name);
    write_bytes(file_name, &path, text.as_bytes())?;
    debug!(file = file_name, bytes = text.len(), "wrote text document");
    Ok(path)
}
