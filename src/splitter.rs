//! Orchestrates the exports of one run over a loaded dataset.
//!
//! Every write takes its target directory as a parameter. Nothing here holds a
//! mutable "current output directory".

use crate::config::{Dimension, FieldMap};
use crate::error::WriteError;
use crate::io::jsonl::write_jsonl_vec;
use crate::naming::NamingPolicy;
use crate::narrative::{qa_pairs, rag_chunks, search_queries, stories, story_corpus};
use crate::partition::{chunk, partition_by_field, sorted_chunk};
use crate::record::Dataset;
use crate::summary::{FieldAnalysis, SummaryReport};
use crate::writer::{
    Format, GroupExport, write_chunks, write_collection, write_document, write_partition,
    write_sorted_chunks, write_text,
};
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SUMMARY_FILE: &str = "summary_report.json";
pub const FIELD_ANALYSIS_FILE: &str = "field_analysis.json";
pub const STORIES_FILE: &str = "property_stories.jsonl";
pub const QA_FILE: &str = "property_qa_pairs.jsonl";
pub const RAG_FILE: &str = "rag_chunks.jsonl";
pub const SEARCH_QUERIES_FILE: &str = "search_queries.jsonl";
pub const ALL_PROPERTIES_CSV: &str = "all_properties.csv";
pub const CSV_DIR: &str = "csv_exports";
pub const CHUNKS_DIR: &str = "by_chunks";
pub const ADDRESS_DIR: &str = "by_address";

/// What a run produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Method {
    Owner,
    Zoning,
    Route,
    Municipality,
    Neighborhood,
    #[value(alias = "year_built")]
    YearBuilt,
    Chunks,
    Address,
    Csv,
    Stories,
    #[value(alias = "qa_pairs")]
    QaPairs,
    #[value(alias = "rag_chunks")]
    RagChunks,
    #[value(alias = "search_queries")]
    SearchQueries,
    /// Plain-text story files with a search index and a summary.
    #[value(alias = "rag_data")]
    RagData,
    /// Per-field value profile (`field_analysis.json`).
    Analyze,
    All,
}

impl Method {
    /// The grouping dimension this method splits on, if any.
    #[must_use]
    pub const fn dimension_label(self) -> Option<&'static str> {
        match self {
            Self::Owner => Some("owner"),
            Self::Zoning => Some("zoning"),
            Self::Route => Some("route"),
            Self::Municipality => Some("municipality"),
            Self::Neighborhood => Some("neighborhood"),
            Self::YearBuilt => Some("year_built"),
            _ => None,
        }
    }

    /// Split methods also refresh the summary report.
    #[must_use]
    pub const fn writes_summary(self) -> bool {
        matches!(
            self,
            Self::Owner
                | Self::Zoning
                | Self::Route
                | Self::Municipality
                | Self::Neighborhood
                | Self::YearBuilt
                | Self::Chunks
                | Self::Address
        )
    }
}

/// Settings for one run.
#[derive(Clone, Copy, Debug)]
pub struct SplitOptions {
    /// Records per `chunk_NNN` file.
    pub chunk_size: usize,
    /// Records per `address_range_*` file.
    pub records_per_file: usize,
    pub naming: NamingPolicy,
    /// Write CSV instead of JSON; with [`Method::All`], run only the CSV export.
    pub csv_only: bool,
    /// Append the story and Q&A streams after a single method.
    pub llm_training: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            chunk_size: 100,
            records_per_file: 50,
            naming: NamingPolicy::Legacy,
            csv_only: false,
            llm_training: false,
        }
    }
}

/// Runs exports over a borrowed dataset.
#[derive(Clone, Copy, Debug)]
pub struct Splitter<'d> {
    dataset: &'d Dataset,
    fields: &'d FieldMap,
    options: SplitOptions,
}

impl<'d> Splitter<'d> {
    #[must_use]
    pub const fn new(dataset: &'d Dataset, fields: &'d FieldMap, options: SplitOptions) -> Self {
        Self {
            dataset,
            fields,
            options,
        }
    }

    const fn format(&self) -> Format {
        if self.options.csv_only { Format::Csv } else { Format::Json }
    }

    /// Run `method` with `out` as the output root.
    ///
    /// # Returns
    /// Every file written, in write order.
    ///
    /// # Errors
    /// Stops at the first artifact that fails to serialize or write.
    pub fn run(&self, method: Method, out: &Path) -> Result<Vec<PathBuf>, WriteError> {
        info!(?method, out = %out.display(), records = self.dataset.len(), "starting run");
        let mut written = Vec::new();
        match method {
            Method::All if self.options.csv_only => written.extend(self.export_csv(&out.join(CSV_DIR))?),
            Method::All => return self.run_all(out),
            Method::Chunks => written.extend(self.split_chunks(out, self.format())?),
            Method::Address => written.extend(self.split_address_ranges(out, self.format())?),
            Method::Csv => written.extend(self.export_csv(&out.join(CSV_DIR))?),
            Method::Stories => written.push(self.write_stories(out)?),
            Method::QaPairs => written.push(self.write_qa_pairs(out)?),
            Method::RagChunks => written.push(self.write_rag_chunks(out)?),
            Method::SearchQueries => written.push(self.write_search_queries(out)?),
            Method::RagData => written.extend(self.write_story_corpus(out)?),
            Method::Analyze => written.push(self.write_field_analysis(out)?),
            dim => {
                if let Some(dimension) = dim.dimension_label().and_then(|l| self.fields.dimension(l)) {
                    written.extend(self.split_dimension(&dimension, out, self.format())?);
                }
            }
        }
        if method.writes_summary() {
            written.push(self.write_summary(out)?);
        }
        if self.options.llm_training && method != Method::All {
            written.push(self.write_stories(out)?);
            written.push(self.write_qa_pairs(out)?);
        }
        Ok(written)
    }

    /// The full run: every dimension into its `by_*` directory, chunks, address
    /// ranges, the summary, the CSV exports, stories and Q&A pairs.
    ///
    /// # Errors
    /// Stops at the first artifact that fails to serialize or write.
    pub fn run_all(&self, out: &Path) -> Result<Vec<PathBuf>, WriteError> {
        let mut written = Vec::new();
        for dimension in self.fields.dimensions() {
            written.extend(self.split_dimension(&dimension, &out.join(dimension.dir), Format::Json)?);
        }
        written.extend(self.split_chunks(&out.join(CHUNKS_DIR), Format::Json)?);
        written.extend(self.split_address_ranges(&out.join(ADDRESS_DIR), Format::Json)?);
        written.push(self.write_summary(out)?);
        written.extend(self.export_csv(&out.join(CSV_DIR))?);
        written.push(self.write_stories(out)?);
        written.push(self.write_qa_pairs(out)?);
        info!(files = written.len(), out = %out.display(), "all splits completed");
        Ok(written)
    }

    /// One file per distinct value of `dimension`.
    ///
    /// # Errors
    /// See [`write_partition`].
    pub fn split_dimension(&self, dimension: &Dimension, dir: &Path, format: Format) -> Result<Vec<PathBuf>, WriteError> {
        let groups = partition_by_field(self.dataset.features(), &dimension.field, dimension.default);
        info!(dimension = dimension.label, groups = groups.len(), "partitioned");
        write_partition(
            &groups,
            dir,
            GroupExport {
                prefix: dimension.label,
                max_len: dimension.max_len,
                format,
                naming: self.options.naming,
            },
        )
    }

    /// `chunk_NNN` files of [`SplitOptions::chunk_size`] records each.
    ///
    /// # Errors
    /// See [`write_chunks`].
    pub fn split_chunks(&self, dir: &Path, format: Format) -> Result<Vec<PathBuf>, WriteError> {
        let chunks = chunk(self.dataset.features(), self.options.chunk_size);
        write_chunks(&chunks, dir, format)
    }

    /// Address-sorted `address_range_*` files of
    /// [`SplitOptions::records_per_file`] records each.
    ///
    /// # Errors
    /// See [`write_sorted_chunks`].
    pub fn split_address_ranges(&self, dir: &Path, format: Format) -> Result<Vec<PathBuf>, WriteError> {
        let address = &self.fields.address;
        let ranges = sorted_chunk(self.dataset.features(), self.options.records_per_file, |f| {
            f.text_or(address, "")
        });
        write_sorted_chunks(&ranges, dir, format, |f| f.text(address))
    }

    /// Every dimension as CSV into `dir`, then the whole dataset as
    /// `all_properties.csv`.
    ///
    /// # Errors
    /// Stops at the first file that fails.
    pub fn export_csv(&self, dir: &Path) -> Result<Vec<PathBuf>, WriteError> {
        let mut written = Vec::new();
        for dimension in self.fields.dimensions() {
            written.extend(self.split_dimension(&dimension, dir, Format::Csv)?);
        }
        written.extend(write_collection(
            self.dataset.features(),
            dir,
            ALL_PROPERTIES_CSV,
            Format::Csv,
        )?);
        info!(files = written.len(), dir = %dir.display(), "CSV exports completed");
        Ok(written)
    }

    /// # Errors
    /// See [`write_document`].
    pub fn write_summary(&self, out: &Path) -> Result<PathBuf, WriteError> {
        let report = SummaryReport::build(self.dataset, &self.fields.dimensions());
        write_document(&report, out, SUMMARY_FILE)
    }

    /// # Errors
    /// See [`write_document`].
    pub fn write_field_analysis(&self, out: &Path) -> Result<PathBuf, WriteError> {
        let analysis = FieldAnalysis::build(self.dataset, self.fields);
        info!(fields = analysis.total_fields, "analysed property keys");
        write_document(&analysis, out, FIELD_ANALYSIS_FILE)
    }

    /// # Errors
    /// See [`write_jsonl_vec`].
    pub fn write_stories(&self, out: &Path) -> Result<PathBuf, WriteError> {
        write_stream(out, STORIES_FILE, &stories(self.dataset, self.fields))
    }

    /// # Errors
    /// See [`write_jsonl_vec`].
    pub fn write_qa_pairs(&self, out: &Path) -> Result<PathBuf, WriteError> {
        write_stream(out, QA_FILE, &qa_pairs(self.dataset, self.fields))
    }

    /// # Errors
    /// See [`write_jsonl_vec`].
    pub fn write_rag_chunks(&self, out: &Path) -> Result<PathBuf, WriteError> {
        write_stream(out, RAG_FILE, &rag_chunks(self.dataset, self.fields))
    }

    /// Story files of [`SplitOptions::chunk_size`] properties each, the corpus
    /// summary and the search index, all into `out`.
    ///
    /// # Errors
    /// Stops at the first file that fails to write.
    pub fn write_story_corpus(&self, out: &Path) -> Result<Vec<PathBuf>, WriteError> {
        let documents = story_corpus(self.dataset, self.fields, self.options.chunk_size, &Local::now());
        let written = documents
            .iter()
            .map(|doc| write_text(&doc.text, out, &doc.file_name))
            .collect::<Result<Vec<_>, _>>()?;
        info!(files = written.len(), out = %out.display(), "wrote story corpus");
        Ok(written)
    }

    /// # Errors
    /// See [`write_jsonl_vec`].
    pub fn write_search_queries(&self, out: &Path) -> Result<PathBuf, WriteError> {
        write_stream(out, SEARCH_QUERIES_FILE, &search_queries(self.dataset, self.fields))
    }
}

fn write_stream<T: Serialize>(out: &Path, file_name: &str, records: &[T]) -> Result<PathBuf, WriteError> {
    let path = out.join(file_name);
    let n = write_jsonl_vec(&path, records)?;
    info!(file = file_name, records = n, "wrote stream");
    Ok(path)
}
