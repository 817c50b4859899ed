//! Command-line surface of the `parcelbeam` binary.

use clap::{Args, Parser, Subcommand};
use parcelbeam::{Method, NamingPolicy};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "parcelbeam", version)]
#[command(about = "Split a GeoJSON property dataset into grouped files and training data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Partition the dataset and write the selected exports
    Split(SplitArgs),
    /// Print and save the descriptive statistics report
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Input GeoJSON feature collection
    #[arg(short, long, default_value = "CGProperties.json")]
    pub input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "split_output")]
    pub output: PathBuf,

    /// Records per chunk file
    #[arg(short, long, default_value_t = 100)]
    pub chunk_size: usize,

    /// Records per address-range file
    #[arg(short, long, default_value_t = 50)]
    pub records_per_file: usize,

    /// Export to produce
    #[arg(short, long, value_enum, default_value_t = Method::All)]
    pub method: Method,

    /// Write CSV instead of JSON (with `all`, only the CSV exports)
    #[arg(long)]
    pub csv_only: bool,

    /// Also write the story and Q&A streams
    #[arg(long)]
    pub llm_training: bool,

    /// How to name groups whose truncated keys collide
    #[arg(long, value_enum, default_value_t = NamingPolicy::Legacy)]
    pub naming: NamingPolicy,

    /// Reject documents that are not a feature collection
    #[arg(long)]
    pub strict: bool,

    /// JSON file overriding dataset field names
    #[arg(long, value_name = "JSON")]
    pub fields: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Input GeoJSON feature collection
    #[arg(short, long, default_value = "CGProperties.json")]
    pub input: PathBuf,

    /// Where to save the text report
    #[arg(long, default_value = "property_analysis_report.txt")]
    pub report: PathBuf,

    /// Also save the analysis as JSON
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Reject documents that are not a feature collection
    #[arg(long)]
    pub strict: bool,

    /// JSON file overriding dataset field names
    #[arg(long, value_name = "JSON")]
    pub fields: Option<PathBuf>,
}
