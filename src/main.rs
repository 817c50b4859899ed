mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{AnalyzeArgs, Cli, Command, SplitArgs};
use parcelbeam::{
    AnalysisOptions, FieldMap, PropertyAnalysis, ShapePolicy, SplitOptions, Splitter, load_dataset,
};
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("parcelbeam=info")),
        )
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Split(args) => split(&args),
        Command::Analyze(args) => analyze(&args),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn field_map(path: Option<&Path>) -> Result<FieldMap> {
    path.map_or_else(|| Ok(FieldMap::default()), FieldMap::from_json_file)
}

const fn shape_policy(strict: bool) -> ShapePolicy {
    if strict { ShapePolicy::Strict } else { ShapePolicy::Tolerant }
}

fn split(args: &SplitArgs) -> Result<()> {
    let fields = field_map(args.fields.as_deref())?;
    let dataset = load_dataset(&args.input, shape_policy(args.strict))
        .with_context(|| format!("load {}", args.input.display()))?;

    let options = SplitOptions {
        chunk_size: args.chunk_size,
        records_per_file: args.records_per_file,
        naming: args.naming,
        csv_only: args.csv_only,
        llm_training: args.llm_training,
    };
    let written = Splitter::new(&dataset, &fields, options)
        .run(args.method, &args.output)
        .with_context(|| format!("write exports into {}", args.output.display()))?;
    info!(files = written.len(), out = %args.output.display(), "done");
    Ok(())
}

fn analyze(args: &AnalyzeArgs) -> Result<()> {
    let fields = field_map(args.fields.as_deref())?;
    let dataset = load_dataset(&args.input, shape_policy(args.strict))
        .with_context(|| format!("load {}", args.input.display()))?;

    let analysis = PropertyAnalysis::build(&dataset, &fields, AnalysisOptions::default());
    let text = analysis.render_text();
    println!("{text}");
    fs::write(&args.report, &text).with_context(|| format!("write {}", args.report.display()))?;
    info!(report = %args.report.display(), "saved analysis report");

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&analysis).context("serialize analysis")?;
        fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        info!(json = %path.display(), "saved analysis JSON");
    }
    Ok(())
}
