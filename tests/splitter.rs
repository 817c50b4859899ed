use anyhow::Result;
use parcelbeam::config::FieldMap;
use parcelbeam::io::csv::read_table_rows;
use parcelbeam::io::jsonl::read_jsonl_vec;
use parcelbeam::narrative::{QaRecord, StoryRecord};
use parcelbeam::testing::{sample_properties, two_owner_dataset};
use parcelbeam::{Method, SplitOptions, Splitter};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn file_names(dir: &Path) -> Result<Vec<String>> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .map(|e| e.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<_>>()?;
    names.sort();
    Ok(names)
}

#[test]
fn full_run_layout() -> Result<()> {
    let dir = tempdir()?;
    let out = dir.path().join("split_output");
    let fields = FieldMap::default();
    let dataset = two_owner_dataset(&fields);

    Splitter::new(&dataset, &fields, SplitOptions::default()).run(Method::All, &out)?;

    for sub in [
        "by_owner",
        "by_zoning",
        "by_route",
        "by_municipality",
        "by_neighborhood",
        "by_year_built",
        "by_chunks",
        "by_address",
        "csv_exports",
    ] {
        assert!(out.join(sub).is_dir(), "missing {sub}");
    }
    assert_eq!(file_names(&out.join("by_owner"))?, ["owner_Alice.json"]);
    assert_eq!(file_names(&out.join("by_zoning"))?, ["zoning_C-1.json", "zoning_R-1.json"]);
    assert_eq!(file_names(&out.join("by_route"))?, ["route_Unknown.json"]);
    assert_eq!(file_names(&out.join("by_chunks"))?, ["chunk_001.json"]);
    assert_eq!(
        file_names(&out.join("by_address"))?,
        ["address_range_001_100_MAIN_ST_to_200_OAK_AVE.json"]
    );
    assert!(out.join("csv_exports/owner_Alice.csv").exists());
    assert!(out.join("csv_exports/year_built_Unknown.csv").exists());
    assert_eq!(read_table_rows(out.join("csv_exports/all_properties.csv"))?.len(), 2);

    let summary: Value = serde_json::from_str(&fs::read_to_string(out.join("summary_report.json"))?)?;
    assert_eq!(summary["total_features"], 2);
    assert_eq!(summary["dimensions"]["zoning"]["unique"], 2);

    let stories: Vec<StoryRecord> = read_jsonl_vec(out.join("property_stories.jsonl"))?;
    assert_eq!(stories.len(), 2);
    let qa: Vec<QaRecord> = read_jsonl_vec(out.join("property_qa_pairs.jsonl"))?;
    assert_eq!(qa.len(), 10);
    Ok(())
}

#[test]
fn single_dimension_writes_into_the_root_with_a_summary() -> Result<()> {
    let dir = tempdir()?;
    let fields = FieldMap::default();
    let dataset = two_owner_dataset(&fields);

    let written = Splitter::new(&dataset, &fields, SplitOptions::default()).run(Method::Zoning, dir.path())?;
    assert_eq!(written.len(), 3);
    assert_eq!(
        file_names(dir.path())?,
        ["summary_report.json", "zoning_C-1.json", "zoning_R-1.json"]
    );
    Ok(())
}

#[test]
fn csv_only_single_dimension() -> Result<()> {
    let dir = tempdir()?;
    let fields = FieldMap::default();
    let dataset = two_owner_dataset(&fields);
    let options = SplitOptions {
        csv_only: true,
        ..SplitOptions::default()
    };

    Splitter::new(&dataset, &fields, options).run(Method::Owner, dir.path())?;
    assert_eq!(file_names(dir.path())?, ["owner_Alice.csv", "summary_report.json"]);
    Ok(())
}

#[test]
fn all_with_csv_only_runs_only_the_csv_exports() -> Result<()> {
    let dir = tempdir()?;
    let fields = FieldMap::default();
    let dataset = two_owner_dataset(&fields);
    let options = SplitOptions {
        csv_only: true,
        llm_training: true,
        ..SplitOptions::default()
    };

    Splitter::new(&dataset, &fields, options).run(Method::All, dir.path())?;
    assert_eq!(file_names(dir.path())?, ["csv_exports"]);
    assert!(dir.path().join("csv_exports/all_properties.csv").exists());
    Ok(())
}

#[test]
fn llm_training_appends_streams() -> Result<()> {
    let dir = tempdir()?;
    let fields = FieldMap::default();
    let dataset = two_owner_dataset(&fields);
    let options = SplitOptions {
        chunk_size: 1,
        llm_training: true,
        ..SplitOptions::default()
    };

    Splitter::new(&dataset, &fields, options).run(Method::Chunks, dir.path())?;
    assert_eq!(
        file_names(dir.path())?,
        [
            "chunk_001.json",
            "chunk_002.json",
            "property_qa_pairs.jsonl",
            "property_stories.jsonl",
            "summary_report.json",
        ]
    );
    Ok(())
}

#[test]
fn stream_and_analysis_methods_skip_the_summary() -> Result<()> {
    let dir = tempdir()?;
    let fields = FieldMap::default();
    let dataset = sample_properties(&fields);
    let splitter = Splitter::new(&dataset, &fields, SplitOptions::default());

    splitter.run(Method::RagChunks, dir.path())?;
    splitter.run(Method::SearchQueries, dir.path())?;
    splitter.run(Method::Analyze, dir.path())?;
    assert_eq!(
        file_names(dir.path())?,
        ["field_analysis.json", "rag_chunks.jsonl", "search_queries.jsonl"]
    );

    let analysis: Value = serde_json::from_str(&fs::read_to_string(dir.path().join("field_analysis.json"))?)?;
    assert_eq!(analysis["total_features"], 5);
    Ok(())
}

#[test]
fn address_ranges_respect_records_per_file() -> Result<()> {
    let dir = tempdir()?;
    let fields = FieldMap::default();
    let dataset = sample_properties(&fields);
    let options = SplitOptions {
        records_per_file: 2,
        ..SplitOptions::default()
    };

    let splitter = Splitter::new(&dataset, &fields, options);
    let written = splitter.split_address_ranges(dir.path(), parcelbeam::Format::Json)?;
    assert_eq!(written.len(), 3);
    assert!(dir.path().join("address_range_001_Unknown_to_1_ALHAMBRA_CIR.json").exists());
    Ok(())
}

#[test]
fn rag_data_writes_text_corpus_only() -> Result<()> {
    let dir = tempdir()?;
    let fields = FieldMap::default();
    let dataset = sample_properties(&fields);
    let options = SplitOptions {
        chunk_size: 2,
        ..SplitOptions::default()
    };

    let written = Splitter::new(&dataset, &fields, options).run(Method::RagData, dir.path())?;
    assert_eq!(written.len(), 5);
    assert_eq!(
        file_names(dir.path())?,
        [
            "property_corpus_summary.txt",
            "property_search_index.txt",
            "property_stories_chunk_001.txt",
            "property_stories_chunk_002.txt",
            "property_stories_chunk_003.txt",
        ]
    );
    let index = fs::read_to_string(dir.path().join("property_search_index.txt"))?;
    assert!(index.contains("| property_stories_chunk_003.txt | Property #5 |"));
    Ok(())
}
