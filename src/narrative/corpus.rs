//! Plain-text story corpus for retrieval ingestion.
//!
//! Three kinds of document, all in input order:
//! - numbered story files, `chunk_size` properties each, with a header naming the
//!   generation time and the property range they hold
//! - a lookup index with one `address | owner | file | Property #n | area` line
//!   per property, pointing into the story files
//! - a short summary with unique address and owner counts

use super::StoryBuilder;
use crate::config::{FieldMap, UNKNOWN};
use crate::partition::chunk;
use crate::record::Dataset;
use crate::values::count_with_thousands;
use chrono::{DateTime, Local};
use indexmap::IndexSet;
use std::collections::HashSet;
use std::fmt::Write as _;

pub const STORY_CHUNK_PREFIX: &str = "property_stories_chunk";
pub const SEARCH_INDEX_FILE: &str = "property_search_index.txt";
pub const CORPUS_SUMMARY_FILE: &str = "property_corpus_summary.txt";

/// Area used in the index when no hint matches the address.
pub const DEFAULT_AREA: &str = "Coral Gables";

/// Lower-case address fragment and the area it points to.
pub const AREA_HINTS: [(&str, &str); 3] = [
    ("miracle mile", "Miracle Mile District"),
    ("biltmore", "Biltmore Area"),
    ("coral way", "Coral Way"),
];

/// A rendered text file, not yet written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextDocument {
    pub file_name: String,
    pub text: String,
}

/// `property_stories_chunk_001.txt`, ...
#[must_use]
pub fn story_chunk_file_name(index: usize) -> String {
    format!("{STORY_CHUNK_PREFIX}_{index:03}.txt")
}

/// The first area hint whose fragment occurs in `address`, case-insensitively.
#[must_use]
pub fn area_hint(address: &str) -> Option<&'static str> {
    let lower = address.to_lowercase();
    AREA_HINTS
        .iter()
        .find(|(fragment, _)| lower.contains(fragment))
        .map(|(_, area)| *area)
}

/// Header timestamp, `YYYY-MM-DD HH:MM:SS` local time.
#[must_use]
pub fn corpus_timestamp(now: &DateTime<Local>) -> String {
    now.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Story files, then the summary, then the index.
#[must_use]
pub fn story_corpus(
    dataset: &Dataset,
    fields: &FieldMap,
    chunk_size: usize,
    now: &DateTime<Local>,
) -> Vec<TextDocument> {
    let generated = corpus_timestamp(now);
    let mut documents = story_chunks(dataset, fields, chunk_size, &generated);
    documents.push(corpus_summary(dataset, fields, &generated));
    documents.push(search_index(dataset, fields, chunk_size));
    documents
}

/// One story file per run of `chunk_size` properties. Properties are numbered
/// from 1 across the whole dataset.
#[must_use]
pub fn story_chunks(dataset: &Dataset, fields: &FieldMap, chunk_size: usize, generated: &str) -> Vec<TextDocument> {
    let builder = StoryBuilder::new(fields);
    let total = dataset.len();
    let mut documents = Vec::new();
    let mut first = 1;
    for run in chunk(dataset.features(), chunk_size) {
        let last = first + run.records.len() - 1;
        let mut text = String::new();
        let _ = writeln!(text, "PROPERTY STORIES - CHUNK {}", run.index);
        let _ = writeln!(text, "Generated: {generated}");
        let _ = writeln!(text, "Properties {first} to {last} of {total}");
        let _ = writeln!(text, "{}\n", "=".repeat(80));
        for (number, feature) in (first..).zip(run.records) {
            let _ = writeln!(text, "PROPERTY #{number}\n{}\n---\n", builder.story(feature));
        }
        documents.push(TextDocument {
            file_name: story_chunk_file_name(run.index),
            text,
        });
        first = last + 1;
    }
    documents
}

/// Lookup lines pointing each property at its story file.
#[must_use]
pub fn search_index(dataset: &Dataset, fields: &FieldMap, chunk_size: usize) -> TextDocument {
    let per_file = chunk_size.max(1);
    let mut text = String::from("PROPERTY SEARCH INDEX\n");
    let _ = writeln!(text, "{}\n", "=".repeat(40));
    text.push_str("Format: Address | Owner | Chunk File | Property Number | Area\n");
    let _ = writeln!(text, "{}\n", "-".repeat(100));
    for (i, feature) in dataset.iter().enumerate() {
        let address = feature.text_or(&fields.address, UNKNOWN);
        let owner = feature.text_or(&fields.owner, UNKNOWN);
        let area = area_hint(&address).unwrap_or(DEFAULT_AREA);
        let _ = writeln!(
            text,
            "{address} | {owner} | {} | Property #{} | {area}",
            story_chunk_file_name(i / per_file + 1),
            i + 1
        );
    }
    TextDocument {
        file_name: SEARCH_INDEX_FILE.to_string(),
        text,
    }
}

/// Property, address and owner counts plus the areas the addresses mention.
#[must_use]
pub fn corpus_summary(dataset: &Dataset, fields: &FieldMap, generated: &str) -> TextDocument {
    let known = |value: Option<String>| value.filter(|v| !v.is_empty() && v != UNKNOWN);
    let mut addresses = HashSet::new();
    let mut owners = HashSet::new();
    let mut areas = IndexSet::new();
    for feature in dataset {
        if let Some(address) = known(feature.text(&fields.address)) {
            areas.extend(area_hint(&address));
            addresses.insert(address);
        }
        owners.extend(known(feature.text(&fields.owner)));
    }
    let areas = if areas.is_empty() {
        "Various areas".to_string()
    } else {
        areas.into_iter().collect::<Vec<_>>().join(", ")
    };

    let mut text = String::from("PROPERTY CORPUS SUMMARY\n");
    let _ = writeln!(text, "{}\n", "=".repeat(50));
    let _ = writeln!(text, "Total Properties: {}", count_with_thousands(dataset.len()));
    let _ = writeln!(text, "Unique Addresses: {}", count_with_thousands(addresses.len()));
    let _ = writeln!(text, "Unique Property Owners: {}", count_with_thousands(owners.len()));
    let _ = writeln!(text, "Identified Neighborhoods: {areas}");
    let _ = writeln!(text, "Data Generated: {generated}\n");
    let _ = writeln!(
        text,
        "Each {STORY_CHUNK_PREFIX}_NNN.txt file holds one story per property in input order.\n\
         {SEARCH_INDEX_FILE} maps every address and owner to its story file."
    );
    TextDocument {
        file_name: CORPUS_SUMMARY_FILE.to_string(),
        text,
    }
}
