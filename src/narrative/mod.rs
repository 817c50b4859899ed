//! Training-data generators built on the loaded dataset.
//!
//! Every generator maps features to serializable records in input order; the
//! caller writes them as JSON lines.
//!
//! | Generator          | Record          | Default stream              |
//! |--------------------|-----------------|-----------------------------|
//! | [`stories`]        | [`StoryRecord`] | `property_stories.jsonl`    |
//! | [`qa_pairs`]       | [`QaRecord`]    | `property_qa_pairs.jsonl`   |
//! | [`rag_chunks`]     | [`RagChunk`]    | `rag_chunks.jsonl`          |
//! | [`search_queries`] | [`SearchQuery`] | `search_queries.jsonl`      |
//!
//! [`story_corpus`] renders the same stories as plain-text files instead, for
//! retrieval systems that ingest documents rather than records.

mod corpus;
mod qa;
mod retrieval;
mod story;

pub use corpus::{
    AREA_HINTS, CORPUS_SUMMARY_FILE, DEFAULT_AREA, SEARCH_INDEX_FILE, STORY_CHUNK_PREFIX, TextDocument,
    area_hint, corpus_summary, corpus_timestamp, search_index, story_chunk_file_name, story_chunks,
    story_corpus,
};
pub use qa::{QA_PER_FEATURE, QaRecord, flood_zone_answer, qa_pairs};
pub use retrieval::{
    GENERAL_QUERIES, RagChunk, RagMetadata, SAMPLED_FEATURES, SearchQuery, rag_chunks, search_queries,
};
pub use story::{LEGAL_EXCERPT_LEN, StoryBuilder, excerpt};

use crate::config::FieldMap;
use crate::record::{Dataset, Feature};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One story with the fields it was built from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoryRecord {
    pub id: String,
    pub address: String,
    pub story: String,
    pub metadata: StoryMetadata,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoryMetadata {
    pub owner: String,
    pub zoning: String,
    pub municipality: String,
    pub neighborhood: String,
    pub year_built: String,
    pub trash_route: String,
    pub coordinates: Value,
}

/// `property_000001`, `property_000002`, ...
#[must_use]
pub fn property_id(index: usize) -> String {
    format!("property_{:06}", index + 1)
}

/// One [`StoryRecord`] per feature.
#[must_use]
pub fn stories(dataset: &Dataset, fields: &FieldMap) -> Vec<StoryRecord> {
    let builder = StoryBuilder::new(fields);
    dataset
        .iter()
        .enumerate()
        .map(|(i, feature)| StoryRecord {
            id: property_id(i),
            address: feature.text_or(&fields.address, "Unknown address"),
            story: builder.story(feature),
            metadata: story_metadata(feature, fields),
        })
        .collect()
}

fn story_metadata(feature: &Feature, f: &FieldMap) -> StoryMetadata {
    StoryMetadata {
        owner: feature.text_or(&f.owner, "Unknown owner"),
        zoning: feature.text_or(&f.zoning, "Unknown zoning"),
        municipality: feature.text_or(&f.municipality, "Unknown municipality"),
        neighborhood: feature.text_or(&f.neighborhood, "Unknown neighborhood"),
        year_built: feature.text_or(&f.year_built, "Unknown year"),
        trash_route: feature.text_or(&f.route, "Unknown route"),
        coordinates: feature.coordinates_value(),
    }
}
