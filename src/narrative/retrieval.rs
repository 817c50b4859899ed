//! Retrieval chunks for a vector store, and sample queries to test it with.

use super::property_id;
use crate::config::FieldMap;
use crate::record::{Dataset, Feature};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Features sampled for property-specific queries.
pub const SAMPLED_FEATURES: usize = 100;
/// Legal descriptions are cut to this many characters in chunk content.
const LEGAL_CONTENT_LEN: usize = 200;

const PROPERTY_QUERIES: [&str; 5] = [
    "Who owns the property at {address}?",
    "What is the zoning for {address}?",
    "What trash route serves {address}?",
    "When was {address} built?",
    "What is the property value of {address}?",
];

/// Dataset-wide queries appended after the property-specific ones.
pub const GENERAL_QUERIES: [&str; 10] = [
    "Find all properties owned by the city",
    "Show me all properties with historical designation",
    "List all condominium properties",
    "Find properties with lot size over 10,000 square feet",
    "Show me properties with total value over $1 million",
    "Find all properties in flood zones",
    "List properties built before 1950",
    "Show me properties with multiple units",
    "Find properties with specific zoning codes",
    "List all properties served by specific trash routes",
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RagChunk {
    pub id: String,
    pub content: String,
    pub metadata: RagMetadata,
    pub embedding_text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RagMetadata {
    pub address: String,
    pub owner: String,
    pub zoning: String,
    pub municipality: String,
    pub neighborhood: String,
    pub year_built: String,
    pub trash_route: String,
    pub coordinates: Value,
    pub property_id: String,
    pub folio: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One searchable chunk per feature.
#[must_use]
pub fn rag_chunks(dataset: &Dataset, fields: &FieldMap) -> Vec<RagChunk> {
    dataset
        .iter()
        .enumerate()
        .map(|(i, feature)| rag_chunk(i, feature, fields))
        .collect()
}

fn rag_chunk(index: usize, feature: &Feature, f: &FieldMap) -> RagChunk {
    let text = |key: &str| feature.non_empty_text(key).unwrap_or_default();
    let metadata = RagMetadata {
        address: text(&f.address),
        owner: text(&f.owner),
        zoning: text(&f.zoning),
        municipality: text(&f.municipality),
        neighborhood: text(&f.neighborhood),
        year_built: text(&f.year_built),
        trash_route: text(&f.route),
        coordinates: feature.coordinates_value(),
        property_id: text(&f.feature_id),
        folio: text(&f.folio),
        kind: "property_data".into(),
    };

    let mut content = [
        ("Property Address", &metadata.address),
        ("Owner", &metadata.owner),
        ("Zoning", &metadata.zoning),
        ("Municipality", &metadata.municipality),
        ("Neighborhood", &metadata.neighborhood),
        ("Year Built", &metadata.year_built),
        ("Trash Route", &metadata.trash_route),
    ]
    .iter()
    .map(|(label, value)| format!("{label}: {value}\n"))
    .collect::<String>();

    let extra = [
        ("Lot Size", text(&f.lot_size)),
        ("Property Type", text(&f.property_type)),
        ("Building Value", text(&f.building_value)),
        ("Land Value", text(&f.land_value)),
        ("Total Value", text(&f.total_value)),
        ("Recycling", text(&f.recycling)),
        ("Garbage Days", text(&f.garbage_days)),
        ("Legal Description", text(&f.legal).chars().take(LEGAL_CONTENT_LEN).collect()),
        ("Mailing Address", text(&f.mailing_address)),
        ("Folio Number", text(&f.folio)),
    ];
    for (label, value) in extra {
        if !value.is_empty() {
            content.push_str(&format!("{label}: {value}\n"));
        }
    }

    let embedding_text = [
        &metadata.address,
        &metadata.owner,
        &metadata.zoning,
        &metadata.municipality,
        &metadata.neighborhood,
        &metadata.year_built,
        &metadata.trash_route,
    ]
    .map(String::as_str)
    .join(" ");

    RagChunk {
        id: property_id(index),
        content: content.trim().to_string(),
        metadata,
        embedding_text,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub id: String,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_address: Option<String>,
    pub query_type: String,
}

/// Property-specific queries for the first [`SAMPLED_FEATURES`] features that
/// have an address, then every [`GENERAL_QUERIES`] entry. Ids are sequential.
#[must_use]
pub fn search_queries(dataset: &Dataset, fields: &FieldMap) -> Vec<SearchQuery> {
    let mut out = Vec::new();
    for feature in dataset.iter().take(SAMPLED_FEATURES) {
        let Some(address) = feature.non_empty_text(&fields.address) else {
            continue;
        };
        for pattern in PROPERTY_QUERIES {
            out.push(SearchQuery {
                id: String::new(),
                query: pattern.replace("{address}", &address),
                expected_address: Some(address.clone()),
                query_type: "property_specific".into(),
            });
        }
    }
    for query in GENERAL_QUERIES {
        out.push(SearchQuery {
            id: String::new(),
            query: query.to_string(),
            expected_address: None,
            query_type: "general_search".into(),
        });
    }
    for (i, q) in out.iter_mut().enumerate() {
        q.id = format!("query_{:06}", i + 1);
    }
    out
}
