//! Question/answer pairs grounded in each feature's story.

use super::StoryBuilder;
use crate::config::FieldMap;
use crate::record::{Dataset, Feature};
use serde::{Deserialize, Serialize};

/// Pairs generated for every feature.
pub const QA_PER_FEATURE: usize = 5;

/// One question with its answer and the story it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRecord {
    pub id: String,
    pub address: String,
    pub question: String,
    pub answer: String,
    pub context: String,
}

/// [`QA_PER_FEATURE`] records per feature, in feature order.
///
/// Ids are `qa_{feature:06}_{pair:02}`, both 1-based.
#[must_use]
pub fn qa_pairs(dataset: &Dataset, fields: &FieldMap) -> Vec<QaRecord> {
    let builder = StoryBuilder::new(fields);
    let mut out = Vec::with_capacity(dataset.len() * QA_PER_FEATURE);
    for (i, feature) in dataset.iter().enumerate() {
        let address = feature.text_or(&fields.address, "Unknown address");
        let story = builder.story(feature);
        for (j, (question, answer)) in questions(feature, fields, &address, &story).into_iter().enumerate() {
            out.push(QaRecord {
                id: format!("qa_{:06}_{:02}", i + 1, j + 1),
                address: address.clone(),
                question,
                answer,
                context: story.clone(),
            });
        }
    }
    out
}

fn questions(feature: &Feature, f: &FieldMap, address: &str, story: &str) -> [(String, String); QA_PER_FEATURE] {
    let owner = feature.text_or(&f.owner, "an unknown owner");
    let zoning = feature.text_or(&f.zoning, "unknown zoning");
    let route = feature.text_or(&f.route, "an unknown route");
    [
        (format!("Tell me about the property at {address}"), story.to_string()),
        (
            format!("Who owns the property at {address}?"),
            format!("The property at {address} is owned by {owner}."),
        ),
        (
            format!("What is the zoning for {address}?"),
            format!("The property at {address} is zoned as {zoning}."),
        ),
        (
            format!("Is {address} in a flood zone?"),
            flood_zone_answer(feature, f, address),
        ),
        (
            format!("What trash route serves {address}?"),
            format!("The property at {address} is served by trash route {route}."),
        ),
    ]
}

/// `YES`, `TRUE`, `1` and `FLOOD` (any case) mean the property is in a flood
/// zone; any other non-blank value means it is not.
#[must_use]
pub fn flood_zone_answer(feature: &Feature, f: &FieldMap, address: &str) -> String {
    match feature.non_empty_text(&f.flood_zone) {
        Some(flag) if matches!(flag.to_uppercase().as_str(), "YES" | "TRUE" | "1" | "FLOOD") => {
            format!("Yes, the property at {address} is located in a flood zone.")
        }
        Some(_) => format!("No, the property at {address} is not in a flood zone."),
        None => format!("Flood zone information is not available for the property at {address}."),
    }
}
