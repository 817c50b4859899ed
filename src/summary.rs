//! Dataset overview documents: `summary_report.json` and `field_analysis.json`.

use crate::combiners::{Distribution, Frequency, combine};
use crate::config::{Dimension, FieldMap};
use crate::record::Dataset;
use crate::values::canonical;
use chrono::{DateTime, Local, SecondsFormat};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::collections::BTreeMap;

/// Sample values kept per field in [`FieldAnalysis`].
pub const SAMPLE_VALUES: usize = 10;

/// Group counts for one dimension.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DimensionSummary {
    pub unique: usize,
    pub distribution: Distribution,
}

/// Totals and per-dimension distributions, stamped with the generation time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryReport {
    pub total_features: usize,
    /// Keyed by dimension label, in dimension order.
    pub dimensions: IndexMap<String, DimensionSummary>,
    /// Property keys of the first feature, in document order.
    pub available_properties: Vec<String>,
    pub generated_at: String,
}

impl SummaryReport {
    #[must_use]
    pub fn build(dataset: &Dataset, dimensions: &[Dimension]) -> Self {
        Self::build_at(dataset, dimensions, Local::now())
    }

    /// [`build`](Self::build) with a fixed timestamp.
    #[must_use]
    pub fn build_at(dataset: &Dataset, dimensions: &[Dimension], now: DateTime<Local>) -> Self {
        let dimensions = dimensions
            .iter()
            .map(|dim| {
                let distribution: Distribution = combine(
                    &Frequency,
                    dataset.iter().map(|f| f.text_or(&dim.field, dim.default)),
                );
                let summary = DimensionSummary {
                    unique: distribution.len(),
                    distribution,
                };
                (dim.label.to_string(), summary)
            })
            .collect();

        Self {
            total_features: dataset.len(),
            dimensions,
            available_properties: dataset
                .features()
                .first()
                .map(|f| f.properties().keys().cloned().collect())
                .unwrap_or_default(),
            generated_at: now.to_rfc3339_opts(SecondsFormat::Secs, false),
        }
    }
}

/// What is known about one property key across the dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldProfile {
    pub unique_values: usize,
    pub sample_values: Vec<String>,
    pub used_in_stories: bool,
}

/// Every property key in the dataset, sorted, with value counts and samples.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldAnalysis {
    pub total_features: usize,
    pub total_fields: usize,
    pub fields: BTreeMap<String, FieldProfile>,
}

impl FieldAnalysis {
    #[must_use]
    pub fn build(dataset: &Dataset, fields: &FieldMap) -> Self {
        let mut seen: BTreeMap<&str, IndexSet<String>> = BTreeMap::new();
        for feature in dataset {
            for (key, value) in feature.properties() {
                let text = canonical(value).unwrap_or_else(|| "null".into());
                seen.entry(key.as_str()).or_default().insert(text);
            }
        }

        let narrative = fields.narrative_fields();
        let fields: BTreeMap<String, FieldProfile> = seen
            .into_iter()
            .map(|(key, values)| {
                let profile = FieldProfile {
                    unique_values: values.len(),
                    sample_values: values.into_iter().take(SAMPLE_VALUES).collect(),
                    used_in_stories: narrative.contains(&key),
                };
                (key.to_string(), profile)
            })
            .collect();

        Self {
            total_features: dataset.len(),
            total_fields: fields.len(),
            fields,
        }
    }
}
