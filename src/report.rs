//! Descriptive statistics over the whole dataset and the text report.
//!
//! [`PropertyAnalysis::build`] makes one pass to extract the analysed fields,
//! then folds them with the combiners in [`crate::combiners`]. The result
//! serializes to JSON and renders to the plain-text report.
//!
//! Two notions of "value" are kept apart:
//! - numeric statistics only see records whose total value parses to a
//!   positive number;
//! - the bucket distribution sees every record, with absent or non-numeric
//!   values counted as `0.0` (and therefore `Under $100k`).

use crate::combiners::{
    BucketCounts, Distribution, Frequency, Summary, SummaryStats, ValueBuckets, combine,
};
use crate::config::{FieldMap, UNKNOWN};
use crate::record::Dataset;
use crate::values::{count_with_thousands, number_or_zero, parse_number, with_thousands};
use chrono::Datelike;
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write as _;
use tracing::{debug, info};

/// Owners listed in the top-owners section.
pub const TOP_OWNERS: usize = 20;
/// Entries per "top 10" table.
pub const TOP_GROUPS: usize = 10;

/// Substrings that mark an owner name as a company.
pub const CORPORATE_INDICATORS: [&str; 8] =
    ["LLC", "INC", "CORP", "LTD", "TRUST", "ASSOCIATION", "COMPANY", "CO"];

/// Tunables for [`PropertyAnalysis::build`].
#[derive(Clone, Copy, Debug)]
pub struct AnalysisOptions {
    /// Years outside `min_year..=max_year` are left out of the year statistics.
    pub min_year: i64,
    pub max_year: i64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            min_year: 1800,
            max_year: i64::from(chrono::Local::now().year()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BasicStats {
    pub total_properties: usize,
    pub properties_with_addresses: usize,
    pub properties_with_owners: usize,
    pub properties_with_values: usize,
    pub properties_with_year_built: usize,
    pub unique_owners: usize,
    pub unique_zoning_types: usize,
    pub unique_neighborhoods: usize,
    pub unique_municipalities: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OwnershipAnalysis {
    pub top_owners: IndexMap<String, u64>,
    pub owner_type_distribution: Distribution,
    pub properties_per_owner: PerOwnerStats,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PerOwnerStats {
    pub mean: f64,
    pub median: f64,
    pub max: u64,
    pub owners_with_multiple_properties: usize,
}

/// Mean/median/count of positive total values within one group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct GroupValueStats {
    pub mean: f64,
    pub median: f64,
    pub count: usize,
}

/// Distribution and per-group value statistics for one categorical field.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupAnalysis {
    pub distribution: Distribution,
    pub value_analysis: IndexMap<String, GroupValueStats>,
    /// Up to [`TOP_GROUPS`] groups by mean value, highest first.
    pub top_by_value: IndexMap<String, f64>,
}

/// Everything the analysis report shows.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PropertyAnalysis {
    pub basic: BasicStats,
    pub value_statistics: SummaryStats,
    pub year_built_statistics: SummaryStats,
    pub ownership: OwnershipAnalysis,
    pub zoning: GroupAnalysis,
    pub neighborhoods: GroupAnalysis,
    pub value_distribution: BucketCounts,
}

/// Fields of one record the analysis reads.
struct Row<'a> {
    has_address: bool,
    owner: String,
    zoning: String,
    neighborhood: String,
    municipality: String,
    year: Option<&'a Value>,
    total_value: f64,
}

/// A year-built value inside the accepted range. `1950`, `1950.0` and `"1950"`
/// all read as 1950; fractional years are rejected.
fn build_year(value: &Value, options: AnalysisOptions) -> Option<f64> {
    let year = parse_number(value).ok().filter(|y| y.fract() == 0.0)?;
    #[allow(clippy::cast_precision_loss)]
    let range = options.min_year as f64..=options.max_year as f64;
    if range.contains(&year) {
        Some(year)
    } else {
        debug!(year, "year outside the accepted range");
        None
    }
}

/// `Corporate`, `Individual` or `Unknown`.
///
/// Indicators match as substrings, so `"COSTA"` counts as corporate.
#[must_use]
pub fn classify_owner(owner: &str) -> &'static str {
    if owner.is_empty() || owner == UNKNOWN {
        return "Unknown";
    }
    let upper = owner.to_uppercase();
    if CORPORATE_INDICATORS.iter().any(|i| upper.contains(i)) {
        "Corporate"
    } else {
        "Individual"
    }
}

impl PropertyAnalysis {
    #[must_use]
    pub fn build(dataset: &Dataset, fields: &FieldMap, options: AnalysisOptions) -> Self {
        let rows: Vec<Row> = dataset
            .iter()
            .map(|f| Row {
                has_address: f.non_empty_text(&fields.address).is_some(),
                owner: f.text_or(&fields.owner, UNKNOWN),
                zoning: f.text_or(&fields.zoning, UNKNOWN),
                neighborhood: f.text_or(&fields.neighborhood, UNKNOWN),
                municipality: f.text_or(&fields.municipality, UNKNOWN),
                year: f.property(&fields.year_built),
                total_value: number_or_zero(f.property(&fields.total_value)),
            })
            .collect();
        info!(records = rows.len(), "analysing dataset");

        let owners: Distribution = combine(&Frequency, rows.iter().map(|r| r.owner.clone()));
        let zoning = group_analysis(&rows, |r| &r.zoning);
        let neighborhoods = group_analysis(&rows, |r| &r.neighborhood);
        let municipalities: Distribution =
            combine(&Frequency, rows.iter().map(|r| r.municipality.clone()));

        let positive_values = rows.iter().map(|r| r.total_value).filter(|v| *v > 0.0);
        let value_statistics = combine(&Summary, positive_values);

        let years: Vec<f64> = rows
            .iter()
            .filter_map(|r| r.year)
            .filter_map(|y| build_year(y, options))
            .collect();
        let year_built_statistics = combine(&Summary, years);

        let basic = BasicStats {
            total_properties: rows.len(),
            properties_with_addresses: rows.iter().filter(|r| r.has_address).count(),
            properties_with_owners: rows.iter().filter(|r| r.owner != UNKNOWN).count(),
            properties_with_values: value_statistics.count,
            properties_with_year_built: rows.iter().filter(|r| r.year.is_some()).count(),
            unique_owners: owners.len(),
            unique_zoning_types: zoning.distribution.len(),
            unique_neighborhoods: neighborhoods.distribution.len(),
            unique_municipalities: municipalities.len(),
        };

        let ownership = OwnershipAnalysis {
            top_owners: owners
                .top_n(TOP_OWNERS)
                .into_iter()
                .map(|(name, n)| (name.clone(), n))
                .collect(),
            owner_type_distribution: combine(
                &Frequency,
                rows.iter().map(|r| classify_owner(&r.owner).to_string()),
            ),
            properties_per_owner: per_owner(&owners),
        };

        Self {
            basic,
            value_statistics,
            year_built_statistics,
            ownership,
            zoning,
            neighborhoods,
            value_distribution: combine(&ValueBuckets, rows.iter().map(|r| r.total_value)),
        }
    }

    /// The plain-text report.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        let rule = "=".repeat(80);
        let thin = "-".repeat(40);
        let b = &self.basic;
        let money = |v: f64| format!("${}", with_thousands(v, 2));

        writeln!(out, "{rule}")?;
        writeln!(out, "PROPERTY DATA ANALYSIS REPORT")?;
        writeln!(out, "{rule}")?;
        writeln!(out)?;

        writeln!(out, "BASIC STATISTICS\n{thin}")?;
        for (label, n) in [
            ("Total Properties", b.total_properties),
            ("Properties with Addresses", b.properties_with_addresses),
            ("Properties with Owners", b.properties_with_owners),
            ("Properties with Values", b.properties_with_values),
            ("Unique Owners", b.unique_owners),
            ("Unique Zoning Types", b.unique_zoning_types),
            ("Unique Neighborhoods", b.unique_neighborhoods),
        ] {
            writeln!(out, "{label}: {}", count_with_thousands(n))?;
        }
        writeln!(out)?;

        let v = &self.value_statistics;
        writeln!(out, "VALUE STATISTICS\n{thin}")?;
        writeln!(out, "Mean Property Value: {}", money(v.mean))?;
        writeln!(out, "Median Property Value: {}", money(v.median))?;
        writeln!(out, "Minimum Property Value: {}", money(v.min))?;
        writeln!(out, "Maximum Property Value: {}", money(v.max))?;
        writeln!(out, "Standard Deviation: {}", money(v.stdev))?;
        writeln!(out)?;

        let per_owner = &self.ownership.properties_per_owner;
        writeln!(out, "OWNERSHIP ANALYSIS\n{thin}")?;
        writeln!(
            out,
            "Owners with Multiple Properties: {}",
            count_with_thousands(per_owner.owners_with_multiple_properties)
        )?;
        writeln!(out, "Mean Properties per Owner: {:.2}", per_owner.mean)?;
        writeln!(out, "Max Properties per Owner: {}", count_u64(per_owner.max))?;
        writeln!(out)?;

        writeln!(out, "Top {TOP_GROUPS} Property Owners:")?;
        for (i, (owner, n)) in self.ownership.top_owners.iter().take(TOP_GROUPS).enumerate() {
            let name: String = owner.chars().take(50).collect();
            writeln!(out, "  {:2}. {name:<50} ({} properties)", i + 1, count_u64(*n))?;
        }
        writeln!(out)?;

        writeln!(out, "Owner Type Distribution:")?;
        for (kind, n) in self.ownership.owner_type_distribution.iter() {
            writeln!(
                out,
                "  {kind}: {} properties ({:.1}%)",
                count_u64(*n),
                percent(*n, b.total_properties)
            )?;
        }
        writeln!(out)?;

        writeln!(out, "ZONING ANALYSIS\n{thin}")?;
        writeln!(out, "Top {TOP_GROUPS} Zoning Types by Count:")?;
        for (i, (zone, n)) in self.zoning.distribution.top_n(TOP_GROUPS).into_iter().enumerate() {
            writeln!(out, "  {:2}. {zone:<30} ({} properties)", i + 1, count_u64(n))?;
        }
        writeln!(out)?;
        writeln!(out, "Top {TOP_GROUPS} Zoning Types by Average Value:")?;
        for (i, (zone, mean)) in self.zoning.top_by_value.iter().enumerate() {
            writeln!(out, "  {:2}. {zone:<30} ${}", i + 1, with_thousands(*mean, 0))?;
        }
        writeln!(out)?;

        writeln!(out, "NEIGHBORHOOD ANALYSIS\n{thin}")?;
        writeln!(out, "Top {TOP_GROUPS} Neighborhoods by Average Value:")?;
        for (i, (name, mean)) in self.neighborhoods.top_by_value.iter().enumerate() {
            let count = self
                .neighborhoods
                .value_analysis
                .get(name)
                .map_or(0, |s| s.count);
            writeln!(
                out,
                "  {:2}. {name:<30} ${} ({} properties)",
                i + 1,
                with_thousands(*mean, 0),
                count_with_thousands(count)
            )?;
        }
        writeln!(out)?;

        writeln!(out, "VALUE DISTRIBUTION\n{thin}")?;
        for (label, n) in self.value_distribution.iter() {
            writeln!(
                out,
                "{label:<15}: {} properties ({:.1}%)",
                count_u64(n),
                percent(n, b.properties_with_values)
            )?;
        }
        writeln!(out)?;

        let y = &self.year_built_statistics;
        writeln!(out, "YEAR BUILT STATISTICS\n{thin}")?;
        writeln!(out, "Mean Year Built: {:.0}", y.mean)?;
        writeln!(out, "Median Year Built: {:.0}", y.median)?;
        writeln!(out, "Earliest Year: {:.0}", y.min)?;
        writeln!(out, "Latest Year: {:.0}", y.max)?;
        writeln!(out)?;

        writeln!(out, "{rule}")?;
        writeln!(out, "END OF REPORT")?;
        write!(out, "{rule}")
    }
}

fn group_analysis<'a>(rows: &[Row<'a>], key: impl for<'r> Fn(&'r Row<'a>) -> &'r String) -> GroupAnalysis {
    let distribution: Distribution = combine(&Frequency, rows.iter().map(|r| key(r).clone()));

    let mut values: IndexMap<String, Vec<f64>> = IndexMap::new();
    for row in rows.iter().filter(|r| r.total_value > 0.0) {
        values.entry(key(row).clone()).or_default().push(row.total_value);
    }
    let value_analysis: IndexMap<String, GroupValueStats> = values
        .into_iter()
        .map(|(group, vals)| {
            let s = combine(&Summary, vals);
            (
                group,
                GroupValueStats {
                    mean: s.mean,
                    median: s.median,
                    count: s.count,
                },
            )
        })
        .collect();

    let mut ranked: Vec<(&String, f64)> = value_analysis.iter().map(|(g, s)| (g, s.mean)).collect();
    ranked.sort_by_key(|(_, mean)| std::cmp::Reverse(OrderedFloat(*mean)));
    let top_by_value = ranked
        .into_iter()
        .take(TOP_GROUPS)
        .map(|(g, mean)| (g.clone(), mean))
        .collect();

    GroupAnalysis {
        distribution,
        value_analysis,
        top_by_value,
    }
}

#[allow(clippy::cast_precision_loss)]
fn per_owner(owners: &Distribution) -> PerOwnerStats {
    let stats = combine(&Summary, owners.counts().map(|n| n as f64));
    PerOwnerStats {
        mean: stats.mean,
        median: stats.median,
        max: owners.counts().max().unwrap_or(0),
        owners_with_multiple_properties: owners.counts().filter(|n| *n > 1).count(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent(n: u64, of: usize) -> f64 {
    if of == 0 { 0.0 } else { n as f64 / of as f64 * 100.0 }
}

fn count_u64(n: u64) -> String {
    usize::try_from(n).map_or_else(|_| n.to_string(), count_with_thousands)
}
