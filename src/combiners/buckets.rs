//! Fixed-range bucketing of monetary values.

use super::CombineFn;
use indexmap::IndexMap;
use serde::Serialize;

/// `(low, high, label)`; a value belongs to a range when `low <= v < high`.
/// The last range is open-ended and only admits positive values.
pub const VALUE_BUCKETS: [(f64, f64, &str); 7] = [
    (0.0, 100_000.0, "Under $100k"),
    (100_000.0, 250_000.0, "$100k-$250k"),
    (250_000.0, 500_000.0, "$250k-$500k"),
    (500_000.0, 1_000_000.0, "$500k-$1M"),
    (1_000_000.0, 2_500_000.0, "$1M-$2.5M"),
    (2_500_000.0, 5_000_000.0, "$2.5M-$5M"),
    (5_000_000.0, f64::INFINITY, "Over $5M"),
];

/// Counts per [`VALUE_BUCKETS`] range.
///
/// Values are expected to have absent/non-numeric inputs already mapped to
/// `0.0`, so those records count toward `Under $100k`. Negative values fall
/// in no bucket.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValueBuckets;

impl CombineFn<f64, [u64; 7], BucketCounts> for ValueBuckets {
    fn create(&self) -> [u64; 7] {
        [0; 7]
    }

    fn add_input(&self, acc: &mut [u64; 7], v: f64) {
        if let Some(idx) = bucket_index(v) {
            acc[idx] += 1;
        }
    }

    fn merge(&self, acc: &mut [u64; 7], other: [u64; 7]) {
        for (a, b) in acc.iter_mut().zip(other) {
            *a += b;
        }
    }

    fn finish(&self, acc: [u64; 7]) -> BucketCounts {
        BucketCounts(
            VALUE_BUCKETS
                .iter()
                .zip(acc)
                .map(|((_, _, label), n)| (*label, n))
                .collect(),
        )
    }
}

fn bucket_index(v: f64) -> Option<usize> {
    VALUE_BUCKETS
        .iter()
        .position(|(low, high, _)| *low <= v && v < *high)
}

/// Label -> count for every bucket, zero counts included, in range order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BucketCounts(IndexMap<&'static str, u64>);

impl BucketCounts {
    /// Count for `label`, 0 for unknown labels.
    #[must_use]
    pub fn get(&self, label: &str) -> u64 {
        self.0.get(label).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        self.0.iter().map(|(label, n)| (*label, *n))
    }
}
