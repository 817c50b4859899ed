//! Frequency distribution combiner.

use super::CombineFn;
use indexmap::IndexMap;
use serde::Serialize;
use std::hash::Hash;

/// Count of each distinct value, in order of first appearance.
///
/// - Accumulator: `IndexMap<K, u64>`
/// - Output: [`Distribution<K>`]
#[derive(Clone, Copy, Debug, Default)]
pub struct Frequency;

impl<K> CombineFn<K, IndexMap<K, u64>, Distribution<K>> for Frequency
where
    K: Eq + Hash,
{
    fn create(&self) -> IndexMap<K, u64> {
        IndexMap::new()
    }

    fn add_input(&self, acc: &mut IndexMap<K, u64>, v: K) {
        *acc.entry(v).or_insert(0) += 1;
    }

    fn merge(&self, acc: &mut IndexMap<K, u64>, other: IndexMap<K, u64>) {
        for (k, n) in other {
            *acc.entry(k).or_insert(0) += n;
        }
    }

    fn finish(&self, acc: IndexMap<K, u64>) -> Distribution<K> {
        Distribution(acc)
    }
}

/// Value -> count mapping. Serializes as a JSON object in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Distribution<K: Eq + Hash = String>(IndexMap<K, u64>);

impl<K: Eq + Hash> Distribution<K> {
    /// Number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Count for `key`, 0 when never seen.
    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: std::borrow::Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.get(key).copied().unwrap_or(0)
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, K, u64> {
        self.0.iter()
    }

    /// Counts only, in first-seen order.
    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.values().copied()
    }

    /// The `n` most frequent values, count descending; ties keep first-seen order.
    #[must_use]
    pub fn top_n(&self, n: usize) -> Vec<(&K, u64)> {
        let mut entries: Vec<(&K, u64)> = self.0.iter().map(|(k, c)| (k, *c)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        entries
    }
}
