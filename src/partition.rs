//! Grouping records by key, and slicing them positionally.
//!
//! - [`partition`] groups by an arbitrary key function; [`partition_by_field`]
//!   is the common "read one property, default when absent" case.
//! - [`chunk`] slices the input into consecutive runs of a fixed size.
//! - [`sorted_chunk`] stable-sorts first, then slices, and records the first and
//!   last sort key of each slice.
//!
//! # Invariants
//! - Every input record lands in exactly one group.
//! - Groups iterate in order of first occurrence of their key.
//! - Within a group, records keep their input order.

use crate::record::{Feature, GroupKey};
use indexmap::IndexMap;
use indexmap::map::Iter;

/// Insertion-ordered mapping from group key to the records that carry it.
///
/// Records are borrowed from the dataset; a partition lives for one export.
#[derive(Clone, Debug, Default)]
pub struct Partition<'a> {
    groups: IndexMap<GroupKey, Vec<&'a Feature>>,
}

impl<'a> Partition<'a> {
    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total records across all groups; equals the input length.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[&'a Feature]> {
        self.groups.get(&GroupKey::from(key)).map(Vec::as_slice)
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.keys()
    }

    /// Groups in first-seen order.
    pub fn iter(&self) -> Iter<'_, GroupKey, Vec<&'a Feature>> {
        self.groups.iter()
    }

    /// Records of every group, concatenated in group order.
    pub fn flatten(&self) -> impl Iterator<Item = &'a Feature> + '_ {
        self.groups.values().flat_map(|records| records.iter().copied())
    }
}

impl<'p, 'a> IntoIterator for &'p Partition<'a> {
    type Item = (&'p GroupKey, &'p Vec<&'a Feature>);
    type IntoIter = Iter<'p, GroupKey, Vec<&'a Feature>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Group `records` by `key_fn`.
pub fn partition<'a, F>(records: &'a [Feature], key_fn: F) -> Partition<'a>
where
    F: Fn(&Feature) -> GroupKey,
{
    let mut groups: IndexMap<GroupKey, Vec<&'a Feature>> = IndexMap::new();
    for record in records {
        groups.entry(key_fn(record)).or_default().push(record);
    }
    Partition { groups }
}

/// Group `records` by the canonical text of `field`, using `default` when the
/// field is absent.
pub fn partition_by_field<'a>(records: &'a [Feature], field: &str, default: &str) -> Partition<'a> {
    partition(records, |record| record.key_or(field, default))
}

/// A positional slice of the input. `index` is 1-based.
#[derive(Clone, Copy, Debug)]
pub struct Chunk<'a> {
    pub index: usize,
    pub records: &'a [Feature],
}

/// Split `records` into consecutive runs of `size` (the last may be shorter).
///
/// A `size` of 0 is treated as 1. Empty input yields no chunks.
#[must_use]
pub fn chunk(records: &[Feature], size: usize) -> Vec<Chunk<'_>> {
    records
        .chunks(size.max(1))
        .enumerate()
        .map(|(i, records)| Chunk {
            index: i + 1,
            records,
        })
        .collect()
}

/// A slice of the sorted input with its boundary sort keys. `index` is 1-based.
#[derive(Clone, Debug)]
pub struct SortedChunk<'a, K> {
    pub index: usize,
    pub records: Vec<&'a Feature>,
    pub first_key: K,
    pub last_key: K,
}

/// Stable-sort `records` by `sort_key_fn` (ties keep input order), then split
/// into runs of `size`.
pub fn sorted_chunk<'a, K, F>(records: &'a [Feature], size: usize, sort_key_fn: F) -> Vec<SortedChunk<'a, K>>
where
    K: Ord + Clone,
    F: Fn(&Feature) -> K,
{
    let mut keyed: Vec<(K, &'a Feature)> = records.iter().map(|r| (sort_key_fn(r), r)).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    keyed
        .chunks(size.max(1))
        .enumerate()
        .filter_map(|(i, run)| {
            let (first_key, _) = run.first()?;
            let (last_key, _) = run.last()?;
            Some(SortedChunk {
                index: i + 1,
                first_key: first_key.clone(),
                last_key: last_key.clone(),
                records: run.iter().map(|(_, r)| *r).collect(),
            })
        })
        .collect()
}
