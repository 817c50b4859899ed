//! Assertions for partition outputs.

use crate::partition::Partition;
use crate::record::Feature;
use std::collections::HashMap;
use std::ptr;

/// Assert that every record of `input` appears in exactly one group of
/// `partition`, and that each group keeps input order.
///
/// Records are compared by identity, so equal-looking duplicates are told apart.
///
/// # Panics
///
/// Panics with the offending record index when a record is missing, repeated,
/// or out of order within its group.
pub fn assert_partition_total(partition: &Partition<'_>, input: &[Feature]) {
    let position: HashMap<*const Feature, usize> =
        input.iter().enumerate().map(|(i, f)| (ptr::from_ref(f), i)).collect();
    let mut seen = vec![0usize; input.len()];

    for (key, records) in partition {
        let mut last = None;
        for record in records {
            let Some(&i) = position.get(&ptr::from_ref(*record)) else {
                panic!("group {key:?} holds a record that is not in the input");
            };
            seen[i] += 1;
            assert!(
                last.is_none_or(|prev| prev < i),
                "group {key:?} reorders input record {i} (after {last:?})"
            );
            last = Some(i);
        }
    }

    for (i, n) in seen.iter().enumerate() {
        assert_eq!(*n, 1, "input record {i} appears in {n} groups");
    }
}

/// Assert that the groups of `partition` iterate with exactly `expected` keys.
///
/// # Panics
///
/// Panics when the key sequence differs.
pub fn assert_group_order(partition: &Partition<'_>, expected: &[&str]) {
    let actual: Vec<&str> = partition.keys().map(|k| k.as_str()).collect();
    assert_eq!(actual, expected, "group order mismatch");
}

/// Assert the size of each group, in group order.
///
/// # Panics
///
/// Panics when the sizes differ.
pub fn assert_group_sizes(partition: &Partition<'_>, expected: &[usize]) {
    let actual: Vec<usize> = partition.iter().map(|(_, records)| records.len()).collect();
    assert_eq!(actual, expected, "group sizes mismatch");
}
