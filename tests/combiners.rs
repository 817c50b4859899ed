use parcelbeam::combiners::{
    CombineFn, Distribution, Frequency, Summary, VALUE_BUCKETS, ValueBuckets, combine,
};
use parcelbeam::values::{number_or_zero, parse_integer, parse_number, with_thousands};
use serde_json::json;

#[test]
fn frequency_keeps_first_seen_order() {
    let counts: Distribution = combine(&Frequency, ["b", "a", "b", "c", "b"].map(String::from));
    let order: Vec<(&String, &u64)> = counts.iter().collect();
    assert_eq!(order.len(), 3);
    assert_eq!(order[0].0, "b");
    assert_eq!(counts.get("b"), 3);
    assert_eq!(counts.get("zzz"), 0);
    assert_eq!(counts.total(), 5);
}

#[test]
fn top_n_sorts_by_count_then_first_seen() {
    let counts: Distribution = combine(&Frequency, ["x", "y", "z", "y", "z", "w"].map(String::from));
    let top: Vec<(&str, u64)> = counts.top_n(3).into_iter().map(|(k, n)| (k.as_str(), n)).collect();
    assert_eq!(top, [("y", 2), ("z", 2), ("x", 1)]);
}

#[test]
fn merge_matches_single_pass() {
    let f = Frequency;
    let mut left = CombineFn::<String, _, Distribution>::create(&f);
    let mut right = CombineFn::<String, _, Distribution>::create(&f);
    for v in ["a", "b"] {
        f.add_input(&mut left, v.to_string());
    }
    for v in ["b", "c"] {
        f.add_input(&mut right, v.to_string());
    }
    f.merge(&mut left, right);
    let merged: Distribution = f.finish(left);

    let direct: Distribution = combine(&Frequency, ["a", "b", "b", "c"].map(String::from));
    assert_eq!(merged, direct);
}

#[test]
fn summary_statistics() {
    let stats = combine(&Summary, [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    assert_eq!(stats.count, 8);
    assert!((stats.mean - 5.0).abs() < 1e-12);
    assert!((stats.median - 4.5).abs() < 1e-12);
    assert_eq!(stats.min, 2.0);
    assert_eq!(stats.max, 9.0);
    // sample deviation (n - 1)
    assert!((stats.stdev - 2.138_089_935_299_395).abs() < 1e-9);
}

#[test]
fn summary_edge_cases() {
    let one = combine(&Summary, [42.0]);
    assert_eq!(one.stdev, 0.0);
    assert_eq!(one.median, 42.0);

    let empty = combine(&Summary, std::iter::empty::<f64>());
    assert_eq!(empty.count, 0);
    assert_eq!(empty.mean, 0.0);
    assert_eq!(empty.median, 0.0);
}

#[test]
fn value_buckets_classify_by_half_open_ranges() {
    let buckets = combine(&ValueBuckets, [50_000.0, 1_200_000.0]);
    assert_eq!(buckets.get("Under $100k"), 1);
    assert_eq!(buckets.get("$1M-$2.5M"), 1);
    let others: u64 = buckets
        .iter()
        .filter(|(label, _)| !matches!(*label, "Under $100k" | "$1M-$2.5M"))
        .map(|(_, n)| n)
        .sum();
    assert_eq!(others, 0);
    assert_eq!(buckets.iter().count(), VALUE_BUCKETS.len());
}

#[test]
fn value_bucket_boundaries() {
    let buckets = combine(&ValueBuckets, [0.0, 100_000.0, 5_000_000.0, 99_999_999.0, -1.0]);
    assert_eq!(buckets.get("Under $100k"), 1);
    assert_eq!(buckets.get("$100k-$250k"), 1);
    assert_eq!(buckets.get("Over $5M"), 2);
    assert_eq!(buckets.iter().map(|(_, n)| n).sum::<u64>(), 4);
}

#[test]
fn value_coercion() {
    assert_eq!(parse_number(&json!(" 1250.5 ")), Ok(1250.5));
    assert_eq!(parse_number(&json!(7)), Ok(7.0));
    assert!(parse_number(&json!("n/a")).is_err());
    assert!(parse_number(&json!("NaN")).is_err());
    assert!(parse_number(&json!(true)).is_err());

    assert_eq!(parse_integer(&json!("1925")), Ok(1925));
    assert!(parse_integer(&json!(1925.5)).is_err());

    assert_eq!(number_or_zero(Some(&json!("abc"))), 0.0);
    assert_eq!(number_or_zero(None), 0.0);
}

#[test]
fn thousands_separators() {
    assert_eq!(with_thousands(0.0, 0), "0");
    assert_eq!(with_thousands(999.0, 0), "999");
    assert_eq!(with_thousands(1000.0, 0), "1,000");
    assert_eq!(with_thousands(1_250_000.0, 2), "1,250,000.00");
}
