//! Built-in combiners for the aggregate reports.
//!
//! A combiner folds a stream of values into an accumulator and finishes it into
//! an output:
//!
//! - [`Frequency`] -- value -> count, in first-seen order, with top-N views.
//! - [`Summary`] -- count, mean, median, min, max, sample standard deviation.
//! - [`ValueBuckets`] -- counts per fixed monetary range.
//!
//! Each combiner specifies its accumulator type (`A`) and output type (`O`).
//! `merge` lets partial accumulators built over different slices be combined,
//! so a combiner can be reused per group and for the whole dataset.
//!
//! # Examples
//! ```
//! use parcelbeam::combiners::{combine, Frequency, Summary};
//!
//! let counts = combine(&Frequency, ["R-1", "C-1", "R-1"].map(String::from));
//! assert_eq!(counts.get("R-1"), 2);
//!
//! let stats = combine(&Summary, [1.0, 2.0, 3.0]);
//! assert_eq!(stats.median, 2.0);
//! ```

mod buckets;
mod frequency;
mod statistical;

pub use buckets::{BucketCounts, VALUE_BUCKETS, ValueBuckets};
pub use frequency::{Distribution, Frequency};
pub use statistical::{Summary, SummaryStats};

/// An associative fold from values `V` through accumulator `A` to output `O`.
pub trait CombineFn<V, A, O> {
    fn create(&self) -> A;
    fn add_input(&self, acc: &mut A, v: V);
    fn merge(&self, acc: &mut A, other: A);
    fn finish(&self, acc: A) -> O;
}

/// Run `combiner` over every value of `values`.
pub fn combine<V, A, O, C>(combiner: &C, values: impl IntoIterator<Item = V>) -> O
where
    C: CombineFn<V, A, O>,
{
    let mut acc = combiner.create();
    for v in values {
        combiner.add_input(&mut acc, v);
    }
    combiner.finish(acc)
}
