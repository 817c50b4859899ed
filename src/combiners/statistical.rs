//! Statistical combiners: `Summary`

use super::CombineFn;
use ordered_float::OrderedFloat;
use serde::Serialize;

/* ===================== Summary ===================== */

/// Descriptive statistics over `f64` values.
///
/// - Accumulator: `Vec<f64>` (the median needs every observation)
/// - Output: [`SummaryStats`]
///
/// An empty input produces all zeros. The standard deviation is the sample
/// deviation (`n - 1` denominator) and is `0.0` for fewer than two values.
#[derive(Clone, Copy, Debug, Default)]
pub struct Summary;

impl CombineFn<f64, Vec<f64>, SummaryStats> for Summary {
    fn create(&self) -> Vec<f64> {
        Vec::new()
    }

    fn add_input(&self, acc: &mut Vec<f64>, v: f64) {
        acc.push(v);
    }

    fn merge(&self, acc: &mut Vec<f64>, other: Vec<f64>) {
        acc.extend(other);
    }

    fn finish(&self, acc: Vec<f64>) -> SummaryStats {
        SummaryStats::from_values(acc)
    }
}

/// Output of [`Summary`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub stdev: f64,
}

impl SummaryStats {
    #[allow(clippy::cast_precision_loss)]
    fn from_values(mut values: Vec<f64>) -> Self {
        let count = values.len();
        if count == 0 {
            return Self::default();
        }
        values.sort_by_key(|v| OrderedFloat(*v));

        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (values[mid - 1] + values[mid]) / 2.0
        } else {
            values[mid]
        };
        let stdev = if count < 2 {
            0.0
        } else {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1.0)).sqrt()
        };

        Self {
            count,
            mean,
            median,
            min: values[0],
            max: values[count - 1],
            stdev,
        }
    }
}
