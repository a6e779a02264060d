use std::collections::BTreeMap;

use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

use crate::data::model::{Table, Value};
use crate::error::{DataError, StatsError};

/// Equal-width bin counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// `(lower edge, upper edge, count)` for every bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(e, &c)| (e[0], e[1], c))
    }
}

/// Bin `values` into `bins` equal-width intervals spanning [min, max].
/// Every interval is half-open except the last, which also takes `max`.
/// A zero-width range is widened by 0.5 on each side.
pub fn histogram(values: &[f64], bins: usize) -> Result<Histogram, StatsError> {
    if values.is_empty() || bins == 0 {
        return Err(StatsError::Empty);
    }

    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

    let mut counts = vec![0usize; bins];
    for &v in values {
        let slot = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[slot] += 1;
    }

    Ok(Histogram { edges, counts })
}

/// Gaussian kernel density estimate with Scott's rule bandwidth.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    samples: Vec<f64>,
    bandwidth: f64,
    kernel: Normal,
}

impl GaussianKde {
    /// Fit to a sample. Needs at least two distinct values.
    pub fn new(samples: &[f64]) -> Result<Self, StatsError> {
        if samples.len() < 2 {
            return Err(StatsError::Empty);
        }
        let sigma = samples.iter().std_dev();
        let bandwidth = sigma * (samples.len() as f64).powf(-0.2);
        if !(bandwidth > 0.0) {
            return Err(StatsError::Empty);
        }
        let kernel = Normal::new(0.0, 1.0).map_err(|_| StatsError::Empty)?;
        Ok(GaussianKde {
            samples: samples.to_vec(),
            bandwidth,
            kernel,
        })
    }

    /// Estimated probability density at `x`.
    pub fn density(&self, x: f64) -> f64 {
        let n = self.samples.len() as f64;
        let sum: f64 = self
            .samples
            .iter()
            .map(|&s| self.kernel.pdf((x - s) / self.bandwidth))
            .sum();
        sum / (n * self.bandwidth)
    }

    /// `(x, density)` at `points` evenly spaced positions over the sample range.
    pub fn curve(&self, points: usize) -> Vec<(f64, f64)> {
        let lo = self.samples.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = self.samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let steps = points.max(2) - 1;
        (0..=steps)
            .map(|i| {
                let x = lo + (hi - lo) * i as f64 / steps as f64;
                (x, self.density(x))
            })
            .collect()
    }
}

/// Mean of `value` for each distinct `key`, keys in ascending order.
/// Rows where either side is missing are ignored.
pub fn group_means(table: &Table, key: &str, value: &str) -> Result<Vec<(Value, f64)>, StatsError> {
    let keys = table.field(key)?;
    let values = table.field(value)?;

    let mut groups: BTreeMap<&Value, (f64, usize)> = BTreeMap::new();
    for (k, v) in keys.into_iter().zip(values) {
        if k.is_null() || v.is_null() {
            continue;
        }
        let v = v
            .as_f64()
            .ok_or_else(|| DataError::NonNumeric(value.to_string()))?;
        let entry = groups.entry(k).or_insert((0.0, 0));
        entry.0 += v;
        entry.1 += 1;
    }

    Ok(groups
        .into_iter()
        .map(|(k, (sum, count))| (k.clone(), sum / count as f64))
        .collect())
}
