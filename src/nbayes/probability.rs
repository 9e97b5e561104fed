//! Defines the probability mass/density tables
//! the estimators score with.

use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use core::f64::consts::PI;


/// The smoothed conditional-probability table of a discrete estimator,
/// indexed by `(dimension, class, category value)`.
/// For `smoothing > 0` every entry is strictly positive and
/// each `(dimension, class)` row sums to `1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTable {
    tables: Vec<Vec<Vec<f64>>>,
}


impl CategoryTable {
    /// Build the table from the weighted occurrence counts:
    /// `(count + smoothing) / (class_count + smoothing * cardinality)`.
    pub(crate) fn smoothed(
        counts: &[Vec<Vec<f64>>],
        class_counts: &[f64],
        cardinalities: &[usize],
        smoothing: f64,
    ) -> Self
    {
        let tables = counts.par_iter()
            .zip(cardinalities)
            .map(|(per_class, &cardinality)| {
                per_class.iter()
                    .zip(class_counts)
                    .map(|(histogram, &class_count)| {
                        let denominator
                            = class_count + smoothing * cardinality as f64;
                        histogram.iter()
                            .map(|&count| (count + smoothing) / denominator)
                            .collect::<Vec<_>>()
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        Self { tables }
    }


    /// The smoothed probability of observing category `value`
    /// in dimension `dim` under class `class`.
    pub fn likelihood(&self, dim: usize, class: usize, value: usize) -> f64 {
        self.tables[dim][class][value]
    }


    /// The probability row of `(dim, class)` over all category values.
    pub fn row(&self, dim: usize, class: usize) -> &[f64] {
        &self.tables[dim][class][..]
    }


    /// Number of dimensions.
    pub fn n_dims(&self) -> usize {
        self.tables.len()
    }


    /// Number of classes.
    pub fn n_classes(&self) -> usize {
        self.tables.first().map(Vec::len).unwrap_or(0)
    }


    /// Number of category values of dimension `dim`.
    pub fn cardinality(&self, dim: usize) -> usize {
        self.tables[dim].first().map(Vec::len).unwrap_or(0)
    }
}


/// Normal density with the parameters of one `(dimension, class)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gaussian {
    mean: f64,
    var: f64,
}


impl Gaussian {
    pub(crate) fn new(mean: f64, var: f64) -> Self {
        Self { mean, var }
    }


    /// The estimated mean.
    pub fn mean(&self) -> f64 {
        self.mean
    }


    /// The estimated variance.
    pub fn var(&self) -> f64 {
        self.var
    }


    /// Evaluate the density at `x`.
    ///
    /// A class whose values never vary in some dimension has zero
    /// variance, and the density degenerates to an indicator:
    /// `1` when `x` equals the constant mean, `0` otherwise.
    /// The convention keeps scoring total, though the indicator is not
    /// a proper density.
    pub fn density(&self, x: f64) -> f64 {
        if self.var == 0f64 {
            return if x == self.mean { 1f64 } else { 0f64 };
        }

        let deviation = x - self.mean;
        (- deviation.powi(2) / (2f64 * self.var)).exp()
            / (2f64 * PI * self.var).sqrt()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_peaks_at_mean() {
        let gaussian = Gaussian::new(1.5, 0.7);
        let peak = gaussian.density(1.5);
        for x in [-2f64, 0f64, 1f64, 2f64, 5f64] {
            assert!(gaussian.density(x) <= peak);
        }
    }

    #[test]
    fn density_is_symmetric() {
        let gaussian = Gaussian::new(2f64, 3f64);
        let left = gaussian.density(0.5);
        let right = gaussian.density(3.5);
        assert!((left - right).abs() < 1e-12);
    }

    #[test]
    fn standard_normal_at_zero() {
        let gaussian = Gaussian::new(0f64, 1f64);
        let expected = 1f64 / (2f64 * PI).sqrt();
        assert!((gaussian.density(0f64) - expected).abs() < 1e-12);
    }

    #[test]
    fn zero_variance_is_an_indicator() {
        let gaussian = Gaussian::new(4f64, 0f64);
        assert_eq!(gaussian.density(4f64), 1f64);
        assert_eq!(gaussian.density(4.0001), 0f64);
    }

    #[test]
    fn smoothed_rows_sum_to_one() {
        // One dimension of cardinality 2, two classes.
        let counts = vec![vec![vec![2f64, 0f64], vec![0f64, 3f64]]];
        let class_counts = [2f64, 3f64];
        let table
            = CategoryTable::smoothed(&counts, &class_counts, &[2], 1f64);

        for class in 0..2 {
            let total = table.row(0, class).iter().sum::<f64>();
            assert!((total - 1f64).abs() < 1e-9);
        }
        assert_eq!(table.likelihood(0, 0, 0), 3f64 / 4f64);
        assert_eq!(table.likelihood(0, 1, 0), 1f64 / 5f64);
    }
}
