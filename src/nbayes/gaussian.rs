//! Defines the Naive Bayes estimator over continuous features.

use rayon::prelude::*;

use crate::Sample;
use crate::sample::Value;
use crate::quantize::{
    Quantizer,
    ContinuousBlock,
    ClassPartition,
    LabelCodec,
};
use crate::error::{MiniBayesError, Result};
use crate::common::utils;

use super::core::{NaiveBayes, Encoded, prior_probability, DEFAULT_SMOOTHING};
use super::probability::Gaussian;


/// Quantized training data plus the rescaled sample weights.
#[derive(Debug, Clone)]
struct GaussianData {
    block: ContinuousBlock,
    classes: ClassPartition,
    /// Weights rescaled by `w[i] * N`; `None` means uniform.
    weights: Option<Vec<f64>>,
}


/// The density evaluators built by `fit_tables`.
#[derive(Debug, Clone)]
struct GaussianModel {
    /// Indexed by `(dimension, class)`.
    densities: Vec<Vec<Gaussian>>,
    prior: Vec<f64>,
}


/// Naive Bayes over continuous features.
/// Every column is cast to `f64`;
/// each `(dimension, class)` pair gets a normal density whose mean and
/// variance are the (weighted) maximum-likelihood estimates over the
/// rows of that class.
///
/// The smoothing constant is ignored by this estimator:
/// densities are pure maximum likelihood
/// and the prior uses the raw class frequencies.
#[derive(Debug, Clone)]
pub struct GaussianNB {
    smoothing: f64,
    data: Option<GaussianData>,
    model: Option<GaussianModel>,
}


impl GaussianNB {
    /// Construct an unfitted estimator.
    pub fn new() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            data: None,
            model: None,
        }
    }


    /// The density evaluators of the fitted model,
    /// indexed by `(dimension, class)`.
    pub fn densities(&self) -> Result<&[Vec<Gaussian>]> {
        self.model.as_ref()
            .map(|model| &model.densities[..])
            .ok_or(MiniBayesError::NotFitted)
    }


    /// Names of the continuous dimensions.
    pub(crate) fn feature_names(&self) -> Result<&[String]> {
        Ok(self.data()?.block.names())
    }


    /// Ingest an already-quantized continuous block.
    /// Shared by `feed_data` and the merged estimator.
    pub(crate) fn feed_parts(
        &mut self,
        block: ContinuousBlock,
        classes: ClassPartition,
        weight: Option<&[f64]>,
    ) -> Result<()>
    {
        let weights = weight
            .map(|w| utils::globally_scaled(&classes, w))
            .transpose()?;
        self.data = Some(GaussianData { block, classes, weights });
        self.model = None;
        Ok(())
    }


    fn data(&self) -> Result<&GaussianData> {
        self.data.as_ref().ok_or(MiniBayesError::NotFitted)
    }
}


impl Default for GaussianNB {
    fn default() -> Self {
        Self::new()
    }
}


impl NaiveBayes for GaussianNB {
    fn feed_data(&mut self, sample: &Sample, weight: Option<&[f64]>)
        -> Result<()>
    {
        let n_columns = sample.shape().1;
        let quantized = Quantizer::all_continuous(n_columns)
            .quantize(sample)?;
        self.feed_parts(quantized.continuous, quantized.classes, weight)
    }


    fn feed_sample_weight(&mut self, weight: Option<&[f64]>) -> Result<()> {
        let data = self.data.as_mut().ok_or(MiniBayesError::NotFitted)?;
        let weights = weight
            .map(|w| utils::globally_scaled(&data.classes, w))
            .transpose()?;

        data.weights = weights;
        Ok(())
    }


    /// Builds the per-`(dimension, class)` normal densities.
    /// The smoothing constant has no effect here.
    fn fit_tables(&mut self, _smoothing: f64) -> Result<()> {
        let data = self.data()?;
        let weights = data.weights.as_deref();

        let densities = data.block.reals.par_iter()
            .map(|column| {
                data.classes.rows()
                    .iter()
                    .map(|rows| weighted_moments(column, rows, weights))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let prior = prior_probability(
            data.classes.counts(),
            data.classes.n_sample(),
            0f64,
        );

        self.model = Some(GaussianModel { densities, prior });
        Ok(())
    }


    fn encode_row(&self, row: &[Value]) -> Result<Vec<Encoded>> {
        let data = self.data()?;
        let names = data.block.names();

        if row.len() != names.len() {
            return Err(MiniBayesError::FeatureCountMismatch {
                expected: names.len(),
                got: row.len(),
            });
        }

        row.iter()
            .zip(names)
            .map(|(value, name)| {
                value.as_number()
                    .map(Encoded::Num)
                    .ok_or_else(|| MiniBayesError::NonNumericValue {
                        feature: name.clone(),
                        value: value.to_string(),
                    })
            })
            .collect()
    }


    fn score(&self, row: &[Encoded], class: usize) -> f64 {
        let model = self.model.as_ref()
            .expect("`GaussianNB::score` called before `fit_tables`");

        let likelihood = row.iter()
            .enumerate()
            .map(|(dim, cell)| {
                model.densities[dim][class].density(cell.as_value())
            })
            .product::<f64>();

        likelihood * model.prior[class]
    }


    fn smoothing(&self) -> f64 {
        self.smoothing
    }


    fn label_codec(&self) -> Result<&LabelCodec> {
        Ok(self.data()?.classes.labels())
    }


    fn class_counts(&self) -> Result<&[f64]> {
        Ok(self.data()?.classes.counts())
    }


    fn n_samples(&self) -> Result<usize> {
        Ok(self.data()?.classes.n_sample())
    }


    fn prior(&self) -> Result<&[f64]> {
        self.model.as_ref()
            .map(|model| &model.prior[..])
            .ok_or(MiniBayesError::NotFitted)
    }
}


/// Weighted maximum-likelihood mean and variance of `column`
/// restricted to `rows`.
fn weighted_moments(
    column: &[f64],
    rows: &[usize],
    weights: Option<&[f64]>,
) -> Gaussian
{
    let total = match weights {
        None => rows.len() as f64,
        Some(w) => rows.iter().map(|&i| w[i]).sum::<f64>(),
    };

    let mean = match weights {
        None => rows.iter().map(|&i| column[i]).sum::<f64>(),
        Some(w) => rows.iter().map(|&i| w[i] * column[i]).sum::<f64>(),
    } / total;

    let var = match weights {
        None => {
            rows.iter()
                .map(|&i| (column[i] - mean).powi(2))
                .sum::<f64>()
        },
        Some(w) => {
            rows.iter()
                .map(|&i| w[i] * (column[i] - mean).powi(2))
                .sum::<f64>()
        },
    } / total;

    Gaussian::new(mean, var)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moments_of_a_constant_column() {
        let column = [3f64, 3f64, 7f64];
        let gaussian = weighted_moments(&column, &[0, 1], None);
        assert_eq!(gaussian.mean(), 3f64);
        assert_eq!(gaussian.var(), 0f64);
    }

    #[test]
    fn uniform_weights_match_unweighted() {
        let column = [1f64, 2f64, 4f64, 8f64];
        let rows = [0, 1, 3];
        let plain = weighted_moments(&column, &rows, None);
        let weighted
            = weighted_moments(&column, &rows, Some(&[4f64; 4]));
        assert!((plain.mean() - weighted.mean()).abs() < 1e-12);
        assert!((plain.var() - weighted.var()).abs() < 1e-12);
    }
}
