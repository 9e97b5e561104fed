//! Defines the Naive Bayes estimator over mixed feature types.

use fixedbitset::FixedBitSet;

use crate::Sample;
use crate::sample::Value;
use crate::quantize::{Quantizer, ClassPartition, LabelCodec};
use crate::error::{MiniBayesError, Result};
use crate::common::utils;

use super::core::{NaiveBayes, Encoded, DEFAULT_SMOOTHING};
use super::multinomial::MultinomialNB;
use super::gaussian::GaussianNB;


#[derive(Debug, Clone)]
struct MergedData {
    mask: FixedBitSet,
    n_columns: usize,
    classes: ClassPartition,
}


#[derive(Debug, Clone)]
struct MergedModel {
    /// The prior shared by both sub-estimators' label partition,
    /// cached from the discrete one.
    prior: Vec<f64>,
}


/// Naive Bayes over mixed discrete/continuous features.
///
/// The sample is split by a continuous-column mask into a categorical
/// sub-matrix, routed into an internal [`MultinomialNB`],
/// and a continuous sub-matrix, routed into an internal [`GaussianNB`].
/// Both share one label dictionary and one class partition.
/// When no mask is given it is inferred from the column types.
///
/// Each sub-estimator's score already carries the class prior,
/// so the combined score divides by the shared prior once:
/// `multinomial(x_d, c) * gaussian(x_c, c) / prior[c]`.
///
/// # Example
/// ```
/// use minibayes::prelude::*;
/// use minibayes::sample::Value;
///
/// let rows = vec![
///     vec![Value::from("a"), Value::from(1.0)],
///     vec![Value::from("a"), Value::from(1.2)],
///     vec![Value::from("b"), Value::from(3.0)],
///     vec![Value::from("b"), Value::from(3.2)],
/// ];
/// let sample = Sample::from_rows(rows, vec!["yes", "yes", "no", "no"])
///     .unwrap();
///
/// let mut model = MergedNB::new()
///     .whether_continuous(&[false, true]);
/// model.fit(&sample, None).unwrap();
///
/// let row = [Value::from("a"), Value::from(1.1)];
/// assert_eq!(model.predict_row(&row).unwrap(), "yes");
/// ```
#[derive(Debug, Clone)]
pub struct MergedNB {
    smoothing: f64,
    whether_continuous: Option<Vec<bool>>,
    multinomial: MultinomialNB,
    gaussian: GaussianNB,
    data: Option<MergedData>,
    model: Option<MergedModel>,
}


impl MergedNB {
    /// Construct an unfitted estimator with Laplace smoothing
    /// and a type-inferred column mask.
    pub fn new() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            whether_continuous: None,
            multinomial: MultinomialNB::new(),
            gaussian: GaussianNB::new(),
            data: None,
            model: None,
        }
    }


    /// Set the smoothing constant used by `fit`.
    /// Only the discrete sub-estimator is affected.
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        assert!(smoothing >= 0f64, "the smoothing constant is negative");
        self.smoothing = smoothing;
        self
    }


    /// Mark each column as continuous (`true`) or discrete (`false`).
    /// The same mask splits every row at predict time.
    pub fn whether_continuous(mut self, flags: &[bool]) -> Self {
        self.whether_continuous = Some(flags.to_vec());
        self
    }


    /// The discrete sub-estimator.
    pub fn multinomial(&self) -> &MultinomialNB {
        &self.multinomial
    }


    /// The continuous sub-estimator.
    pub fn gaussian(&self) -> &GaussianNB {
        &self.gaussian
    }


    fn data(&self) -> Result<&MergedData> {
        self.data.as_ref().ok_or(MiniBayesError::NotFitted)
    }
}


impl Default for MergedNB {
    fn default() -> Self {
        Self::new()
    }
}


impl NaiveBayes for MergedNB {
    fn feed_data(&mut self, sample: &Sample, weight: Option<&[f64]>)
        -> Result<()>
    {
        let quantizer = match &self.whether_continuous {
            Some(flags) => Quantizer::new().whether_continuous(flags),
            None => Quantizer::new(),
        };
        let quantized = quantizer.quantize(sample)?;

        // Validate the weights once up front so that neither
        // sub-estimator is left half-fed on failure.
        if let Some(w) = weight {
            utils::validate_weights(&quantized.classes, w)?;
        }

        self.multinomial.feed_parts(
            quantized.discrete,
            quantized.classes.clone(),
            weight,
        )?;
        self.gaussian.feed_parts(
            quantized.continuous,
            quantized.classes.clone(),
            weight,
        )?;

        self.data = Some(MergedData {
            mask: quantized.mask,
            n_columns: quantized.n_columns,
            classes: quantized.classes,
        });
        self.model = None;
        Ok(())
    }


    fn feed_sample_weight(&mut self, weight: Option<&[f64]>) -> Result<()> {
        let data = self.data.as_ref().ok_or(MiniBayesError::NotFitted)?;
        if let Some(w) = weight {
            utils::validate_weights(&data.classes, w)?;
        }

        self.multinomial.feed_sample_weight(weight)?;
        self.gaussian.feed_sample_weight(weight)
    }


    fn fit_tables(&mut self, smoothing: f64) -> Result<()> {
        self.data()?;

        self.multinomial.fit_tables(smoothing)?;
        self.gaussian.fit_tables(smoothing)?;

        // Both sub-estimators are built over the same class partition,
        // so either prior would do; cache the discrete one.
        let prior = self.multinomial.prior()?.to_vec();
        self.model = Some(MergedModel { prior });
        Ok(())
    }


    fn encode_row(&self, row: &[Value]) -> Result<Vec<Encoded>> {
        let data = self.data()?;

        if row.len() != data.n_columns {
            return Err(MiniBayesError::FeatureCountMismatch {
                expected: data.n_columns,
                got: row.len(),
            });
        }

        let codecs = self.multinomial.feature_codecs()?;
        let names = self.gaussian.feature_names()?;

        let mut encoded = Vec::with_capacity(row.len());
        let mut discrete_dim = 0;
        let mut continuous_dim = 0;
        for (d, value) in row.iter().enumerate() {
            if data.mask.contains(d) {
                let x = value.as_number().ok_or_else(|| {
                    MiniBayesError::NonNumericValue {
                        feature: names[continuous_dim].clone(),
                        value: value.to_string(),
                    }
                })?;
                encoded.push(Encoded::Num(x));
                continuous_dim += 1;
            } else {
                let symbol = value.to_string();
                let codec = &codecs[discrete_dim];
                let code = codec.encode(&symbol).ok_or_else(|| {
                    MiniBayesError::UnseenCategory {
                        feature: codec.name().to_string(),
                        value: symbol,
                    }
                })?;
                encoded.push(Encoded::Cat(code));
                discrete_dim += 1;
            }
        }
        Ok(encoded)
    }


    fn score(&self, row: &[Encoded], class: usize) -> f64 {
        let data = self.data.as_ref()
            .expect("`MergedNB::score` called before `feed_data`");
        let model = self.model.as_ref()
            .expect("`MergedNB::score` called before `fit_tables`");

        // Split the row with the mask established at `feed_data` time.
        let mut discrete = Vec::with_capacity(row.len());
        let mut continuous = Vec::with_capacity(row.len());
        for (d, cell) in row.iter().enumerate() {
            if data.mask.contains(d) {
                continuous.push(*cell);
            } else {
                discrete.push(*cell);
            }
        }

        self.multinomial.score(&discrete, class)
            * self.gaussian.score(&continuous, class)
            / model.prior[class]
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
