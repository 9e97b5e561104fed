//! Defines the Naive Bayes estimator over discrete features.

use rayon::prelude::*;

use crate::Sample;
use crate::sample::Value;
use crate::quantize::{
    Quantizer,
    DiscreteBlock,
    ClassPartition,
    FeatureCodec,
    LabelCodec,
};
use crate::error::{MiniBayesError, Result};
use crate::common::utils;

use super::core::{NaiveBayes, Encoded, prior_probability, DEFAULT_SMOOTHING};
use super::probability::CategoryTable;


/// Quantized training data and the weighted occurrence counts
/// aggregated from it.
#[derive(Debug, Clone)]
struct MultinomialData {
    block: DiscreteBlock,
    classes: ClassPartition,
    /// Weighted occurrence counts, indexed by
    /// `(dimension, class, category value)`.
    counts: Vec<Vec<Vec<f64>>>,
}


/// The tables built by `fit_tables`.
#[derive(Debug, Clone)]
struct MultinomialModel {
    table: CategoryTable,
    prior: Vec<f64>,
}


/// Naive Bayes over categorical features.
/// Every column is treated as discrete, whatever its type;
/// conditional probabilities are Laplace-smoothed relative frequencies.
///
/// Scores are plain products of per-dimension probabilities.
/// No log-space accumulation is performed,
/// so scores may underflow to zero on high-dimensional inputs.
///
/// # Example
/// ```
/// use minibayes::prelude::*;
/// use minibayes::sample::Value;
///
/// let rows = vec![
///     vec![Value::from("sunny")],
///     vec![Value::from("sunny")],
///     vec![Value::from("rainy")],
/// ];
/// let sample = Sample::from_rows(rows, vec!["out", "out", "home"])
///     .unwrap();
///
/// let mut model = MultinomialNB::new();
/// model.fit(&sample, None).unwrap();
/// let label = model.predict_row(&[Value::from("sunny")]).unwrap();
/// assert_eq!(label, "out");
/// ```
#[derive(Debug, Clone)]
pub struct MultinomialNB {
    smoothing: f64,
    data: Option<MultinomialData>,
    model: Option<MultinomialModel>,
}


impl MultinomialNB {
    /// Construct an unfitted estimator with Laplace smoothing.
    pub fn new() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            data: None,
            model: None,
        }
    }


    /// Set the smoothing constant used by `fit`.
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        assert!(smoothing >= 0f64, "the smoothing constant is negative");
        self.smoothing = smoothing;
        self
    }


    /// The smoothed posterior table of the fitted model.
    pub fn posterior_table(&self) -> Result<&CategoryTable> {
        self.model.as_ref()
            .map(|model| &model.table)
            .ok_or(MiniBayesError::NotFitted)
    }


    /// The feature dictionaries frozen at training,
    /// one per discrete dimension.
    pub fn feature_codecs(&self) -> Result<&[FeatureCodec]> {
        self.data.as_ref()
            .map(|data| data.block.codecs())
            .ok_or(MiniBayesError::NotFitted)
    }


    /// Ingest an already-quantized discrete block.
    /// Shared by `feed_data` and the merged estimator.
    pub(crate) fn feed_parts(
        &mut self,
        block: DiscreteBlock,
        classes: ClassPartition,
        weight: Option<&[f64]>,
    ) -> Result<()>
    {
        let counts = weighted_histograms(&block, &classes, weight)?;
        self.data = Some(MultinomialData { block, classes, counts });
        self.model = None;
        Ok(())
    }


    fn data(&self) -> Result<&MultinomialData> {
        self.data.as_ref().ok_or(MiniBayesError::NotFitted)
    }
}


impl Default for MultinomialNB {
    fn default() -> Self {
        Self::new()
    }
}


impl NaiveBayes for MultinomialNB {
    fn feed_data(&mut self, sample: &Sample, weight: Option<&[f64]>)
        -> Result<()>
    {
        let n_columns = sample.shape().1;
        let quantized = Quantizer::all_discrete(n_columns)
            .quantize(sample)?;
        self.feed_parts(quantized.discrete, quantized.classes, weight)
    }


    fn feed_sample_weight(&mut self, weight: Option<&[f64]>) -> Result<()> {
        let data = self.data.as_mut().ok_or(MiniBayesError::NotFitted)?;
        let counts
            = weighted_histograms(&data.block, &data.classes, weight)?;

        data.counts = counts;
        Ok(())
    }


    fn fit_tables(&mut self, smoothing: f64) -> Result<()> {
        let data = self.data()?;

        let table = CategoryTable::smoothed(
            &data.counts,
            data.classes.counts(),
            data.block.cardinalities(),
            smoothing,
        );
        let prior = prior_probability(
            data.classes.counts(),
            data.classes.n_sample(),
            smoothing,
        );

        self.model = Some(MultinomialModel { table, prior });
        Ok(())
    }


    fn encode_row(&self, row: &[Value]) -> Result<Vec<Encoded>> {
        let data = self.data()?;
        let codecs = data.block.codecs();

        if row.len() != codecs.len() {
            return Err(MiniBayesError::FeatureCountMismatch {
                expected: codecs.len(),
                got: row.len(),
            });
        }

        row.iter()
            .zip(codecs)
            .map(|(value, codec)| {
                let symbol = value.to_string();
                codec.encode(&symbol)
                    .map(Encoded::Cat)
                    .ok_or_else(|| MiniBayesError::UnseenCategory {
                        feature: codec.name().to_string(),
                        value: symbol,
                    })
            })
            .collect()
    }


    fn score(&self, row: &[Encoded], class: usize) -> f64 {
        let model = self.model.as_ref()
            .expect("`MultinomialNB::score` called before `fit_tables`");

        let likelihood = row.iter()
            .enumerate()
            .map(|(dim, cell)| {
                model.table.likelihood(dim, class, cell.as_code())
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


/// One weighted histogram per `(dimension, class)` pair over the valid
/// code range of the dimension.
/// The unweighted case reduces to plain counts.
fn weighted_histograms(
    block: &DiscreteBlock,
    classes: &ClassPartition,
    weight: Option<&[f64]>,
) -> Result<Vec<Vec<Vec<f64>>>>
{
    let scaled = weight
        .map(|w| utils::class_mean_scaled(classes, w))
        .transpose()?;

    let counts = block.codes.par_iter()
        .zip(block.cardinalities())
        .map(|(column, &cardinality)| {
            classes.rows()
                .iter()
                .map(|rows| {
                    let mut histogram = vec![0f64; cardinality];
                    match &scaled {
                        None => {
                            rows.iter()
                                .for_each(|&i| histogram[column[i]] += 1f64);
                        },
                        Some(w) => {
                            rows.iter()
                                .for_each(|&i| histogram[column[i]] += w[i]);
                        },
                    }
                    histogram
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    Ok(counts)
}
