//! Provides `NaiveBayes` trait.

use rayon::prelude::*;

use std::fmt;

use crate::Sample;
use crate::sample::Value;
use crate::quantize::LabelCodec;
use crate::error::Result;
use crate::common::checker;


/// The default smoothing constant.
/// A constant of `1` corresponds to Laplace smoothing.
pub const DEFAULT_SMOOTHING: f64 = 1.0;


/// One cell of an encoded sample row:
/// the integer code of a categorical symbol,
/// or a continuous value left as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Encoded {
    /// The code of a categorical symbol.
    Cat(usize),
    /// A continuous value.
    Num(f64),
}


impl Encoded {
    /// The categorical code held by `self`.
    /// Estimators only ever see the cells their own codecs produced,
    /// so a numeric cell here is a routing bug.
    pub(crate) fn as_code(&self) -> usize {
        match self {
            Self::Cat(code) => *code,
            Self::Num(_) => panic!("expected a categorical code"),
        }
    }


    /// The continuous value held by `self`.
    pub(crate) fn as_value(&self) -> f64 {
        match self {
            Self::Num(x) => *x,
            Self::Cat(_) => panic!("expected a continuous value"),
        }
    }
}


/// Additive-smoothed class frequencies:
/// `(count[c] + smoothing) / (N + smoothing * K)` for each class `c`.
/// The result sums to `1` for any `smoothing >= 0`.
pub fn prior_probability(
    class_counts: &[f64],
    n_sample: usize,
    smoothing: f64,
) -> Vec<f64>
{
    let k = class_counts.len() as f64;
    let denominator = n_sample as f64 + smoothing * k;

    class_counts.iter()
        .map(|&count| (count + smoothing) / denominator)
        .collect()
}


/// Classification accuracy reported by [`NaiveBayes::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accuracy {
    correct: usize,
    total: usize,
}


impl Accuracy {
    /// The fraction of correctly classified rows in `[0, 1]`.
    pub fn value(&self) -> f64 {
        self.correct as f64 / self.total as f64
    }


    /// Number of correctly classified rows.
    pub fn correct(&self) -> usize {
        self.correct
    }


    /// Number of classified rows.
    pub fn total(&self) -> usize {
        self.total
    }
}


impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "accuracy is {:.2}%", 100f64 * self.value())
    }
}


/// The trait [`NaiveBayes`] defines the common workflow of the
/// Naive Bayes estimators in this crate:
/// quantize the raw sample,
/// aggregate weighted counts per feature dimension,
/// smooth them into conditional-probability tables,
/// and predict by maximizing the unnormalized posterior score.
///
/// The trait only sequences the estimator hooks;
/// each estimator decides how its tables are built and scored.
///
/// # Required Methods
/// - [`NaiveBayes::feed_data`]
/// - [`NaiveBayes::feed_sample_weight`]
/// - [`NaiveBayes::fit_tables`]
/// - [`NaiveBayes::encode_row`]
/// - [`NaiveBayes::score`]
/// - accessors for the smoothing constant, label dictionary,
///   class counts, and prior.
///
/// # Provided Methods
/// - [`NaiveBayes::fit`], [`NaiveBayes::refit`]
/// - [`NaiveBayes::predict_row`], [`NaiveBayes::predict`]
/// - [`NaiveBayes::raw_score_row`], [`NaiveBayes::raw_scores`]
/// - [`NaiveBayes::posteriors`], [`NaiveBayes::evaluate`]
pub trait NaiveBayes {
    /// Quantize `sample` and rebuild every class-partition structure,
    /// then aggregate the (weighted) counts.
    /// On failure the previous state is left untouched.
    fn feed_data(&mut self, sample: &Sample, weight: Option<&[f64]>)
        -> Result<()>;


    /// Rebuild the weighted count aggregates from new sample weights,
    /// keeping the quantized data.
    /// The probability tables are not rebuilt until the next
    /// [`NaiveBayes::fit_tables`] call.
    fn feed_sample_weight(&mut self, weight: Option<&[f64]>) -> Result<()>;


    /// Build the probability tables and the prior
    /// from the aggregated counts.
    fn fit_tables(&mut self, smoothing: f64) -> Result<()>;


    /// Encode one raw row through the dictionaries frozen at training.
    ///
    /// # Errors
    /// Fails with [`crate::MiniBayesError::UnseenCategory`] on a symbol
    /// the training data never contained; unseen symbols are never
    /// mapped to a default code.
    fn encode_row(&self, row: &[Value]) -> Result<Vec<Encoded>>;


    /// The unnormalized posterior score of `class` for an encoded row:
    /// the product of the per-dimension conditional likelihoods
    /// and the class prior.
    ///
    /// # Panics
    /// Panics when called before the tables are fitted.
    fn score(&self, row: &[Encoded], class: usize) -> f64;


    /// The smoothing constant used by [`NaiveBayes::fit`].
    fn smoothing(&self) -> f64;


    /// The label dictionary frozen at training.
    fn label_codec(&self) -> Result<&LabelCodec>;


    /// Number of training rows per class.
    fn class_counts(&self) -> Result<&[f64]>;


    /// Number of training rows.
    fn n_samples(&self) -> Result<usize>;


    /// The cached prior vector of the fitted model.
    fn prior(&self) -> Result<&[f64]>;


    /// Number of classes `K`.
    fn n_classes(&self) -> Result<usize> {
        Ok(self.label_codec()?.len())
    }


    /// The additive-smoothed class frequencies for an arbitrary
    /// smoothing constant.
    /// See [`prior_probability`].
    fn prior_probability(&self, smoothing: f64) -> Result<Vec<f64>> {
        let counts = self.class_counts()?;
        let n_sample = self.n_samples()?;
        Ok(prior_probability(counts, n_sample, smoothing))
    }


    /// Quantize `sample`, aggregate the (weighted) counts,
    /// and build the probability tables
    /// with the configured smoothing constant.
    /// All internal tables are rebuilt from scratch;
    /// nothing survives from a previous fit.
    fn fit(&mut self, sample: &Sample, weight: Option<&[f64]>)
        -> Result<()>
    {
        self.feed_data(sample, weight)?;
        self.fit_tables(self.smoothing())
    }


    /// Rebuild the probability tables with a new smoothing constant,
    /// keeping the quantized data of the last [`NaiveBayes::fit`].
    fn refit(&mut self, smoothing: f64) -> Result<()> {
        self.fit_tables(smoothing)
    }


    /// The unnormalized posterior score of every class for a raw row.
    fn posteriors(&self, row: &[Value]) -> Result<Vec<f64>> {
        // Fails before the tables are built,
        // so the `score` calls below cannot panic.
        self.prior()?;

        let row = self.encode_row(row)?;
        let k = self.n_classes()?;
        let scores = (0..k)
            .map(|class| self.score(&row, class))
            .collect::<Vec<_>>();
        Ok(scores)
    }


    /// Predict the decoded label of one raw row.
    /// When several classes reach the maximal score,
    /// the lowest-indexed one wins.
    fn predict_row(&self, row: &[Value]) -> Result<String> {
        let scores = self.posteriors(row)?;

        let mut best_class = 0;
        let mut best_score = 0f64;
        for (class, &score) in scores.iter().enumerate() {
            if score > best_score {
                best_class = class;
                best_score = score;
            }
        }

        Ok(self.label_codec()?.decode(best_class).to_string())
    }


    /// The maximal unnormalized posterior score of one raw row.
    fn raw_score_row(&self, row: &[Value]) -> Result<f64> {
        let scores = self.posteriors(row)?;
        Ok(scores.into_iter().fold(0f64, f64::max))
    }


    /// Predict the decoded label of every row of `sample`.
    fn predict(&self, sample: &Sample) -> Result<Vec<String>>
        where Self: Sync,
    {
        let n_sample = sample.shape().0;
        (0..n_sample).into_par_iter()
            .map(|row| self.predict_row(&sample.row(row)))
            .collect()
    }


    /// The maximal unnormalized posterior score of every row of `sample`.
    fn raw_scores(&self, sample: &Sample) -> Result<Vec<f64>>
        where Self: Sync,
    {
        let n_sample = sample.shape().0;
        (0..n_sample).into_par_iter()
            .map(|row| self.raw_score_row(&sample.row(row)))
            .collect()
    }


    /// Classification accuracy over a labeled sample.
    ///
    /// # Panics
    /// Panics when the target column of `sample` is not set.
    fn evaluate(&self, sample: &Sample) -> Result<Accuracy>
        where Self: Sync,
    {
        checker::check_target(sample);

        let predictions = self.predict(sample)?;
        let correct = predictions.iter()
            .zip(sample.target())
            .filter(|(prediction, label)| prediction == label)
            .count();

        Ok(Accuracy { correct, total: predictions.len() })
    }
}
