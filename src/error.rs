//! Recoverable, caller-reported failures for the estimation path.
//!
//! Programmer misuse (empty samples, unset targets) panics through
//! [`crate::common`]; the data-dependent failures a caller can recover
//! from are returned as [`MiniBayesError`] through [`Result`].

use thiserror::Error;

/// A crate-wide [`std::result::Result`] specialized to [`MiniBayesError`].
pub type Result<T> = std::result::Result<T, MiniBayesError>;

/// Recoverable failures surfaced while quantizing, fitting, or predicting.
#[derive(Debug, Error)]
pub enum MiniBayesError {
    /// The number of target labels does not match the number of data rows.
    #[error("row count mismatch: {data} data rows but {target} target labels")]
    RowCountMismatch {
        /// Number of data rows.
        data: usize,
        /// Number of target labels.
        target: usize,
    },

    /// A row (or mask) has a different feature count than expected.
    #[error("feature count mismatch: expected {expected} but got {got}")]
    FeatureCountMismatch {
        /// Expected number of features.
        expected: usize,
        /// Number of features actually supplied.
        got: usize,
    },

    /// A column marked continuous held a value that is not a number.
    #[error("non-numeric value in feature `{feature}`: {value}")]
    NonNumericValue {
        /// Name of the offending feature.
        feature: String,
        /// The value that could not be read as a number.
        value: String,
    },

    /// A categorical symbol was never seen at training time.
    #[error("unseen category in feature `{feature}`: {value}")]
    UnseenCategory {
        /// Name of the feature.
        feature: String,
        /// The symbol that was not present in the training codec.
        value: String,
    },

    /// The sample-weight vector length does not match the sample size.
    #[error("sample-weight length mismatch: expected {expected} but got {got}")]
    WeightLengthMismatch {
        /// Expected number of weights (the sample size).
        expected: usize,
        /// Number of weights actually supplied.
        got: usize,
    },

    /// A sample weight was negative or non-finite.
    #[error("invalid sample weight at row {row}: {value}")]
    InvalidSampleWeight {
        /// Row whose weight was rejected.
        row: usize,
        /// The offending weight value.
        value: f64,
    },

    /// Every weight assigned to a class was zero, leaving it with no mass.
    #[error("degenerate weights: class {class} has zero total weight")]
    DegenerateWeights {
        /// The class left with no weight.
        class: usize,
    },

    /// An estimator method was called before the model was fitted.
    #[error("model has not been fitted")]
    NotFitted,
}
