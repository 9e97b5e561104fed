#![warn(missing_docs)]

//!
//! A crate that provides a family of Naive Bayes classifiers
//! over heterogeneous (categorical and/or numeric) samples.
//!
//! This crate includes three estimators built on one shared workflow:
//!
//! - `MultinomialNB`
//!     Treats every feature as categorical.
//!     Conditional probabilities are Laplace-smoothed relative
//!     frequencies of the integer-coded symbols,
//!     so no combination unseen at training time can lock a class out.
//!
//! - `GaussianNB`
//!     Treats every feature as continuous.
//!     Each (dimension, class) pair gets a maximum-likelihood normal
//!     density.
//!
//! - `MergedNB`
//!     Splits each sample into discrete and continuous sub-vectors by
//!     a column mask and runs the two estimators above side by side on
//!     a shared label partition.
//!
//! All estimators accept nonnegative sample weights,
//! the hook that lets an ensemble method bias them toward
//! misclassified rows without changing the estimators themselves.

pub mod error;
pub mod sample;
pub mod quantize;
pub mod nbayes;
pub mod research;
pub mod viz;

pub mod prelude;

pub(crate) mod common;


pub use error::MiniBayesError;

pub use sample::{
    Sample,
    SampleReader,
    Feature,
    Value,
};

pub use quantize::{
    Quantizer,
    Quantized,
    FeatureCodec,
    LabelCodec,
};

pub use nbayes::{
    NaiveBayes,
    MultinomialNB,
    GaussianNB,
    MergedNB,
    Accuracy,
};

pub use research::CrossValidation;
