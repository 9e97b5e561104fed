//! Exports the standard estimators and traits.
//!
pub use crate::nbayes::{
    // NaiveBayes trait
    NaiveBayes,


    // Estimators --------------------------------
    MultinomialNB,
    GaussianNB,
    MergedNB,


    // Fitted tables -----------------------------
    CategoryTable,
    Gaussian,

    Accuracy,
    DEFAULT_SMOOTHING,
};


pub use crate::sample::{
    Sample,
    SampleReader,
    Value,
};


pub use crate::quantize::{
    Quantizer,
    FeatureCodec,
    LabelCodec,
};


pub use crate::research::CrossValidation;

pub use crate::error::MiniBayesError;
