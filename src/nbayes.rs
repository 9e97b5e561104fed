//! The files in `nbayes/` directory define
//! the `NaiveBayes` trait and the estimators implementing it.

/// Provides NaiveBayes trait.
pub mod core;

/// Defines probability density/mass tables.
pub mod probability;

/// Defines the discrete-feature estimator.
pub mod multinomial;

/// Defines the continuous-feature estimator.
pub mod gaussian;

/// Defines the mixed-type estimator.
pub mod merged;


pub use self::core::{
    NaiveBayes,
    Encoded,
    Accuracy,
    prior_probability,
    DEFAULT_SMOOTHING,
};

pub use probability::{
    CategoryTable,
    Gaussian,
};

pub use multinomial::MultinomialNB;
pub use gaussian::GaussianNB;
pub use merged::MergedNB;
