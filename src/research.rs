//! Model-assessment utilities kept outside the estimation path.

/// Defines the train/test fold generator.
pub mod cross_validation;

pub use cross_validation::CrossValidation;
