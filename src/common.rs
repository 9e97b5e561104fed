//! Defines some common functions used in this library.

/// Defines some checker functions.
pub(crate) mod checker;

/// Defines the sample-weight rescaling helpers.
pub(crate) mod utils;
