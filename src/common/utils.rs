//! This file provides the sample-weight rescaling helpers
//! shared by the estimators.
//!
//! Sample weights are the hook that lets an ensemble method bias an
//! estimator toward misclassified rows without changing the estimator
//! itself. The two estimators normalize differently:
//! the discrete path divides each weight by the mean weight of its
//! class, so the weighted counts of a class still sum to the class
//! count; the continuous path scales every weight by the number of
//! rows, a global factor that cancels in the normalized moments.

use crate::quantize::ClassPartition;
use crate::error::{MiniBayesError, Result};


/// Check the weight vector against the class partition.
/// Weights must cover every row, be finite and nonnegative,
/// and no class may have all of its weight erased.
pub(crate) fn validate_weights(
    classes: &ClassPartition,
    weight: &[f64],
) -> Result<()>
{
    if weight.len() != classes.n_sample() {
        return Err(MiniBayesError::WeightLengthMismatch {
            expected: classes.n_sample(),
            got: weight.len(),
        });
    }

    for (row, &w) in weight.iter().enumerate() {
        if !w.is_finite() || w < 0f64 {
            return Err(MiniBayesError::InvalidSampleWeight {
                row,
                value: w,
            });
        }
    }

    for (class, rows) in classes.rows().iter().enumerate() {
        let total = rows.iter().map(|&i| weight[i]).sum::<f64>();
        if total <= 0f64 {
            return Err(MiniBayesError::DegenerateWeights { class });
        }
    }

    Ok(())
}


/// Rescale each weight by the mean weight of its class:
/// `w[i] / mean(w over the class of row i)`.
/// The rescaled weights of one class sum to the class count.
pub(crate) fn class_mean_scaled(
    classes: &ClassPartition,
    weight: &[f64],
) -> Result<Vec<f64>>
{
    validate_weights(classes, weight)?;

    let mut scaled = vec![0f64; weight.len()];
    for rows in classes.rows() {
        let total = rows.iter().map(|&i| weight[i]).sum::<f64>();
        let scale = rows.len() as f64 / total;
        for &i in rows {
            scaled[i] = weight[i] * scale;
        }
    }
    Ok(scaled)
}


/// Rescale every weight by the number of rows: `w[i] * N`.
pub(crate) fn globally_scaled(
    classes: &ClassPartition,
    weight: &[f64],
) -> Result<Vec<f64>>
{
    validate_weights(classes, weight)?;

    let n_sample = classes.n_sample() as f64;
    let scaled = weight.iter()
        .map(|&w| w * n_sample)
        .collect::<Vec<_>>();
    Ok(scaled)
}
