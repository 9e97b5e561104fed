//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data

use crate::Sample;


/// Check whether the training sample is valid or not.
#[inline(always)]
pub(crate) fn check_sample(sample: &Sample)
{
    let (n_sample, n_feature) = sample.shape();


    // `data` and `target` must have the length greater than `0`.
    assert!(n_sample > 0, "the sample has no rows");


    // `data` must have a feature.
    assert!(n_feature > 0, "the sample has no features");
}


/// Check whether the target column is specified.
#[inline(always)]
pub(crate) fn check_target(sample: &Sample)
{
    let n_sample = sample.shape().0;
    let n_target = sample.target().len();

    if n_sample != n_target {
        panic!(
            "The target class is not specified.\n\
             Use `Sample::set_target(\"Column Name\")`."
        );
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Value;

    fn toy_sample() -> Sample {
        let rows = vec![
            vec![Value::from("a"), Value::from(1.0)],
            vec![Value::from("b"), Value::from(2.0)],
        ];
        let target = vec!["pos", "neg"];
        Sample::from_rows(rows, target).unwrap()
    }

    #[test]
    fn test_check_sample_success() {
        let sample = toy_sample();
        check_sample(&sample);
        check_target(&sample);
    }

    #[test]
    #[should_panic]
    fn test_check_target_failure() {
        let rows = vec![
            vec![Value::from("a")],
            vec![Value::from("b")],
        ];
        let sample = Sample::from_rows::<&str>(rows, Vec::new()).unwrap();
        check_target(&sample);
    }
}
