use minibayes::prelude::*;
use minibayes::MiniBayesError;
use minibayes::nbayes::Encoded;
use minibayes::sample::Value;


// One categorical and one continuous feature, two classes.
fn mixed_sample() -> Sample {
    let rows = vec![
        vec![Value::from("a"), Value::from(1.0)],
        vec![Value::from("a"), Value::from(1.2)],
        vec![Value::from("b"), Value::from(3.0)],
        vec![Value::from("b"), Value::from(3.2)],
        vec![Value::from("a"), Value::from(2.8)],
    ];
    let target = vec!["yes", "yes", "no", "no", "no"];
    Sample::from_rows(rows, target).unwrap()
}


fn fitted_model() -> MergedNB {
    let mut model = MergedNB::new().whether_continuous(&[false, true]);
    model.fit(&mixed_sample(), None).unwrap();
    model
}


#[test]
fn rows_are_split_by_the_mask() {
    let model = fitted_model();

    let row = [Value::from("a"), Value::from(2.5)];
    let encoded = model.encode_row(&row).unwrap();
    assert_eq!(encoded, vec![Encoded::Cat(0), Encoded::Num(2.5)]);
}


#[test]
fn combined_score_divides_the_shared_prior_once() {
    let model = fitted_model();

    let row = [Value::from("a"), Value::from(2.5)];
    let combined = model.posteriors(&row).unwrap();

    // Each sub-estimator's score already multiplies in the prior.
    let discrete = model.multinomial()
        .posteriors(&[Value::from("a")])
        .unwrap();
    let continuous = model.gaussian()
        .posteriors(&[Value::from(2.5)])
        .unwrap();
    let prior = model.prior().unwrap();

    for class in 0..model.n_classes().unwrap() {
        let expected = discrete[class] * continuous[class] / prior[class];
        assert!((combined[class] - expected).abs() < 1e-12);
    }
}


#[test]
fn sub_estimators_share_one_partition() {
    let model = fitted_model();

    assert_eq!(
        model.prior().unwrap(),
        model.multinomial().prior().unwrap(),
    );
    assert_eq!(
        model.class_counts().unwrap(),
        model.gaussian().class_counts().unwrap(),
    );
    assert_eq!(
        model.label_codec().unwrap(),
        model.gaussian().label_codec().unwrap(),
    );
}


#[test]
fn predicts_both_clusters() {
    let model = fitted_model();

    let row = [Value::from("a"), Value::from(1.1)];
    assert_eq!(model.predict_row(&row).unwrap(), "yes");

    let row = [Value::from("b"), Value::from(3.1)];
    assert_eq!(model.predict_row(&row).unwrap(), "no");
}


#[test]
fn the_mask_is_inferred_from_column_types() {
    let sample = mixed_sample();

    let mut inferred = MergedNB::new();
    inferred.fit(&sample, None).unwrap();

    let explicit = fitted_model();

    let row = [Value::from("a"), Value::from(2.5)];
    assert_eq!(
        inferred.posteriors(&row).unwrap(),
        explicit.posteriors(&row).unwrap(),
    );
}


#[test]
fn unseen_symbol_is_a_lookup_error() {
    let model = fitted_model();

    let row = [Value::from("z"), Value::from(2.5)];
    let err = model.predict_row(&row).unwrap_err();
    assert!(matches!(err, MiniBayesError::UnseenCategory { .. }));
}


#[test]
fn non_numeric_value_in_a_continuous_column() {
    let model = fitted_model();

    let row = [Value::from("a"), Value::from("not-a-number")];
    let err = model.predict_row(&row).unwrap_err();
    assert!(matches!(err, MiniBayesError::NonNumericValue { .. }));
}


#[test]
fn uniform_weights_match_unweighted() {
    let sample = mixed_sample();

    let mut plain = MergedNB::new().whether_continuous(&[false, true]);
    plain.fit(&sample, None).unwrap();

    let weight = vec![1f64; 5];
    let mut weighted = MergedNB::new().whether_continuous(&[false, true]);
    weighted.fit(&sample, Some(&weight)).unwrap();

    let row = [Value::from("b"), Value::from(2.9)];
    let lhs = plain.posteriors(&row).unwrap();
    let rhs = weighted.posteriors(&row).unwrap();
    for (l, r) in lhs.iter().zip(&rhs) {
        assert!((l - r).abs() < 1e-12);
    }
}


#[test]
fn evaluate_on_the_training_sample() {
    let model = fitted_model();
    let accuracy = model.evaluate(&mixed_sample()).unwrap();
    println!("{accuracy}");
    assert!(accuracy.value() >= 0.8);
}
