use minibayes::prelude::*;
use minibayes::sample::Value;

use rand::prelude::*;
use rand_distr::Normal;


// Toy example  (o/x are the pos/neg examples)
//
// 15|
//   |                   x
//   |                               x
// 10|       x
//   |                                   o
//   |
//  5|                        o
//   |                                       o
//   |            x
//   |__________________________________________
//  0            5           10            15
//
fn toy_sample() -> Sample {
    let rows = vec![
        vec![Value::from(10f64), Value::from(5f64)],
        vec![Value::from(14f64), Value::from(8f64)],
        vec![Value::from(15f64), Value::from(3f64)],
        vec![Value::from(5f64), Value::from(1f64)],
        vec![Value::from(3f64), Value::from(9f64)],
        vec![Value::from(8f64), Value::from(13f64)],
        vec![Value::from(12f64), Value::from(11f64)],
    ];
    let target = vec!["pos", "pos", "pos", "neg", "neg", "neg", "neg"];
    Sample::from_rows(rows, target).unwrap()
}


#[test]
fn maximum_likelihood_moments() {
    let sample = toy_sample();
    let mut model = GaussianNB::new();
    model.fit(&sample, None).unwrap();

    let labels = model.label_codec().unwrap();
    let pos = labels.encode("pos").unwrap();
    let neg = labels.encode("neg").unwrap();

    let densities = model.densities().unwrap();
    assert!((densities[0][pos].mean() - 13f64).abs() < 1e-12);
    assert!((densities[0][neg].mean() - 7f64).abs() < 1e-12);
    assert!((densities[0][pos].var() - 14f64 / 3f64).abs() < 1e-12);
    assert!((densities[0][neg].var() - 11.5).abs() < 1e-12);

    // The prior of this estimator is unsmoothed.
    let prior = model.prior().unwrap();
    assert!((prior[pos] - 3f64 / 7f64).abs() < 1e-12);
    assert!((prior[neg] - 4f64 / 7f64).abs() < 1e-12);
}


#[test]
fn predicts_the_toy_clusters() {
    let sample = toy_sample();
    let mut model = GaussianNB::new();
    model.fit(&sample, None).unwrap();

    let row = [Value::from(14f64), Value::from(4f64)];
    assert_eq!(model.predict_row(&row).unwrap(), "pos");

    let row = [Value::from(4f64), Value::from(10f64)];
    assert_eq!(model.predict_row(&row).unwrap(), "neg");
}


#[test]
fn zero_variance_collapses_to_an_indicator() {
    let rows = vec![
        vec![Value::from(1f64)],
        vec![Value::from(1f64)],
        vec![Value::from(5f64)],
    ];
    let sample = Sample::from_rows(rows, vec!["c", "c", "d"]).unwrap();
    let mut model = GaussianNB::new();
    model.fit(&sample, None).unwrap();

    let labels = model.label_codec().unwrap();
    let c = labels.encode("c").unwrap();

    let gaussian = &model.densities().unwrap()[0][c];
    assert_eq!(gaussian.var(), 0f64);
    assert_eq!(gaussian.density(1f64), 1f64);
    assert_eq!(gaussian.density(1.0001), 0f64);

    // Scoring stays total: each point falls back to its own class.
    assert_eq!(model.predict_row(&[Value::from(1f64)]).unwrap(), "c");
    assert_eq!(model.predict_row(&[Value::from(5f64)]).unwrap(), "d");
}


#[test]
fn uniform_weights_match_unweighted() {
    let sample = toy_sample();

    let mut plain = GaussianNB::new();
    plain.fit(&sample, None).unwrap();

    let weight = vec![1f64; 7];
    let mut weighted = GaussianNB::new();
    weighted.fit(&sample, Some(&weight)).unwrap();

    let lhs = plain.densities().unwrap();
    let rhs = weighted.densities().unwrap();
    for (per_class_l, per_class_r) in lhs.iter().zip(rhs) {
        for (l, r) in per_class_l.iter().zip(per_class_r) {
            assert!((l.mean() - r.mean()).abs() < 1e-12);
            assert!((l.var() - r.var()).abs() < 1e-12);
        }
    }
}


#[test]
fn weights_shift_the_class_moments() {
    let rows = vec![
        vec![Value::from(0f64)],
        vec![Value::from(10f64)],
    ];
    let sample = Sample::from_rows(rows, vec!["c", "c"]).unwrap();

    let mut model = GaussianNB::new();
    model.fit(&sample, Some(&[0.9, 0.1])).unwrap();

    // Weighted mean: (0.9 * 0 + 0.1 * 10) / (0.9 + 0.1).
    let gaussian = &model.densities().unwrap()[0][0];
    assert!((gaussian.mean() - 1f64).abs() < 1e-12);
}


#[test]
fn separated_clusters_are_classified() {
    let mut rng = StdRng::seed_from_u64(777);
    let lo = Normal::new(0f64, 1f64).unwrap();
    let hi = Normal::new(8f64, 1f64).unwrap();

    let mut rows = Vec::new();
    let mut target = Vec::new();
    for _ in 0..50 {
        rows.push(vec![Value::from(lo.sample(&mut rng))]);
        target.push("lo");
    }
    for _ in 0..50 {
        rows.push(vec![Value::from(hi.sample(&mut rng))]);
        target.push("hi");
    }
    let sample = Sample::from_rows(rows, target).unwrap();

    let mut model = GaussianNB::new();
    model.fit(&sample, None).unwrap();

    let accuracy = model.evaluate(&sample).unwrap();
    println!("{accuracy}");
    assert!(accuracy.value() > 0.95);
}


#[test]
fn symbols_that_parse_are_continuous() {
    // Text columns whose cells all look numeric are cast, as the
    // quantizer would do for any continuous dimension.
    let rows = vec![
        vec![Value::from("1.5")],
        vec![Value::from("2.5")],
        vec![Value::from("7.5")],
        vec![Value::from("8.5")],
    ];
    let sample = Sample::from_rows(rows, vec!["a", "a", "b", "b"]).unwrap();

    let mut model = GaussianNB::new();
    model.fit(&sample, None).unwrap();

    assert_eq!(model.predict_row(&[Value::from(2f64)]).unwrap(), "a");
    assert_eq!(model.predict_row(&[Value::from("8")]).unwrap(), "b");
}
