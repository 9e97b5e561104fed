use minibayes::prelude::*;
use minibayes::sample::Value;


fn alternating_sample() -> Sample {
    let rows = (0..10)
        .map(|i| {
            let symbol = if i % 2 == 0 { "even" } else { "odd" };
            vec![Value::from(symbol)]
        })
        .collect::<Vec<_>>();
    let target = (0..10)
        .map(|i| if i % 2 == 0 { "e" } else { "o" })
        .collect::<Vec<_>>();
    Sample::from_rows(rows, target).unwrap()
}


#[test]
fn folds_have_the_requested_shapes() {
    let sample = alternating_sample();
    let folds = CrossValidation::new(&sample)
        .n_folds(5)
        .collect::<Vec<_>>();

    assert_eq!(folds.len(), 5);
    for (train, test) in &folds {
        assert_eq!(train.shape(), (8, 1));
        assert_eq!(test.shape(), (2, 1));
    }
}


#[test]
fn unshuffled_folds_walk_the_sample_in_order() {
    let sample = alternating_sample();
    let mut cv = CrossValidation::new(&sample).n_folds(5);

    let (_, test) = cv.next().unwrap();
    assert_eq!(test.target(), &["e", "o"]);
}


#[test]
fn shuffling_is_reproducible_per_seed() {
    let sample = alternating_sample();

    let first = CrossValidation::new(&sample)
        .seed(42)
        .shuffle()
        .map(|(_, test)| test.target().to_vec())
        .collect::<Vec<_>>();
    let second = CrossValidation::new(&sample)
        .seed(42)
        .shuffle()
        .map(|(_, test)| test.target().to_vec())
        .collect::<Vec<_>>();

    assert_eq!(first, second);
}


#[test]
fn each_fold_trains_a_model() {
    let sample = alternating_sample();

    for (train, test) in CrossValidation::new(&sample).n_folds(5) {
        let mut model = MultinomialNB::new();
        model.fit(&train, None).unwrap();

        let accuracy = model.evaluate(&test).unwrap();
        assert_eq!(accuracy.value(), 1f64);
    }
}
