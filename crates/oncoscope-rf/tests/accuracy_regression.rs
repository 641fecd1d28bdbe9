//! Accuracy regression tests for oncoscope-rf.
//!
//! These tests verify that algorithmic changes do not degrade Random Forest
//! classification accuracy on a deterministic synthetic dataset.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use oncoscope_rf::{ConfusionMatrix, MaxFeatures, RandomForestConfig, SplitCriterion};

// ---------------------------------------------------------------------------
// Helper: deterministic synthetic classification dataset
// ---------------------------------------------------------------------------

/// Generate a 300-sample, 10-feature, 3-class classification dataset.
///
/// Features 0-2 are informative (class * 3.0 + noise in [0, 0.5]).
/// Features 3-9 are pure noise in [0, 0.5].
/// Samples are assigned round-robin across classes.
fn make_classification() -> (Vec<Vec<f64>>, Vec<usize>, Vec<String>) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let n_samples = 300;
    let n_features = 10;
    let n_classes = 3;

    let mut features = Vec::with_capacity(n_samples);
    let mut labels = Vec::with_capacity(n_samples);
    for i in 0..n_samples {
        let class = i % n_classes;
        labels.push(class);
        let row: Vec<f64> = (0..n_features)
            .map(|f| {
                let base = if f < 3 { class as f64 * 3.0 } else { 0.0 };
                base + rng.gen::<f64>() * 0.5
            })
            .collect();
        features.push(row);
    }
    let names: Vec<String> = (0..n_features).map(|f| format!("f{f}")).collect();
    (features, labels, names)
}

/// Split indices into train (first 240) and test (last 60), preserving the
/// round-robin class balance.
fn holdout(
    features: &[Vec<f64>],
    labels: &[usize],
) -> (Vec<Vec<f64>>, Vec<usize>, Vec<Vec<f64>>, Vec<usize>) {
    let cut = 240;
    (
        features[..cut].to_vec(),
        labels[..cut].to_vec(),
        features[cut..].to_vec(),
        labels[cut..].to_vec(),
    )
}

// ---------------------------------------------------------------------------
// a) holdout_accuracy_above_threshold
// ---------------------------------------------------------------------------

/// Holdout accuracy with 100 trees must exceed 0.85 on the synthetic dataset.
///
/// Reference: observed holdout accuracy = 1.0 with seed=42, 100 trees.
#[test]
fn holdout_accuracy_above_threshold() {
    let (features, labels, names) = make_classification();
    let (train_x, train_y, test_x, test_y) = holdout(&features, &labels);

    let forest = RandomForestConfig::new(100)
        .unwrap()
        .with_seed(42)
        .fit(&train_x, &train_y, &names)
        .unwrap();

    let predictions = forest.predict_batch(&test_x).unwrap();
    let class_names: Vec<String> = (0..3).map(|c| format!("class_{c}")).collect();
    let cm = ConfusionMatrix::from_labels(&test_y, &predictions, &class_names).unwrap();

    assert!(
        cm.accuracy() > 0.85,
        "holdout accuracy {} <= 0.85",
        cm.accuracy()
    );
}

// ---------------------------------------------------------------------------
// b) entropy_criterion_matches_gini_quality
// ---------------------------------------------------------------------------

/// Entropy splits must also clear the holdout accuracy bar.
#[test]
fn entropy_criterion_matches_gini_quality() {
    let (features, labels, names) = make_classification();
    let (train_x, train_y, test_x, test_y) = holdout(&features, &labels);

    let forest = RandomForestConfig::new(100)
        .unwrap()
        .with_seed(42)
        .with_criterion(SplitCriterion::Entropy)
        .fit(&train_x, &train_y, &names)
        .unwrap();

    let predictions = forest.predict_batch(&test_x).unwrap();
    let correct = predictions.iter().zip(&test_y).filter(|&(p, l)| p == l).count();
    let accuracy = correct as f64 / test_y.len() as f64;

    assert!(accuracy > 0.85, "entropy holdout accuracy {accuracy} <= 0.85");
}

// ---------------------------------------------------------------------------
// c) deterministic_predictions
// ---------------------------------------------------------------------------

/// Same config and seed must produce identical predictions across two
/// independent runs.
#[test]
fn deterministic_predictions() {
    let (features, labels, names) = make_classification();
    let cfg = RandomForestConfig::new(100).unwrap().with_seed(42);

    let forest1 = cfg.fit(&features, &labels, &names).unwrap();
    let forest2 = cfg.fit(&features, &labels, &names).unwrap();

    let preds1 = forest1.predict_batch(&features).unwrap();
    let preds2 = forest2.predict_batch(&features).unwrap();

    assert_eq!(
        preds1, preds2,
        "predictions differ across runs with the same seed"
    );
}

// ---------------------------------------------------------------------------
// d) prediction_accuracy_on_training_data
// ---------------------------------------------------------------------------

/// Training accuracy with 100 trees must exceed 0.95 (RF should memorize
/// training data).
///
/// Reference: observed training accuracy = 1.0 with seed=42, 100 trees.
#[test]
fn prediction_accuracy_on_training_data() {
    let (features, labels, names) = make_classification();
    let forest = RandomForestConfig::new(100)
        .unwrap()
        .with_seed(42)
        .fit(&features, &labels, &names)
        .unwrap();

    let predictions = forest.predict_batch(&features).unwrap();
    let correct = predictions
        .iter()
        .zip(&labels)
        .filter(|&(&p, &l)| p == l)
        .count();
    let accuracy = correct as f64 / labels.len() as f64;

    assert!(accuracy > 0.95, "training accuracy {accuracy} <= 0.95");
}

// ---------------------------------------------------------------------------
// e) shallow_depth_still_learns_informative_features
// ---------------------------------------------------------------------------

/// A depth-limited forest using all features must still beat chance by a
/// wide margin. The informative features dominate the first splits.
#[test]
fn shallow_depth_still_learns_informative_features() {
    let (features, labels, names) = make_classification();
    let (train_x, train_y, test_x, test_y) = holdout(&features, &labels);

    let forest = RandomForestConfig::new(50)
        .unwrap()
        .with_seed(42)
        .with_max_depth(Some(3))
        .with_max_features(MaxFeatures::All)
        .fit(&train_x, &train_y, &names)
        .unwrap();

    let predictions = forest.predict_batch(&test_x).unwrap();
    let correct = predictions.iter().zip(&test_y).filter(|&(p, l)| p == l).count();
    let accuracy = correct as f64 / test_y.len() as f64;

    // Chance level is 1/3.
    assert!(accuracy > 0.8, "shallow-forest accuracy {accuracy} <= 0.8");
}
