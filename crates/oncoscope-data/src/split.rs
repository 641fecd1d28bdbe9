//! Stratified train/test holdout split.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::domain::TrainingTable;
use crate::error::DataError;

/// Index sets produced by [`stratified_split`].
#[derive(Debug, Clone)]
pub struct HoldoutSplit {
    /// Row indices assigned to the training partition.
    pub train_indices: Vec<usize>,
    /// Row indices assigned to the test partition.
    pub test_indices: Vec<usize>,
}

impl HoldoutSplit {
    /// Return the number of training rows.
    #[must_use]
    pub fn n_train(&self) -> usize {
        self.train_indices.len()
    }

    /// Return the number of test rows.
    #[must_use]
    pub fn n_test(&self) -> usize {
        self.test_indices.len()
    }
}

/// Split a training table into train/test partitions, stratified by label.
///
/// Each class contributes `round(len * test_fraction)` rows to the test
/// partition, capped so at least one row per class stays in train; classes
/// with a single row stay entirely in train. Deterministic per seed.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`DataError::EmptySample`] | the table has zero rows |
/// | [`DataError::InvalidTestFraction`] | `test_fraction` outside (0.0, 1.0) |
pub fn stratified_split(
    table: &TrainingTable,
    test_fraction: f64,
    seed: u64,
) -> Result<HoldoutSplit, DataError> {
    if table.n_samples() == 0 {
        return Err(DataError::EmptySample);
    }
    if test_fraction <= 0.0 || test_fraction >= 1.0 {
        return Err(DataError::InvalidTestFraction {
            fraction: test_fraction,
        });
    }

    let labels = table.label_indices();
    let n_classes = labels.iter().max().copied().unwrap_or(0) + 1;
    let mut by_class: Vec<Vec<usize>> = vec![Vec::new(); n_classes];
    for (i, &label) in labels.iter().enumerate() {
        by_class[label].push(i);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut train_indices = Vec::new();
    let mut test_indices = Vec::new();

    for mut class_indices in by_class {
        if class_indices.is_empty() {
            continue;
        }
        class_indices.shuffle(&mut rng);
        let len = class_indices.len();
        let n_test = ((len as f64 * test_fraction).round() as usize).min(len - 1);
        let (test, train) = class_indices.split_at(n_test);
        test_indices.extend_from_slice(test);
        train_indices.extend_from_slice(train);
    }

    // Stable row order within each partition.
    train_indices.sort_unstable();
    test_indices.sort_unstable();

    debug!(
        n_train = train_indices.len(),
        n_test = test_indices.len(),
        "stratified split computed"
    );

    Ok(HoldoutSplit {
        train_indices,
        test_indices,
    })
}
