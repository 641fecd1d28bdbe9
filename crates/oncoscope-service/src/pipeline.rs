//! End-to-end training pipeline.

use tracing::{info, instrument};

use oncoscope_data::{
    stratified_split, CancerType, FeatureEncoder, PatientRecord, SynthConfig,
};
use oncoscope_rf::{ConfusionMatrix, RandomForestConfig};

use crate::error::ServiceError;
use crate::snapshot::ModelSnapshot;

/// Configuration for one training run.
///
/// # Defaults
///
/// | Parameter       | Default      |
/// |-----------------|--------------|
/// | `n_samples`     | 1000         |
/// | `n_trees`       | 100          |
/// | `max_depth`     | `Some(10)`   |
/// | `test_fraction` | 0.2          |
/// | `seed`          | 42           |
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    n_samples: usize,
    n_trees: usize,
    max_depth: Option<usize>,
    test_fraction: f64,
    seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingConfig {
    /// Create a config with the default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            n_samples: 1000,
            n_trees: 100,
            max_depth: Some(10),
            test_fraction: 0.2,
            seed: 42,
        }
    }

    /// Set the number of synthetic patients to generate.
    #[must_use]
    pub fn with_n_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = n_samples;
        self
    }

    /// Set the number of trees in the forest.
    #[must_use]
    pub fn with_n_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    /// Set the maximum tree depth. `None` means unlimited.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the holdout fraction.
    #[must_use]
    pub fn with_test_fraction(mut self, test_fraction: f64) -> Self {
        self.test_fraction = test_fraction;
        self
    }

    /// Set the seed driving generation, splitting, and forest training.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Return the configured seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run the full pipeline: generate, split, encode, train, evaluate.
    ///
    /// The encoder is fitted on the training partition only; holdout rows
    /// are encoded with that fitted state, never refitted.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ServiceError::Data`] | `n_samples` is 0, or the test fraction is invalid |
    /// | [`ServiceError::Forest`] | forest hyperparameters are invalid |
    #[instrument(skip_all, fields(n_samples = self.n_samples, n_trees = self.n_trees, seed = self.seed))]
    pub fn train(&self) -> Result<TrainedModel, ServiceError> {
        let table = SynthConfig::new(self.n_samples)?
            .with_seed(self.seed)
            .generate();
        let labels = table.label_indices();

        let split = stratified_split(&table, self.test_fraction, self.seed)?;
        let train_records: Vec<PatientRecord> = split
            .train_indices
            .iter()
            .map(|&i| table.records()[i].clone())
            .collect();
        let train_labels: Vec<usize> = split.train_indices.iter().map(|&i| labels[i]).collect();
        let test_records: Vec<PatientRecord> = split
            .test_indices
            .iter()
            .map(|&i| table.records()[i].clone())
            .collect();
        let test_labels: Vec<usize> = split.test_indices.iter().map(|&i| labels[i]).collect();

        let encoder = FeatureEncoder::fit(&train_records)?;
        let train_features = encoder.encode_batch(&train_records)?;
        let test_features = encoder.encode_batch(&test_records)?;

        let forest = RandomForestConfig::new(self.n_trees)?
            .with_max_depth(self.max_depth)
            .with_seed(self.seed)
            .fit(&train_features, &train_labels, encoder.feature_names())?;

        let predictions = forest.predict_batch(&test_features)?;
        let class_names: Vec<String> = CancerType::ALL
            .iter()
            .map(|c| c.as_str().to_string())
            .collect();
        let confusion = ConfusionMatrix::from_labels(&test_labels, &predictions, &class_names)?;

        let evaluation = ModelEvaluation {
            holdout_accuracy: confusion.accuracy(),
            confusion_matrix: confusion,
            n_train: split.n_train(),
            n_test: split.n_test(),
        };
        info!(
            accuracy = evaluation.holdout_accuracy,
            n_train = evaluation.n_train,
            n_test = evaluation.n_test,
            "pipeline finished"
        );

        Ok(TrainedModel {
            snapshot: ModelSnapshot::new(encoder, forest),
            evaluation,
        })
    }
}

/// Holdout evaluation of one training run.
#[derive(Debug, Clone)]
pub struct ModelEvaluation {
    /// Accuracy on the holdout partition.
    pub holdout_accuracy: f64,
    /// Confusion matrix over the holdout partition.
    pub confusion_matrix: ConfusionMatrix,
    /// Number of training rows.
    pub n_train: usize,
    /// Number of holdout rows.
    pub n_test: usize,
}

/// The output of one training run.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    snapshot: ModelSnapshot,
    evaluation: ModelEvaluation,
}

impl TrainedModel {
    /// Return the fitted snapshot.
    #[must_use]
    pub fn snapshot(&self) -> &ModelSnapshot {
        &self.snapshot
    }

    /// Consume the model, keeping only the snapshot.
    #[must_use]
    pub fn into_snapshot(self) -> ModelSnapshot {
        self.snapshot
    }

    /// Return the holdout evaluation.
    #[must_use]
    pub fn evaluation(&self) -> &ModelEvaluation {
        &self.evaluation
    }
}
