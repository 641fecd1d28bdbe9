//! Forest training: bootstrap aggregation over parallel CART trees.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::config::RandomForestConfig;
use crate::error::RfError;
use crate::tree::{bootstrap_sample, DecisionTree, TreeParams};

/// A fitted Random Forest classifier.
///
/// Prediction averages the leaf class distributions of all trees. Class
/// labels are the zero-based indices seen at training time.
#[derive(Debug, Clone)]
pub struct RandomForest {
    pub(crate) trees: Vec<DecisionTree>,
    pub(crate) n_features: usize,
    pub(crate) n_classes: usize,
    pub(crate) feature_names: Vec<String>,
}

impl RandomForest {
    /// Return the number of feature columns the forest was trained on.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Return the number of classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Return the number of trees.
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Return the feature column names.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

/// Validate the dataset and hyperparameters, then train all trees.
#[instrument(skip_all, fields(n_trees = config.n_trees, n_samples = features.len()))]
pub(crate) fn train(
    config: &RandomForestConfig,
    features: &[Vec<f64>],
    labels: &[usize],
    feature_names: &[String],
) -> Result<RandomForest, RfError> {
    if features.is_empty() {
        return Err(RfError::EmptyDataset);
    }
    let n_samples = features.len();
    let n_features = features[0].len();
    if n_features == 0 {
        return Err(RfError::ZeroFeatures);
    }
    if labels.len() != n_samples {
        return Err(RfError::LabelCountMismatch {
            n_labels: labels.len(),
            n_samples,
        });
    }
    for (sample_index, row) in features.iter().enumerate() {
        if row.len() != n_features {
            return Err(RfError::FeatureCountMismatch {
                expected: n_features,
                got: row.len(),
                sample_index,
            });
        }
        for (feature_index, &value) in row.iter().enumerate() {
            if !value.is_finite() {
                return Err(RfError::NonFiniteValue {
                    sample_index,
                    feature_index,
                });
            }
        }
    }

    if let Some(max_depth) = config.max_depth {
        if max_depth == 0 {
            return Err(RfError::InvalidMaxDepth { max_depth });
        }
    }
    if config.min_samples_split < 2 {
        return Err(RfError::InvalidMinSamplesSplit {
            min_samples_split: config.min_samples_split,
        });
    }
    if config.min_samples_leaf < 1 {
        return Err(RfError::InvalidMinSamplesLeaf {
            min_samples_leaf: config.min_samples_leaf,
        });
    }
    let max_features = config.max_features.resolve(n_features)?;

    let n_classes = labels.iter().copied().max().unwrap_or(0) + 1;
    debug!(n_features, n_classes, max_features, "dataset validated");

    // One independent seed per tree, drawn up front so tree training order
    // does not affect the result.
    let mut master_rng = ChaCha8Rng::seed_from_u64(config.seed);
    let tree_seeds: Vec<u64> = (0..config.n_trees).map(|_| master_rng.gen()).collect();

    let trees: Vec<DecisionTree> = tree_seeds
        .into_par_iter()
        .map(|seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let indices = bootstrap_sample(n_samples, &mut rng);
            let boot_features: Vec<Vec<f64>> =
                indices.iter().map(|&i| features[i].clone()).collect();
            let boot_labels: Vec<usize> = indices.iter().map(|&i| labels[i]).collect();

            let params = TreeParams {
                criterion: config.criterion,
                max_depth: config.max_depth,
                min_samples_split: config.min_samples_split,
                min_samples_leaf: config.min_samples_leaf,
                max_features,
                seed: rng.gen(),
            };
            DecisionTree::grow(&boot_features, &boot_labels, n_classes, &params)
        })
        .collect();

    info!(n_trees = trees.len(), n_classes, "forest trained");

    Ok(RandomForest {
        trees,
        n_features,
        n_classes,
        feature_names: feature_names.to_vec(),
    })
}
