//! Prediction: averaged class distributions over all trees.

use crate::error::RfError;
use crate::forest::RandomForest;

/// A probability distribution over the training classes.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDistribution {
    probs: Vec<f64>,
}

impl ClassDistribution {
    /// Return the class index with the highest probability.
    ///
    /// Ties break toward the lower index.
    #[must_use]
    pub fn predicted_class(&self) -> usize {
        let mut best = 0;
        for (i, &p) in self.probs.iter().enumerate() {
            if p > self.probs[best] {
                best = i;
            }
        }
        best
    }

    /// Return the probability assigned to the predicted class.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.probs[self.predicted_class()]
    }

    /// Return up to `k` `(class_index, probability)` pairs, highest first.
    ///
    /// Ties break toward the lower class index.
    #[must_use]
    pub fn top_k(&self, k: usize) -> Vec<(usize, f64)> {
        let mut ranked: Vec<(usize, f64)> = self.probs.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(k);
        ranked
    }

    /// Return the probabilities indexed by class.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.probs
    }
}

impl RandomForest {
    /// Predict the class index for a single sample.
    ///
    /// # Errors
    ///
    /// Returns [`RfError::PredictionFeatureMismatch`] if `sample` does not
    /// have the training feature count.
    pub fn predict(&self, sample: &[f64]) -> Result<usize, RfError> {
        Ok(self.predict_proba(sample)?.predicted_class())
    }

    /// Predict the class distribution for a single sample.
    ///
    /// The result is the per-class mean of the leaf distributions reached in
    /// each tree, so probabilities sum to 1.
    ///
    /// # Errors
    ///
    /// Returns [`RfError::PredictionFeatureMismatch`] if `sample` does not
    /// have the training feature count.
    pub fn predict_proba(&self, sample: &[f64]) -> Result<ClassDistribution, RfError> {
        if sample.len() != self.n_features {
            return Err(RfError::PredictionFeatureMismatch {
                expected: self.n_features,
                got: sample.len(),
            });
        }

        let mut probs = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (p, &leaf_p) in probs.iter_mut().zip(tree.leaf_distribution(sample)) {
                *p += leaf_p;
            }
        }
        let n_trees = self.trees.len() as f64;
        for p in &mut probs {
            *p /= n_trees;
        }
        Ok(ClassDistribution { probs })
    }

    /// Predict class indices for a batch of samples.
    ///
    /// # Errors
    ///
    /// Returns [`RfError::PredictionFeatureMismatch`] on the first sample
    /// with the wrong feature count.
    pub fn predict_batch(&self, samples: &[Vec<f64>]) -> Result<Vec<usize>, RfError> {
        samples.iter().map(|s| self.predict(s)).collect()
    }

    /// Predict class distributions for a batch of samples.
    ///
    /// # Errors
    ///
    /// Returns [`RfError::PredictionFeatureMismatch`] on the first sample
    /// with the wrong feature count.
    pub fn predict_proba_batch(
        &self,
        samples: &[Vec<f64>],
    ) -> Result<Vec<ClassDistribution>, RfError> {
        samples.iter().map(|s| self.predict_proba(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RandomForestConfig;

    fn fitted_forest() -> RandomForest {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for i in 0..15 {
            features.push(vec![i as f64 * 0.1]);
            labels.push(0);
        }
        for i in 0..15 {
            features.push(vec![10.0 + i as f64 * 0.1]);
            labels.push(1);
        }
        RandomForestConfig::new(20)
            .unwrap()
            .fit(&features, &labels, &["x".to_string()])
            .unwrap()
    }

    #[test]
    fn separable_clusters_predicted_correctly() {
        let forest = fitted_forest();
        assert_eq!(forest.predict(&[0.5]).unwrap(), 0);
        assert_eq!(forest.predict(&[10.5]).unwrap(), 1);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let forest = fitted_forest();
        let dist = forest.predict_proba(&[5.0]).unwrap();
        let sum: f64 = dist.as_slice().iter().sum();
        assert!((sum - 1.0).abs() < 1e-10);
    }

    #[test]
    fn wrong_feature_count_rejected() {
        let forest = fitted_forest();
        let result = forest.predict(&[1.0, 2.0]);
        assert!(matches!(
            result,
            Err(RfError::PredictionFeatureMismatch {
                expected: 1,
                got: 2
            })
        ));
    }

    #[test]
    fn batch_matches_single() {
        let forest = fitted_forest();
        let samples = vec![vec![0.5], vec![10.5], vec![5.0]];
        let batch = forest.predict_batch(&samples).unwrap();
        for (sample, &pred) in samples.iter().zip(&batch) {
            assert_eq!(forest.predict(sample).unwrap(), pred);
        }
    }

    #[test]
    fn top_k_ordered_descending() {
        let dist = ClassDistribution {
            probs: vec![0.1, 0.6, 0.3],
        };
        assert_eq!(dist.predicted_class(), 1);
        assert!((dist.confidence() - 0.6).abs() < 1e-12);
        let top = dist.top_k(2);
        assert_eq!(top[0].0, 1);
        assert_eq!(top[1].0, 2);
    }

    #[test]
    fn top_k_tie_prefers_lower_index() {
        let dist = ClassDistribution {
            probs: vec![0.5, 0.5],
        };
        assert_eq!(dist.predicted_class(), 0);
        assert_eq!(dist.top_k(1)[0].0, 0);
    }
}
