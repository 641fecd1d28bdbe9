//! Split criteria and exact best-split search.

use rand::Rng;

/// Criterion for measuring the quality of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitCriterion {
    /// Gini impurity: 1 - Σ(p_i²)
    Gini,
    /// Information entropy: -Σ(p_i · ln(p_i))
    Entropy,
}

impl SplitCriterion {
    /// Compute the impurity of a node from its class counts.
    ///
    /// Returns 0.0 when `n_samples` is zero (pure node).
    #[must_use]
    pub fn impurity(&self, class_counts: &[usize], n_samples: usize) -> f64 {
        if n_samples == 0 {
            return 0.0;
        }
        let n = n_samples as f64;
        match self {
            SplitCriterion::Gini => {
                let sum_sq: f64 = class_counts
                    .iter()
                    .map(|&c| {
                        let p = c as f64 / n;
                        p * p
                    })
                    .sum();
                1.0 - sum_sq
            }
            SplitCriterion::Entropy => {
                -class_counts
                    .iter()
                    .filter(|&&c| c > 0)
                    .map(|&c| {
                        let p = c as f64 / n;
                        p * p.ln()
                    })
                    .sum::<f64>()
            }
        }
    }
}

/// The best split found for a node.
#[derive(Debug, Clone)]
pub(crate) struct BestSplit {
    /// Feature column used for the split.
    pub(crate) feature: usize,
    /// Threshold value: samples with feature <= threshold go left.
    pub(crate) threshold: f64,
    /// Sample indices going to the left child.
    pub(crate) left_indices: Vec<usize>,
    /// Sample indices going to the right child.
    pub(crate) right_indices: Vec<usize>,
}

/// Find the best exact split among a random subset of features.
///
/// For each of `max_features` randomly chosen features, sorts the node's
/// `(value, label)` pairs and scans boundaries left-to-right with
/// incremental class counts, minimizing the sample-weighted child impurity.
/// Returns `None` when no boundary improves on the parent (all values
/// identical, or every candidate violates `min_samples_leaf`).
///
/// `features` is column-major: `features[feature_idx][sample_idx]`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn find_best_split(
    features: &[Vec<f64>],
    labels: &[usize],
    sample_indices: &[usize],
    n_classes: usize,
    criterion: SplitCriterion,
    max_features: usize,
    min_samples_leaf: usize,
    rng: &mut impl Rng,
) -> Option<BestSplit> {
    let n_features = features.len();
    let n_samples = sample_indices.len();
    if n_samples < 2 || n_features == 0 {
        return None;
    }

    let mut parent_counts = vec![0usize; n_classes];
    for &si in sample_indices {
        parent_counts[labels[si]] += 1;
    }
    let parent_impurity = criterion.impurity(&parent_counts, n_samples);

    // Partial Fisher-Yates: shuffle only the first `max_features` positions.
    let mut feature_order: Vec<usize> = (0..n_features).collect();
    let take = max_features.min(n_features);
    for i in 0..take {
        let j = rng.gen_range(i..n_features);
        feature_order.swap(i, j);
    }

    let mut best_score = parent_impurity;
    let mut best: Option<(usize, f64)> = None;

    for &feat_idx in &feature_order[..take] {
        let column = &features[feat_idx];

        let mut sorted: Vec<(f64, usize)> = sample_indices
            .iter()
            .map(|&si| (column[si], si))
            .collect();
        sorted.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

        let mut left_counts = vec![0usize; n_classes];
        let mut right_counts = parent_counts.clone();

        for i in 0..(n_samples - 1) {
            let (value, si) = sorted[i];
            let class = labels[si];
            left_counts[class] += 1;
            right_counts[class] -= 1;

            // No boundary between identical values.
            let next_value = sorted[i + 1].0;
            if value == next_value {
                continue;
            }

            let n_left = i + 1;
            let n_right = n_samples - n_left;
            if n_left < min_samples_leaf || n_right < min_samples_leaf {
                continue;
            }

            let weighted = (n_left as f64 * criterion.impurity(&left_counts, n_left)
                + n_right as f64 * criterion.impurity(&right_counts, n_right))
                / n_samples as f64;

            if weighted < best_score {
                best_score = weighted;
                best = Some((feat_idx, (value + next_value) / 2.0));
            }
        }
    }

    let (feature, threshold) = best?;
    let column = &features[feature];
    let mut left_indices = Vec::new();
    let mut right_indices = Vec::new();
    for &si in sample_indices {
        if column[si] <= threshold {
            left_indices.push(si);
        } else {
            right_indices.push(si);
        }
    }

    Some(BestSplit {
        feature,
        threshold,
        left_indices,
        right_indices,
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn gini_pure_node_is_zero() {
        let gini = SplitCriterion::Gini.impurity(&[10, 0], 10);
        assert!(gini.abs() < f64::EPSILON);
    }

    #[test]
    fn gini_balanced_binary_is_half() {
        let gini = SplitCriterion::Gini.impurity(&[5, 5], 10);
        assert!((gini - 0.5).abs() < 1e-10);
    }

    #[test]
    fn entropy_balanced_binary_is_ln2() {
        let entropy = SplitCriterion::Entropy.impurity(&[5, 5], 10);
        assert!((entropy - 2.0f64.ln()).abs() < 1e-10);
    }

    #[test]
    fn impurity_empty_node_is_zero() {
        assert_eq!(SplitCriterion::Gini.impurity(&[0, 0], 0), 0.0);
        assert_eq!(SplitCriterion::Entropy.impurity(&[0, 0], 0), 0.0);
    }

    #[test]
    fn separable_data_split_between_clusters() {
        // Column-major: one feature, values 1-3 are class 0, 10-12 class 1.
        let features = vec![vec![1.0, 2.0, 3.0, 10.0, 11.0, 12.0]];
        let labels = vec![0, 0, 0, 1, 1, 1];
        let indices: Vec<usize> = (0..6).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let split = find_best_split(
            &features,
            &labels,
            &indices,
            2,
            SplitCriterion::Gini,
            1,
            1,
            &mut rng,
        )
        .unwrap();

        assert_eq!(split.feature, 0);
        assert!(split.threshold > 3.0 && split.threshold < 10.0);
        assert_eq!(split.left_indices, vec![0, 1, 2]);
        assert_eq!(split.right_indices, vec![3, 4, 5]);
    }

    #[test]
    fn constant_feature_no_split() {
        let features = vec![vec![5.0; 6]];
        let labels = vec![0, 0, 0, 1, 1, 1];
        let indices: Vec<usize> = (0..6).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let split = find_best_split(
            &features,
            &labels,
            &indices,
            2,
            SplitCriterion::Gini,
            1,
            1,
            &mut rng,
        );
        assert!(split.is_none());
    }

    #[test]
    fn min_samples_leaf_blocks_all_boundaries() {
        // With 4 samples and min_samples_leaf=3, every boundary leaves a
        // child smaller than 3.
        let features = vec![vec![1.0, 10.0, 11.0, 12.0]];
        let labels = vec![0, 1, 1, 1];
        let indices: Vec<usize> = (0..4).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let split = find_best_split(
            &features,
            &labels,
            &indices,
            2,
            SplitCriterion::Gini,
            1,
            3,
            &mut rng,
        );
        assert!(split.is_none());
    }
}
