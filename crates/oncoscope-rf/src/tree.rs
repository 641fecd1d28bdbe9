//! CART decision trees stored in an index arena.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::split::{find_best_split, SplitCriterion};

/// A node in the tree arena. Children are referenced by arena index, which
/// keeps traversal cache-friendly.
#[derive(Debug, Clone)]
pub(crate) enum Node {
    /// An interior split node.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// A terminal leaf holding the normalized class distribution.
    Leaf { distribution: Vec<f64> },
}

/// Per-tree growth parameters, resolved by the forest before training.
#[derive(Debug, Clone)]
pub(crate) struct TreeParams {
    pub(crate) criterion: SplitCriterion,
    pub(crate) max_depth: Option<usize>,
    pub(crate) min_samples_split: usize,
    pub(crate) min_samples_leaf: usize,
    pub(crate) max_features: usize,
    pub(crate) seed: u64,
}

/// A fitted CART decision tree.
#[derive(Debug, Clone)]
pub(crate) struct DecisionTree {
    nodes: Vec<Node>,
    n_classes: usize,
}

impl DecisionTree {
    /// Grow a tree on pre-validated row-major data.
    ///
    /// The forest validates shape and finiteness once; growth itself cannot
    /// fail.
    pub(crate) fn grow(
        features: &[Vec<f64>],
        labels: &[usize],
        n_classes: usize,
        params: &TreeParams,
    ) -> Self {
        let n_samples = features.len();
        let n_features = features[0].len();

        // Column-major layout for the split search.
        let columns: Vec<Vec<f64>> = (0..n_features)
            .map(|f| features.iter().map(|row| row[f]).collect())
            .collect();

        let sample_indices: Vec<usize> = (0..n_samples).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let mut arena = Vec::new();
        build(
            &columns,
            labels,
            &sample_indices,
            n_classes,
            params,
            0,
            &mut rng,
            &mut arena,
        );

        Self {
            nodes: arena,
            n_classes,
        }
    }

    /// Return the leaf class distribution for a sample.
    ///
    /// The caller guarantees `sample.len()` matches the training feature
    /// count; the forest checks this once per prediction.
    pub(crate) fn leaf_distribution(&self, sample: &[f64]) -> &[f64] {
        let mut idx = 0usize;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if sample[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Return the total number of nodes.
    #[cfg(test)]
    pub(crate) fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of classes.
    #[cfg(test)]
    pub(crate) fn n_classes(&self) -> usize {
        self.n_classes
    }
}

/// Recursively build the arena; returns the index of the created node.
#[allow(clippy::too_many_arguments)]
fn build(
    columns: &[Vec<f64>],
    labels: &[usize],
    sample_indices: &[usize],
    n_classes: usize,
    params: &TreeParams,
    depth: usize,
    rng: &mut ChaCha8Rng,
    arena: &mut Vec<Node>,
) -> usize {
    let n_samples = sample_indices.len();
    let mut class_counts = vec![0usize; n_classes];
    for &si in sample_indices {
        class_counts[labels[si]] += 1;
    }

    let make_leaf = |arena: &mut Vec<Node>| -> usize {
        let total = n_samples as f64;
        let distribution = class_counts.iter().map(|&c| c as f64 / total).collect();
        arena.push(Node::Leaf { distribution });
        arena.len() - 1
    };

    let pure = params.criterion.impurity(&class_counts, n_samples) == 0.0;
    let too_few = n_samples < params.min_samples_split;
    let depth_exceeded = params.max_depth.is_some_and(|max| depth >= max);
    if pure || too_few || depth_exceeded {
        return make_leaf(arena);
    }

    let split = match find_best_split(
        columns,
        labels,
        sample_indices,
        n_classes,
        params.criterion,
        params.max_features,
        params.min_samples_leaf,
        rng,
    ) {
        Some(s) => s,
        None => return make_leaf(arena),
    };

    // Reserve the split's arena slot, recurse, then fill in the children.
    let node_idx = arena.len();
    arena.push(Node::Leaf {
        distribution: vec![0.0; n_classes],
    });

    let left = build(
        columns,
        labels,
        &split.left_indices,
        n_classes,
        params,
        depth + 1,
        rng,
        arena,
    );
    let right = build(
        columns,
        labels,
        &split.right_indices,
        n_classes,
        params,
        depth + 1,
        rng,
        arena,
    );

    arena[node_idx] = Node::Split {
        feature: split.feature,
        threshold: split.threshold,
        left,
        right,
    };
    node_idx
}

/// Generate a bootstrap sample of `n_samples` draws with replacement.
pub(crate) fn bootstrap_sample(n_samples: usize, rng: &mut impl Rng) -> Vec<usize> {
    (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
}
