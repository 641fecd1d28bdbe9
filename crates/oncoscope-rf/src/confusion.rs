//! Holdout evaluation: confusion matrix with per-class metrics.

use std::fmt;

use crate::error::RfError;

/// A confusion matrix over a named class set.
///
/// Counts are stored flat; `count(t, p)` is how many samples with true
/// class `t` were predicted as class `p`.
#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    counts: Vec<usize>,
    class_names: Vec<String>,
}

/// Per-class precision, recall, and F1.
#[derive(Debug, Clone)]
pub struct ClassMetrics {
    /// The class index.
    pub class: usize,
    /// The class name.
    pub name: String,
    /// TP / (TP + FP), 0.0 when the class was never predicted.
    pub precision: f64,
    /// TP / (TP + FN), 0.0 when the class has no true samples.
    pub recall: f64,
    /// Harmonic mean of precision and recall, 0.0 when both are zero.
    pub f1: f64,
    /// Number of true samples in the class.
    pub support: usize,
}

impl ConfusionMatrix {
    /// Build a confusion matrix from parallel true and predicted labels.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`RfError::EmptyDataset`] | zero labels provided |
    /// | [`RfError::LabelCountMismatch`] | `true_labels` and `predicted` differ in length |
    pub fn from_labels(
        true_labels: &[usize],
        predicted: &[usize],
        class_names: &[String],
    ) -> Result<Self, RfError> {
        if true_labels.is_empty() {
            return Err(RfError::EmptyDataset);
        }
        if predicted.len() != true_labels.len() {
            return Err(RfError::LabelCountMismatch {
                n_labels: predicted.len(),
                n_samples: true_labels.len(),
            });
        }
        let n = class_names.len();
        let mut counts = vec![0usize; n * n];
        for (&t, &p) in true_labels.iter().zip(predicted) {
            counts[t * n + p] += 1;
        }
        Ok(Self {
            counts,
            class_names: class_names.to_vec(),
        })
    }

    /// Return how many samples with true class `t` were predicted as `p`.
    #[must_use]
    pub fn count(&self, t: usize, p: usize) -> usize {
        self.counts[t * self.class_names.len() + p]
    }

    /// Overall accuracy.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        let n = self.class_names.len();
        let correct: usize = (0..n).map(|c| self.count(c, c)).sum();
        let total: usize = self.counts.iter().sum();
        correct as f64 / total as f64
    }

    /// Per-class precision, recall, F1, and support.
    #[must_use]
    pub fn class_metrics(&self) -> Vec<ClassMetrics> {
        let n = self.class_names.len();
        (0..n)
            .map(|c| {
                let tp = self.count(c, c);
                let predicted: usize = (0..n).map(|t| self.count(t, c)).sum();
                let support: usize = (0..n).map(|p| self.count(c, p)).sum();
                let precision = if predicted == 0 {
                    0.0
                } else {
                    tp as f64 / predicted as f64
                };
                let recall = if support == 0 {
                    0.0
                } else {
                    tp as f64 / support as f64
                };
                let f1 = if precision + recall == 0.0 {
                    0.0
                } else {
                    2.0 * precision * recall / (precision + recall)
                };
                ClassMetrics {
                    class: c,
                    name: self.class_names[c].clone(),
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect()
    }

    /// Unweighted mean of per-class F1 scores.
    #[must_use]
    pub fn macro_f1(&self) -> f64 {
        let metrics = self.class_metrics();
        metrics.iter().map(|m| m.f1).sum::<f64>() / metrics.len() as f64
    }

    /// Return the class names, in class-index order.
    #[must_use]
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    /// Return row `t` of the matrix: predictions for true class `t`.
    #[must_use]
    pub fn row(&self, t: usize) -> &[usize] {
        let n = self.class_names.len();
        &self.counts[t * n..(t + 1) * n]
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .class_names
            .iter()
            .map(|name| name.len())
            .max()
            .unwrap_or(0)
            .max(5);

        write!(f, "{:>width$}", "")?;
        for name in &self.class_names {
            write!(f, " {name:>width$}")?;
        }
        writeln!(f)?;

        for (t, name) in self.class_names.iter().enumerate() {
            write!(f, "{name:>width$}")?;
            for &val in self.row(t) {
                write!(f, " {val:>width$}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
