//! Prediction results over the closed cancer-type set.

use serde::Serialize;

use oncoscope_data::CancerType;
use oncoscope_rf::ClassDistribution;

/// One labeled probability from a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassProbability {
    /// The cancer-type label.
    pub label: CancerType,
    /// The class probability, in [0, 1].
    pub probability: f64,
}

/// A single patient's prediction.
///
/// `probabilities` always covers the full closed label set in declaration
/// order; classes the forest never saw carry probability 0.0.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    /// The predicted cancer type.
    pub label: CancerType,
    /// The probability of the predicted type (max of the distribution).
    pub confidence: f64,
    /// The full distribution over the closed label set.
    pub probabilities: Vec<ClassProbability>,
    /// The top-3 labels by probability, highest first.
    pub top_predictions: Vec<ClassProbability>,
}

impl PredictionResult {
    /// Build a result from a forest class distribution.
    ///
    /// Distributions shorter than the closed label set are padded with zero
    /// probability; class indices map through [`CancerType::from_index`].
    #[must_use]
    pub fn from_distribution(distribution: &ClassDistribution) -> Self {
        let probs = distribution.as_slice();
        let probabilities: Vec<ClassProbability> = CancerType::ALL
            .iter()
            .enumerate()
            .map(|(i, &label)| ClassProbability {
                label,
                probability: probs.get(i).copied().unwrap_or(0.0),
            })
            .collect();

        let mut ranked = probabilities.clone();
        ranked.sort_by(|a, b| {
            b.probability
                .total_cmp(&a.probability)
                .then(a.label.index().cmp(&b.label.index()))
        });
        ranked.truncate(3);

        let top = ranked[0];
        Self {
            label: top.label,
            confidence: top.probability,
            probabilities,
            top_predictions: ranked,
        }
    }
}
