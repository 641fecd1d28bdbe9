//! Immutable fitted-model snapshots.

use oncoscope_data::{FittedEncoder, PatientRecord};
use oncoscope_rf::RandomForest;

use crate::error::ServiceError;
use crate::result::PredictionResult;

/// An encoder and forest that were fitted together.
///
/// The pair is immutable after training; retraining produces a new snapshot
/// that replaces the old one wholesale. This is what keeps the training-time
/// and inference-time encodings identical.
#[derive(Debug, Clone)]
pub struct ModelSnapshot {
    encoder: FittedEncoder,
    forest: RandomForest,
}

impl ModelSnapshot {
    pub(crate) fn new(encoder: FittedEncoder, forest: RandomForest) -> Self {
        debug_assert_eq!(encoder.n_features(), forest.n_features());
        Self { encoder, forest }
    }

    /// Predict the cancer type for a patient record.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ServiceError::Data`] | the record carries a category unseen at fit time |
    /// | [`ServiceError::Forest`] | the encoded row does not match the forest (cannot happen for a snapshot built by the pipeline) |
    pub fn predict(&self, patient: &PatientRecord) -> Result<PredictionResult, ServiceError> {
        let encoded = self.encoder.encode(patient)?;
        let distribution = self.forest.predict_proba(&encoded)?;
        Ok(PredictionResult::from_distribution(&distribution))
    }

    /// Return the fitted encoder.
    #[must_use]
    pub fn encoder(&self) -> &FittedEncoder {
        &self.encoder
    }

    /// Return the trained forest.
    #[must_use]
    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }
}
