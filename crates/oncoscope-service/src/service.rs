//! The prediction service: snapshot holder plus sink hand-off.

use std::sync::{Arc, RwLock};

use chrono::Utc;
use tracing::{debug, warn};

use oncoscope_data::PatientRecord;

use crate::error::ServiceError;
use crate::result::PredictionResult;
use crate::sink::{PredictionRow, PredictionSink};
use crate::snapshot::ModelSnapshot;

/// Serves predictions from the currently installed model snapshot.
///
/// Starts untrained. [`install`](Self::install) swaps the snapshot
/// atomically, so concurrent readers see either the old fitted pair or the
/// new one, never a mix.
#[derive(Debug, Default)]
pub struct PredictionService {
    snapshot: RwLock<Option<Arc<ModelSnapshot>>>,
}

impl PredictionService {
    /// Create an untrained service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a snapshot, replacing any previous one.
    pub fn install(&self, snapshot: ModelSnapshot) {
        let mut guard = self.snapshot.write().expect("snapshot lock poisoned");
        *guard = Some(Arc::new(snapshot));
        debug!("model snapshot installed");
    }

    /// Return whether a snapshot is installed.
    #[must_use]
    pub fn is_trained(&self) -> bool {
        self.snapshot
            .read()
            .expect("snapshot lock poisoned")
            .is_some()
    }

    /// Return a handle to the current snapshot, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<ModelSnapshot>> {
        self.snapshot
            .read()
            .expect("snapshot lock poisoned")
            .clone()
    }

    /// Predict the cancer type for a patient record.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ServiceError::ModelNotTrained`] | no snapshot installed |
    /// | [`ServiceError::Data`] | the record carries a category unseen at fit time |
    pub fn predict(&self, patient: &PatientRecord) -> Result<PredictionResult, ServiceError> {
        let snapshot = self.snapshot().ok_or(ServiceError::ModelNotTrained)?;
        snapshot.predict(patient)
    }

    /// Predict and hand the result to a persistence sink.
    ///
    /// A failing sink is logged at `warn` and the prediction is still
    /// returned; persistence is best-effort by contract.
    ///
    /// # Errors
    ///
    /// Same as [`predict`](Self::predict); sink failures are not errors.
    pub fn predict_and_record<S: PredictionSink>(
        &self,
        patient: &PatientRecord,
        sink: &S,
    ) -> Result<PredictionResult, ServiceError> {
        let result = self.predict(patient)?;

        let row = PredictionRow {
            name: patient.display_name().to_string(),
            age: patient.age,
            gender: patient.gender,
            prediction_result: result.label,
            confidence_score: result.confidence,
            created_at: Utc::now(),
        };
        if let Err(error) = sink.record(&row) {
            warn!(%error, patient = %row.name, "prediction sink failed, result not persisted");
        }

        Ok(result)
    }
}
