//! Persistence port for prediction rows.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

use oncoscope_data::{CancerType, Gender};

/// One persisted prediction.
///
/// Matches the columns of the downstream predictions table: who was
/// predicted, what, how confidently, and when.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRow {
    /// Patient display name.
    pub name: String,
    /// Patient age, if provided.
    pub age: Option<f64>,
    /// Patient gender, if provided.
    pub gender: Option<Gender>,
    /// The predicted cancer type.
    pub prediction_result: CancerType,
    /// The prediction confidence, in [0, 1].
    pub confidence_score: f64,
    /// When the prediction was made.
    pub created_at: DateTime<Utc>,
}

/// A destination for prediction rows.
///
/// Implementations may write to a database or any other store. The service
/// treats failures as non-fatal; see
/// [`PredictionService::predict_and_record`](crate::PredictionService::predict_and_record).
pub trait PredictionSink: Send + Sync {
    /// The implementation's failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist one prediction row.
    ///
    /// # Errors
    ///
    /// Returns the implementation's error when the row cannot be stored.
    fn record(&self, row: &PredictionRow) -> Result<(), Self::Error>;
}

/// An in-memory sink.
#[derive(Debug, Default)]
pub struct MemorySink {
    rows: Mutex<Vec<PredictionRow>>,
}

impl MemorySink {
    /// Return a copy of all recorded rows.
    #[must_use]
    pub fn rows(&self) -> Vec<PredictionRow> {
        self.rows.lock().expect("sink lock poisoned").clone()
    }
}

impl PredictionSink for MemorySink {
    type Error = std::convert::Infallible;

    fn record(&self, row: &PredictionRow) -> Result<(), Self::Error> {
        self.rows.lock().expect("sink lock poisoned").push(row.clone());
        Ok(())
    }
}
