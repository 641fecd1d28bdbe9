//! Training pipeline and prediction service.
//!
//! [`TrainingConfig`] runs the full pipeline: generate a seeded synthetic
//! table, split it, fit the encoder on the training partition only, train
//! the forest, and evaluate on the holdout. The result is an immutable
//! [`ModelSnapshot`] that [`PredictionService`] swaps in wholesale, so a
//! prediction always sees an encoder and forest fitted together.
//!
//! Persistence is a port: [`PredictionSink`] receives a timestamped row per
//! prediction and its failures never fail the prediction itself.

mod error;
mod pipeline;
mod report;
mod result;
mod service;
mod sink;
mod snapshot;

pub use error::ServiceError;
pub use pipeline::{ModelEvaluation, TrainedModel, TrainingConfig};
pub use report::{ReportWriter, RunName};
pub use result::{ClassProbability, PredictionResult};
pub use service::PredictionService;
pub use sink::{MemorySink, PredictionRow, PredictionSink};
pub use snapshot::ModelSnapshot;
