use std::path::PathBuf;

use oncoscope_data::DataError;
use oncoscope_rf::RfError;

/// Errors from the training pipeline and prediction service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Returned when predicting before a model snapshot was installed.
    #[error("no model snapshot installed; train first")]
    ModelNotTrained,

    /// A data-layer failure (generation, encoding, splitting).
    #[error(transparent)]
    Data(#[from] DataError),

    /// A classifier failure (training or prediction).
    #[error(transparent)]
    Forest(#[from] RfError),

    /// Returned when the run name contains characters outside `[a-zA-Z0-9_-]`.
    #[error("invalid run name \"{name}\": must match [a-zA-Z0-9_-]+")]
    InvalidRunName {
        /// The invalid name.
        name: String,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {path}")]
    OutputDirCreate {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a report file cannot be written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
