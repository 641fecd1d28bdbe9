//! Error types for oncoscope-data.

/// Errors from dataset generation, splitting, and feature encoding.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Returned when a generator is asked for zero samples.
    #[error("sample count must be at least 1, got 0")]
    EmptySample,

    /// Returned when a categorical value was not observed during encoder fit.
    ///
    /// Encoding aborts rather than producing an arbitrary code.
    #[error("unknown category \"{value}\" for column {column}: not observed during fit")]
    UnknownCategory {
        /// The categorical column name.
        column: &'static str,
        /// The unseen category value.
        value: String,
    },

    /// Returned when a holdout fraction is outside (0.0, 1.0).
    #[error("test fraction must be in (0.0, 1.0), got {fraction}")]
    InvalidTestFraction {
        /// The invalid fraction provided.
        fraction: f64,
    },

    /// Returned when an encoder is fitted on an empty record slice.
    #[error("cannot fit encoder on zero records")]
    EmptyFit,
}
