/// Errors from explanation formatting.
#[derive(Debug, thiserror::Error)]
pub enum ExplainError {
    /// Returned when a confidence score is NaN or outside [0, 1].
    #[error("confidence must be in [0, 1], got {confidence}")]
    InvalidConfidence {
        /// The invalid confidence value provided.
        confidence: f64,
    },
}
