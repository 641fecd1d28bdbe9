//! Port for external text-generation services.

use tracing::warn;

use oncoscope_data::PatientRecord;

use crate::error::ExplainError;
use crate::formatter::{Explanation, TemplateGenerator};

/// A source of explanation text for a prediction.
///
/// Implementations may call out to an external completion service. The
/// pipeline never depends on one succeeding; see [`explain_or_fallback`].
pub trait TextGenerator {
    /// The implementation's failure type.
    type Error: std::fmt::Display;

    /// Produce an explanation for a predicted label and confidence.
    fn generate(
        &self,
        patient: &PatientRecord,
        label: &str,
        confidence: f64,
    ) -> Result<Explanation, Self::Error>;
}

impl TextGenerator for TemplateGenerator {
    type Error = ExplainError;

    fn generate(
        &self,
        patient: &PatientRecord,
        label: &str,
        confidence: f64,
    ) -> Result<Explanation, Self::Error> {
        self.render(patient, label, confidence)
    }
}

/// Generate an explanation, degrading to the local template on failure.
///
/// A failing external generator is logged at `warn` and never propagates;
/// only an invalid confidence can make the template path itself fail.
///
/// # Errors
///
/// Returns [`ExplainError::InvalidConfidence`] if `confidence` is NaN or
/// outside [0, 1].
pub fn explain_or_fallback<G: TextGenerator>(
    generator: &G,
    patient: &PatientRecord,
    label: &str,
    confidence: f64,
) -> Result<Explanation, ExplainError> {
    match generator.generate(patient, label, confidence) {
        Ok(explanation) => Ok(explanation),
        Err(error) => {
            warn!(%error, label, "text generation failed, using template fallback");
            TemplateGenerator.render(patient, label, confidence)
        }
    }
}
