//! Three-section explanation letters rendered from the knowledge table.

use serde::Serialize;
use tracing::debug;

use oncoscope_data::PatientRecord;

use crate::error::ExplainError;
use crate::knowledge::{lookup, CancerInfo};

/// A formatted clinical explanation for one prediction.
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    /// The main patient-facing letter.
    pub explanation: String,
    /// Recommended evaluation, tests, and lifestyle guidance.
    pub recommendations: String,
    /// Immediate, follow-up, and ongoing actions.
    pub next_steps: String,
    /// One-line interpretation of the confidence score.
    pub confidence_interpretation: String,
}

impl Explanation {
    /// Render all sections as a single document.
    #[must_use]
    pub fn full_text(&self) -> String {
        format!(
            "{}\n\nRECOMMENDATIONS:\n{}\n\nNEXT STEPS:\n{}",
            self.explanation, self.recommendations, self.next_steps
        )
    }
}

/// Interpret a confidence score in clinical shorthand.
///
/// Band boundaries are 0.9, 0.7, 0.5, and 0.3.
#[must_use]
pub fn interpret_confidence(confidence: f64) -> &'static str {
    if confidence >= 0.9 {
        "Very high confidence - multiple strong indicators present"
    } else if confidence >= 0.7 {
        "High confidence - several risk factors align"
    } else if confidence >= 0.5 {
        "Moderate confidence - some indicators present"
    } else if confidence >= 0.3 {
        "Low confidence - limited indicators"
    } else {
        "Very low confidence - minimal risk factors"
    }
}

/// Narrative sentence for the letter body. Band boundaries are 0.8, 0.6,
/// and 0.4; coarser than [`interpret_confidence`].
fn confidence_sentence(confidence: f64) -> &'static str {
    if confidence >= 0.8 {
        "This represents a high-confidence prediction with multiple risk factors present."
    } else if confidence >= 0.6 {
        "This represents a moderate-confidence prediction with several indicators present."
    } else if confidence >= 0.4 {
        "This represents a low-to-moderate confidence prediction with some risk factors identified."
    } else {
        "This represents a low-confidence prediction with minimal risk factors present."
    }
}

fn risk_factor_lines(patient: &PatientRecord) -> String {
    let mut lines = Vec::new();

    let age = patient.age.unwrap_or(0.0);
    if age > 65.0 {
        lines.push("- Advanced age (increased risk)".to_string());
    } else if age > 50.0 {
        lines.push("- Age over 50 (moderate risk factor)".to_string());
    }

    match patient.smoking_status {
        Some(oncoscope_data::SmokingStatus::Current) => {
            lines.push("- Current smoking (significant risk factor)".to_string());
        }
        Some(oncoscope_data::SmokingStatus::Former) => {
            lines.push("- Former smoking history (elevated risk)".to_string());
        }
        _ => {}
    }

    if patient.family_history.unwrap_or(0.0) > 0.0 {
        lines.push("- Family history of cancer (genetic predisposition)".to_string());
    }

    if patient.bmi.unwrap_or(0.0) > 30.0 {
        lines.push("- Obesity (BMI > 30, increased risk)".to_string());
    }

    if lines.is_empty() {
        "- No major risk factors identified".to_string()
    } else {
        lines.join("\n")
    }
}

fn symptom_lines(patient: &PatientRecord) -> String {
    let mut lines = Vec::new();

    let fatigue = patient.fatigue_level.unwrap_or(1.0);
    if fatigue > 3.0 {
        lines.push(format!(
            "- Significant fatigue (level {fatigue:.0}/5) - concerning symptom"
        ));
    } else if fatigue > 2.0 {
        lines.push(format!(
            "- Moderate fatigue (level {fatigue:.0}/5) - worth monitoring"
        ));
    }

    let pain = patient.pain_level.unwrap_or(1.0);
    if pain > 3.0 {
        lines.push(format!(
            "- Significant pain (level {pain:.0}/5) - requires evaluation"
        ));
    } else if pain > 2.0 {
        lines.push(format!(
            "- Moderate pain (level {pain:.0}/5) - should be assessed"
        ));
    }

    if patient.weight_loss.unwrap_or(0.0) > 0.0 {
        lines.push("- Unexplained weight loss - important warning sign".to_string());
    }
    if patient.night_sweats.unwrap_or(0.0) > 0.0 {
        lines.push("- Night sweats - can indicate systemic illness".to_string());
    }
    if patient.appetite_loss.unwrap_or(0.0) > 0.0 {
        lines.push("- Loss of appetite - concerning symptom".to_string());
    }

    let symptom_count = patient.symptom_count.unwrap_or(0.0);
    if symptom_count > 3.0 {
        lines.push(format!(
            "- Multiple symptoms present ({symptom_count:.0}) - comprehensive evaluation needed"
        ));
    }

    if lines.is_empty() {
        "- Minimal symptoms reported - good prognostic sign".to_string()
    } else {
        lines.join("\n")
    }
}

fn render_explanation(
    patient: &PatientRecord,
    label: &str,
    confidence: f64,
    info: &CancerInfo,
) -> String {
    let gender = patient
        .gender
        .map_or("Unknown", oncoscope_data::Gender::as_str);
    format!(
        "Dear {name},\n\n\
         Based on our analysis of your medical information, there is a {pct:.1}% \
         likelihood that you may be at risk for {label_lower} cancer. {sentence}\n\n\
         {description}\n\n\
         Your risk assessment is based on several factors:\n\
         - Age: {age:.0} years old\n\
         - Gender: {gender}\n\
         {risk_lines}\n\n\
         Symptom Analysis:\n\
         {symptoms}\n\n\
         It's important to understand that this is a preliminary automated \
         assessment and not a definitive diagnosis. Many conditions can present \
         with similar symptoms, and further medical evaluation is essential for \
         accurate diagnosis.",
        name = patient.display_name(),
        pct = confidence * 100.0,
        label_lower = label.to_lowercase(),
        sentence = confidence_sentence(confidence),
        description = info.description,
        age = patient.age.unwrap_or(0.0),
        gender = gender,
        risk_lines = risk_factor_lines(patient),
        symptoms = symptom_lines(patient),
    )
}

fn render_recommendations(info: &CancerInfo) -> String {
    let mut out = String::from(
        "Based on your risk profile, I recommend the following:\n\n\
         IMMEDIATE MEDICAL EVALUATION:\n\
         - Schedule an appointment with your primary care physician within 1-2 weeks\n\
         - Discuss your symptoms and risk factors in detail\n\
         - Request appropriate screening tests\n\n\
         RECOMMENDED TESTS:\n",
    );
    for test in info.tests {
        out.push_str("- ");
        out.push_str(test);
        out.push('\n');
    }
    out.push_str(
        "\nLIFESTYLE MODIFICATIONS:\n\
         - Maintain a healthy diet rich in fruits and vegetables\n\
         - Exercise regularly as tolerated\n\
         - Avoid tobacco and limit alcohol consumption\n\
         - Follow up on any chronic medical conditions\n\n\
         MONITORING:\n\
         - Keep a symptom diary noting any changes\n\
         - Report any new or worsening symptoms immediately\n\
         - Follow recommended screening schedules for your age group",
    );
    out
}

fn render_next_steps(info: &CancerInfo) -> String {
    let specialists = info.specialists.join(", ");
    format!(
        "IMMEDIATE ACTIONS (Within 1-2 weeks):\n\
         1. Contact your primary care physician to discuss these findings\n\
         2. Schedule a comprehensive physical examination\n\
         3. Bring a list of all current symptoms and medications\n\n\
         FOLLOW-UP CARE (Within 2-4 weeks):\n\
         1. Complete recommended diagnostic tests\n\
         2. Consider consultation with specialists: {specialists}\n\
         3. Discuss family history and genetic counseling if appropriate\n\n\
         ONGOING MONITORING:\n\
         1. Attend all scheduled appointments\n\
         2. Follow through with recommended treatments or surveillance\n\
         3. Maintain open communication with your healthcare team\n\
         4. Seek immediate medical attention for any concerning new symptoms\n\n\
         Remember: Early detection and treatment significantly improve outcomes \
         for most types of cancer. This automated assessment is a tool to help \
         guide your healthcare decisions, but professional medical evaluation \
         is essential."
    )
}

/// The local template-based explanation renderer.
///
/// Always available; needs no external service.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    /// Render a full explanation for a prediction.
    ///
    /// Unknown labels use the Lung knowledge entry.
    ///
    /// # Errors
    ///
    /// Returns [`ExplainError::InvalidConfidence`] if `confidence` is NaN or
    /// outside [0, 1].
    pub fn render(
        &self,
        patient: &PatientRecord,
        label: &str,
        confidence: f64,
    ) -> Result<Explanation, ExplainError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ExplainError::InvalidConfidence { confidence });
        }
        let info = lookup(label);
        debug!(label, confidence, "rendering template explanation");

        Ok(Explanation {
            explanation: render_explanation(patient, label, confidence, info),
            recommendations: render_recommendations(info),
            next_steps: render_next_steps(info),
            confidence_interpretation: interpret_confidence(confidence).to_string(),
        })
    }
}
