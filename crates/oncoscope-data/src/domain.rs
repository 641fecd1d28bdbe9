//! Domain types for patient records and cancer-type labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Patient gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Return the gender as its canonical string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Patient smoking history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmokingStatus {
    Never,
    Former,
    Current,
}

impl SmokingStatus {
    /// Return the smoking status as its canonical string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SmokingStatus::Never => "Never",
            SmokingStatus::Former => "Former",
            SmokingStatus::Current => "Current",
        }
    }
}

impl fmt::Display for SmokingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed set of cancer-type labels, in fixed declaration order.
///
/// Class indices used for training come from this order (see
/// [`CancerType::index`]), not from the order labels happen to appear in a
/// generated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CancerType {
    Breast,
    Lung,
    Colon,
    Prostate,
    Melanoma,
    Leukemia,
    Ovarian,
    Pancreatic,
}

impl CancerType {
    /// All cancer types in index order.
    pub const ALL: [CancerType; 8] = [
        CancerType::Breast,
        CancerType::Lung,
        CancerType::Colon,
        CancerType::Prostate,
        CancerType::Melanoma,
        CancerType::Leukemia,
        CancerType::Ovarian,
        CancerType::Pancreatic,
    ];

    /// Return the zero-based class index of this cancer type.
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|&c| c == self)
            .expect("every variant is listed in ALL")
    }

    /// Return the cancer type for a zero-based class index, if valid.
    #[must_use]
    pub fn from_index(index: usize) -> Option<CancerType> {
        Self::ALL.get(index).copied()
    }

    /// Return the label as its canonical string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CancerType::Breast => "Breast",
            CancerType::Lung => "Lung",
            CancerType::Colon => "Colon",
            CancerType::Prostate => "Prostate",
            CancerType::Melanoma => "Melanoma",
            CancerType::Leukemia => "Leukemia",
            CancerType::Ovarian => "Ovarian",
            CancerType::Pancreatic => "Pancreatic",
        }
    }
}

impl fmt::Display for CancerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single patient's attributes.
///
/// Every field is optional: requests may omit attributes, and the encoder
/// substitutes the documented schema defaults (see
/// [`FeatureSchema`](crate::FeatureSchema)). Flag fields
/// (`family_history`, `weight_loss`, `night_sweats`, `appetite_loss`) carry
/// 0.0 or 1.0; `fatigue_level` and `pain_level` are 1-5 scales.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientRecord {
    pub name: Option<String>,
    pub age: Option<f64>,
    pub gender: Option<Gender>,
    pub bmi: Option<f64>,
    pub smoking_status: Option<SmokingStatus>,
    pub family_history: Option<f64>,
    pub blood_pressure: Option<f64>,
    pub cholesterol: Option<f64>,
    pub glucose: Option<f64>,
    pub white_blood_cells: Option<f64>,
    pub platelet_count: Option<f64>,
    pub hemoglobin: Option<f64>,
    pub symptom_count: Option<f64>,
    pub fatigue_level: Option<f64>,
    pub pain_level: Option<f64>,
    pub weight_loss: Option<f64>,
    pub night_sweats: Option<f64>,
    pub appetite_loss: Option<f64>,
}

impl PatientRecord {
    /// Return the display name, falling back to `"Patient"`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Patient")
    }
}

/// A labeled synthetic training table.
///
/// Records and labels are parallel vectors — `records[i]` carries the
/// attributes that produced `labels[i]` through the label cascade.
#[derive(Debug, Clone)]
pub struct TrainingTable {
    records: Vec<PatientRecord>,
    labels: Vec<CancerType>,
}

impl TrainingTable {
    pub(crate) fn new(records: Vec<PatientRecord>, labels: Vec<CancerType>) -> Self {
        debug_assert_eq!(records.len(), labels.len());
        Self { records, labels }
    }

    /// Return the patient records.
    #[must_use]
    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    /// Return the assigned labels.
    #[must_use]
    pub fn labels(&self) -> &[CancerType] {
        &self.labels
    }

    /// Return the labels as zero-based class indices.
    #[must_use]
    pub fn label_indices(&self) -> Vec<usize> {
        self.labels.iter().map(|l| l.index()).collect()
    }

    /// Return the number of rows.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancer_type_index_roundtrip() {
        for (i, &cancer) in CancerType::ALL.iter().enumerate() {
            assert_eq!(cancer.index(), i);
            assert_eq!(CancerType::from_index(i), Some(cancer));
        }
    }

    #[test]
    fn cancer_type_from_index_out_of_range() {
        assert_eq!(CancerType::from_index(CancerType::ALL.len()), None);
    }

    #[test]
    fn display_name_falls_back() {
        let record = PatientRecord::default();
        assert_eq!(record.display_name(), "Patient");

        let named = PatientRecord {
            name: Some("Jane Doe".to_string()),
            ..PatientRecord::default()
        };
        assert_eq!(named.display_name(), "Jane Doe");
    }

    #[test]
    fn record_deserializes_with_missing_fields() {
        let record: PatientRecord =
            serde_json::from_str(r#"{"age": 70, "gender": "Female"}"#).unwrap();
        assert_eq!(record.age, Some(70.0));
        assert_eq!(record.gender, Some(Gender::Female));
        assert_eq!(record.bmi, None);
    }
}
