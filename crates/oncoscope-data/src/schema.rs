//! Named-column feature schema shared by the generator and the encoder.
//!
//! The encoder reads patient attributes through this table rather than by
//! positional row order, so the generated-column order and the encoded
//! feature order cannot drift apart.

use crate::domain::PatientRecord;

/// One numeric schema column: name, default for missing values, and the
/// field accessor on [`PatientRecord`].
pub(crate) struct NumericColumn {
    pub(crate) name: &'static str,
    pub(crate) default: f64,
    pub(crate) get: fn(&PatientRecord) -> Option<f64>,
}

/// Numeric columns in fixed feature order.
pub(crate) const NUMERIC_COLUMNS: [NumericColumn; 15] = [
    NumericColumn { name: "age", default: 65.0, get: |r| r.age },
    NumericColumn { name: "bmi", default: 25.0, get: |r| r.bmi },
    NumericColumn { name: "family_history", default: 0.0, get: |r| r.family_history },
    NumericColumn { name: "blood_pressure", default: 120.0, get: |r| r.blood_pressure },
    NumericColumn { name: "cholesterol", default: 200.0, get: |r| r.cholesterol },
    NumericColumn { name: "glucose", default: 100.0, get: |r| r.glucose },
    NumericColumn { name: "white_blood_cells", default: 7.0, get: |r| r.white_blood_cells },
    NumericColumn { name: "platelet_count", default: 250.0, get: |r| r.platelet_count },
    NumericColumn { name: "hemoglobin", default: 14.0, get: |r| r.hemoglobin },
    NumericColumn { name: "symptom_count", default: 3.0, get: |r| r.symptom_count },
    NumericColumn { name: "fatigue_level", default: 3.0, get: |r| r.fatigue_level },
    NumericColumn { name: "pain_level", default: 3.0, get: |r| r.pain_level },
    NumericColumn { name: "weight_loss", default: 0.0, get: |r| r.weight_loss },
    NumericColumn { name: "night_sweats", default: 0.0, get: |r| r.night_sweats },
    NumericColumn { name: "appetite_loss", default: 0.0, get: |r| r.appetite_loss },
];

/// Categorical column names, appended after the numeric columns.
pub(crate) const GENDER_COLUMN: &str = "gender";
pub(crate) const SMOKING_COLUMN: &str = "smoking_status";

/// The feature schema: 15 numeric columns followed by the encoded
/// `gender` and `smoking_status` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSchema;

impl FeatureSchema {
    /// Total number of feature columns (numeric + categorical).
    pub const N_FEATURES: usize = NUMERIC_COLUMNS.len() + 2;

    /// Return all feature column names in encoding order.
    #[must_use]
    pub fn feature_names() -> Vec<String> {
        NUMERIC_COLUMNS
            .iter()
            .map(|c| c.name.to_string())
            .chain([GENDER_COLUMN.to_string(), SMOKING_COLUMN.to_string()])
            .collect()
    }

    /// Return the documented default for a numeric column, if it exists.
    #[must_use]
    pub fn numeric_default(name: &str) -> Option<f64> {
        NUMERIC_COLUMNS
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_names_order_and_count() {
        let names = FeatureSchema::feature_names();
        assert_eq!(names.len(), FeatureSchema::N_FEATURES);
        assert_eq!(names[0], "age");
        assert_eq!(names[14], "appetite_loss");
        assert_eq!(names[15], "gender");
        assert_eq!(names[16], "smoking_status");
    }

    #[test]
    fn numeric_defaults_match_documentation() {
        assert_eq!(FeatureSchema::numeric_default("age"), Some(65.0));
        assert_eq!(FeatureSchema::numeric_default("platelet_count"), Some(250.0));
        assert_eq!(FeatureSchema::numeric_default("weight_loss"), Some(0.0));
        assert_eq!(FeatureSchema::numeric_default("gender"), None);
    }

    #[test]
    fn accessors_read_named_fields() {
        let record = PatientRecord {
            age: Some(42.0),
            hemoglobin: Some(13.5),
            ..PatientRecord::default()
        };
        let age = NUMERIC_COLUMNS.iter().find(|c| c.name == "age").unwrap();
        let hb = NUMERIC_COLUMNS.iter().find(|c| c.name == "hemoglobin").unwrap();
        assert_eq!((age.get)(&record), Some(42.0));
        assert_eq!((hb.get)(&record), Some(13.5));
    }
}
