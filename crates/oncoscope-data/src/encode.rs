//! Feature encoding: categorical codes plus zero-mean/unit-variance scaling.
//!
//! The encoder is fitted exactly once on a training partition and the fitted
//! state is reused unchanged for every inference call — fitting a second
//! encoder for inference silently corrupts predictions, so the fitted state
//! is immutable by construction.

use tracing::{debug, instrument};

use crate::domain::PatientRecord;
use crate::error::DataError;
use crate::schema::{FeatureSchema, GENDER_COLUMN, NUMERIC_COLUMNS, SMOKING_COLUMN};

/// Fitted label-to-code mapping for one categorical column.
///
/// Categories are sorted lexicographically at fit time and codes are their
/// sorted positions (sklearn `LabelEncoder` semantics).
#[derive(Debug, Clone, PartialEq, Eq)]
struct CategoryMap {
    column: &'static str,
    categories: Vec<String>,
}

impl CategoryMap {
    fn fit(column: &'static str, observed: impl Iterator<Item = &'static str>) -> Self {
        let mut categories: Vec<String> = observed.map(str::to_string).collect();
        categories.sort_unstable();
        categories.dedup();
        Self { column, categories }
    }

    /// Return the code for a category value.
    fn code(&self, value: &str) -> Result<usize, DataError> {
        self.categories
            .iter()
            .position(|c| c == value)
            .ok_or_else(|| DataError::UnknownCategory {
                column: self.column,
                value: value.to_string(),
            })
    }

    /// Return the code of the first known category, used for missing values.
    fn first_code(&self) -> Result<usize, DataError> {
        if self.categories.is_empty() {
            return Err(DataError::UnknownCategory {
                column: self.column,
                value: "(missing)".to_string(),
            });
        }
        Ok(0)
    }
}

/// Fits a [`FittedEncoder`] from training records.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEncoder;

impl FeatureEncoder {
    /// Fit categorical mappings and per-column mean/scale on `records`.
    ///
    /// Scaling uses the population standard deviation; zero-variance columns
    /// scale by 1.0 so encoding never divides by zero.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DataError::EmptyFit`] | `records` is empty |
    /// | [`DataError::UnknownCategory`] | a categorical column has no observed values at all |
    #[instrument(skip_all, fields(n_records = records.len()))]
    pub fn fit(records: &[PatientRecord]) -> Result<FittedEncoder, DataError> {
        if records.is_empty() {
            return Err(DataError::EmptyFit);
        }

        let gender = CategoryMap::fit(
            GENDER_COLUMN,
            records.iter().filter_map(|r| r.gender.map(|g| g.as_str())),
        );
        let smoking = CategoryMap::fit(
            SMOKING_COLUMN,
            records
                .iter()
                .filter_map(|r| r.smoking_status.map(|s| s.as_str())),
        );

        let raw_rows: Vec<Vec<f64>> = records
            .iter()
            .map(|r| raw_row(r, &gender, &smoking))
            .collect::<Result<_, _>>()?;

        let n = raw_rows.len() as f64;
        let n_features = FeatureSchema::N_FEATURES;
        let mut means = vec![0.0f64; n_features];
        for row in &raw_rows {
            for (m, &v) in means.iter_mut().zip(row.iter()) {
                *m += v;
            }
        }
        means.iter_mut().for_each(|m| *m /= n);

        let mut scales = vec![0.0f64; n_features];
        for row in &raw_rows {
            for (s, (&v, &m)) in scales.iter_mut().zip(row.iter().zip(means.iter())) {
                *s += (v - m).powi(2);
            }
        }
        for s in scales.iter_mut() {
            let std = (*s / n).sqrt();
            // Constant columns pass through shifted only.
            *s = if std == 0.0 { 1.0 } else { std };
        }

        debug!(
            n_features,
            n_gender_categories = gender.categories.len(),
            n_smoking_categories = smoking.categories.len(),
            "encoder fitted"
        );

        Ok(FittedEncoder {
            gender,
            smoking,
            means,
            scales,
            feature_names: FeatureSchema::feature_names(),
        })
    }
}

/// Immutable fitted encoder state.
///
/// Holds the categorical mappings and per-column mean/scale fitted by
/// [`FeatureEncoder::fit`]. All inference in the same process must go
/// through the same fitted instance.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedEncoder {
    gender: CategoryMap,
    smoking: CategoryMap,
    means: Vec<f64>,
    scales: Vec<f64>,
    feature_names: Vec<String>,
}

impl FittedEncoder {
    /// Encode a single record into the scaled feature vector.
    ///
    /// Missing numeric attributes take the schema defaults; missing
    /// categorical attributes take the first known category. Encoding the
    /// same record twice yields identical output.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::UnknownCategory`] when a categorical value was
    /// not observed during fit.
    pub fn encode(&self, record: &PatientRecord) -> Result<Vec<f64>, DataError> {
        let raw = raw_row(record, &self.gender, &self.smoking)?;
        Ok(raw
            .iter()
            .zip(self.means.iter().zip(self.scales.iter()))
            .map(|(&v, (&mean, &scale))| (v - mean) / scale)
            .collect())
    }

    /// Encode a batch of records.
    ///
    /// # Errors
    ///
    /// Returns the first [`DataError::UnknownCategory`] encountered.
    pub fn encode_batch(&self, records: &[PatientRecord]) -> Result<Vec<Vec<f64>>, DataError> {
        records.iter().map(|r| self.encode(r)).collect()
    }

    /// Return the feature column names in encoding order.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Return the number of feature columns.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }
}

/// Assemble the unscaled feature row in schema order.
fn raw_row(
    record: &PatientRecord,
    gender: &CategoryMap,
    smoking: &CategoryMap,
) -> Result<Vec<f64>, DataError> {
    let mut row = Vec::with_capacity(FeatureSchema::N_FEATURES);
    for column in &NUMERIC_COLUMNS {
        row.push((column.get)(record).unwrap_or(column.default));
    }
    let gender_code = match record.gender {
        Some(g) => gender.code(g.as_str())?,
        None => gender.first_code()?,
    };
    row.push(gender_code as f64);
    let smoking_code = match record.smoking_status {
        Some(s) => smoking.code(s.as_str())?,
        None => smoking.first_code()?,
    };
    row.push(smoking_code as f64);
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, SmokingStatus};
    use crate::synth::SynthConfig;

    fn fitted() -> FittedEncoder {
        let table = SynthConfig::new(200).unwrap().with_seed(42).generate();
        FeatureEncoder::fit(table.records()).unwrap()
    }

    #[test]
    fn empty_fit_rejected() {
        assert!(matches!(
            FeatureEncoder::fit(&[]),
            Err(DataError::EmptyFit)
        ));
    }

    #[test]
    fn encode_is_idempotent() {
        let encoder = fitted();
        let record = PatientRecord {
            age: Some(68.0),
            gender: Some(Gender::Female),
            smoking_status: Some(SmokingStatus::Former),
            bmi: Some(26.5),
            ..PatientRecord::default()
        };
        let first = encoder.encode(&record).unwrap();
        let second = encoder.encode(&record).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_category_detected() {
        // Fit on records that only ever saw Never — Current is then unseen.
        let records: Vec<PatientRecord> = (0..10)
            .map(|i| PatientRecord {
                age: Some(40.0 + i as f64),
                gender: Some(Gender::Male),
                smoking_status: Some(SmokingStatus::Never),
                ..PatientRecord::default()
            })
            .collect();
        let encoder = FeatureEncoder::fit(&records).unwrap();

        let unseen = PatientRecord {
            smoking_status: Some(SmokingStatus::Current),
            gender: Some(Gender::Male),
            ..PatientRecord::default()
        };
        let err = encoder.encode(&unseen).unwrap_err();
        assert!(matches!(
            err,
            DataError::UnknownCategory { column: "smoking_status", .. }
        ));
    }

    #[test]
    fn missing_numeric_uses_schema_default() {
        let encoder = fitted();
        let sparse = PatientRecord {
            gender: Some(Gender::Male),
            smoking_status: Some(SmokingStatus::Never),
            ..PatientRecord::default()
        };
        let explicit = PatientRecord {
            age: Some(65.0),
            bmi: Some(25.0),
            family_history: Some(0.0),
            blood_pressure: Some(120.0),
            cholesterol: Some(200.0),
            glucose: Some(100.0),
            white_blood_cells: Some(7.0),
            platelet_count: Some(250.0),
            hemoglobin: Some(14.0),
            symptom_count: Some(3.0),
            fatigue_level: Some(3.0),
            pain_level: Some(3.0),
            weight_loss: Some(0.0),
            night_sweats: Some(0.0),
            appetite_loss: Some(0.0),
            gender: Some(Gender::Male),
            smoking_status: Some(SmokingStatus::Never),
            name: None,
        };
        assert_eq!(
            encoder.encode(&sparse).unwrap(),
            encoder.encode(&explicit).unwrap()
        );
    }

    #[test]
    fn missing_categorical_uses_first_category() {
        let encoder = fitted();
        let missing = PatientRecord::default();
        // Sorted categories: Female < Male, Current < Former < Never.
        let first = PatientRecord {
            gender: Some(Gender::Female),
            smoking_status: Some(SmokingStatus::Current),
            ..PatientRecord::default()
        };
        assert_eq!(
            encoder.encode(&missing).unwrap(),
            encoder.encode(&first).unwrap()
        );
    }

    #[test]
    fn training_columns_scaled_to_unit_variance() {
        let table = SynthConfig::new(500).unwrap().with_seed(42).generate();
        let encoder = FeatureEncoder::fit(table.records()).unwrap();
        let encoded = encoder.encode_batch(table.records()).unwrap();

        let n = encoded.len() as f64;
        for col in 0..encoder.n_features() {
            let mean: f64 = encoded.iter().map(|row| row[col]).sum::<f64>() / n;
            let var: f64 = encoded
                .iter()
                .map(|row| (row[col] - mean).powi(2))
                .sum::<f64>()
                / n;
            assert!(mean.abs() < 1e-9, "column {col} mean {mean}");
            assert!((var - 1.0).abs() < 1e-9, "column {col} variance {var}");
        }
    }

    #[test]
    fn constant_column_encodes_finite() {
        // family_history identical in every record — zero variance.
        let records: Vec<PatientRecord> = (0..20)
            .map(|i| PatientRecord {
                age: Some(30.0 + i as f64),
                gender: Some(if i % 2 == 0 { Gender::Male } else { Gender::Female }),
                smoking_status: Some(SmokingStatus::Never),
                family_history: Some(1.0),
                ..PatientRecord::default()
            })
            .collect();
        let encoder = FeatureEncoder::fit(&records).unwrap();
        for value in encoder.encode(&records[0]).unwrap() {
            assert!(value.is_finite());
        }
    }

    #[test]
    fn feature_names_match_schema() {
        let encoder = fitted();
        assert_eq!(encoder.feature_names(), FeatureSchema::feature_names());
        assert_eq!(encoder.n_features(), FeatureSchema::N_FEATURES);
    }
}
