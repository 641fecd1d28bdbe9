//! Seeded synthetic patient generation and the label cascade.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, Poisson};
use tracing::{debug, info, instrument};

use crate::domain::{CancerType, Gender, PatientRecord, SmokingStatus, TrainingTable};
use crate::error::DataError;
use crate::schema::FeatureSchema;

/// Configuration for synthetic dataset generation.
///
/// Construct via [`SynthConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter   | Default |
/// |-------------|---------|
/// | `seed`      | 42      |
#[derive(Debug, Clone)]
pub struct SynthConfig {
    n_samples: usize,
    seed: u64,
}

impl SynthConfig {
    /// Create a new config for `n_samples` rows.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::EmptySample`] if `n_samples` is zero.
    pub fn new(n_samples: usize) -> Result<Self, DataError> {
        if n_samples == 0 {
            return Err(DataError::EmptySample);
        }
        Ok(Self { n_samples, seed: 42 })
    }

    /// Set the random seed for reproducibility.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Return the configured sample count.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Return the random seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate the labeled training table.
    ///
    /// Each column is drawn independently with fixed parameters, then every
    /// row receives exactly one label from the cascade in [`assign_label`].
    /// Deterministic for a fixed `(n_samples, seed)` pair.
    #[instrument(skip_all, fields(n_samples = self.n_samples, seed = self.seed))]
    pub fn generate(&self) -> TrainingTable {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let n = self.n_samples;

        // Column-wise independent draws, matching the schema's column set.
        let ages = sample_normal(&mut rng, 65.0, 15.0, n);
        let genders: Vec<Gender> = (0..n)
            .map(|_| {
                if rng.gen_range(0..2) == 0 {
                    Gender::Male
                } else {
                    Gender::Female
                }
            })
            .collect();
        let bmis = sample_normal(&mut rng, 25.0, 5.0, n);
        let smoking: Vec<SmokingStatus> = (0..n)
            .map(|_| match rng.gen_range(0..3) {
                0 => SmokingStatus::Never,
                1 => SmokingStatus::Former,
                _ => SmokingStatus::Current,
            })
            .collect();
        let family_history = sample_flags(&mut rng, n);
        let blood_pressure = sample_normal(&mut rng, 120.0, 20.0, n);
        let cholesterol = sample_normal(&mut rng, 200.0, 40.0, n);
        let glucose = sample_normal(&mut rng, 100.0, 20.0, n);
        let white_blood_cells = sample_normal(&mut rng, 7.0, 2.0, n);
        let platelet_count = sample_normal(&mut rng, 250.0, 50.0, n);
        let hemoglobin = sample_normal(&mut rng, 14.0, 2.0, n);
        let symptom_count = sample_poisson(&mut rng, 3.0, n);
        let fatigue_level: Vec<f64> = (0..n).map(|_| rng.gen_range(1..=5) as f64).collect();
        let pain_level: Vec<f64> = (0..n).map(|_| rng.gen_range(1..=5) as f64).collect();
        let weight_loss = sample_flags(&mut rng, n);
        let night_sweats = sample_flags(&mut rng, n);
        let appetite_loss = sample_flags(&mut rng, n);

        let mut records = Vec::with_capacity(n);
        let mut labels = Vec::with_capacity(n);
        for i in 0..n {
            let record = PatientRecord {
                name: None,
                age: Some(ages[i]),
                gender: Some(genders[i]),
                bmi: Some(bmis[i]),
                smoking_status: Some(smoking[i]),
                family_history: Some(family_history[i]),
                blood_pressure: Some(blood_pressure[i]),
                cholesterol: Some(cholesterol[i]),
                glucose: Some(glucose[i]),
                white_blood_cells: Some(white_blood_cells[i]),
                platelet_count: Some(platelet_count[i]),
                hemoglobin: Some(hemoglobin[i]),
                symptom_count: Some(symptom_count[i]),
                fatigue_level: Some(fatigue_level[i]),
                pain_level: Some(pain_level[i]),
                weight_loss: Some(weight_loss[i]),
                night_sweats: Some(night_sweats[i]),
                appetite_loss: Some(appetite_loss[i]),
            };
            labels.push(assign_label(&record));
            records.push(record);
        }

        debug!(n_rows = records.len(), "rows sampled and labeled");
        info!(
            n_samples = n,
            n_features = FeatureSchema::N_FEATURES,
            "synthetic training table generated"
        );
        TrainingTable::new(records, labels)
    }
}

fn sample_normal(rng: &mut ChaCha8Rng, mean: f64, std: f64, n: usize) -> Vec<f64> {
    let dist = Normal::new(mean, std).expect("fixed distribution parameters are valid");
    (0..n).map(|_| dist.sample(rng)).collect()
}

fn sample_poisson(rng: &mut ChaCha8Rng, lambda: f64, n: usize) -> Vec<f64> {
    let dist = Poisson::new(lambda).expect("fixed distribution parameters are valid");
    (0..n).map(|_| dist.sample(rng)).collect()
}

fn sample_flags(rng: &mut ChaCha8Rng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.gen_range(0..2) as f64).collect()
}

/// Assign a cancer-type label to a record via the ordered rule cascade.
///
/// First matching rule wins; the final rule is a catch-all, so every record
/// receives exactly one label. Missing attributes take the schema defaults.
/// The rules are an arbitrary demonstration heuristic, not a medical model —
/// their *order* is the contract.
#[must_use]
pub fn assign_label(record: &PatientRecord) -> CancerType {
    let age = record.age.unwrap_or(65.0);
    let family_history = record.family_history.unwrap_or(0.0);
    let symptom_count = record.symptom_count.unwrap_or(3.0);
    let fatigue_level = record.fatigue_level.unwrap_or(3.0);
    let weight_loss = record.weight_loss.unwrap_or(0.0);
    let appetite_loss = record.appetite_loss.unwrap_or(0.0);
    let smokes = matches!(
        record.smoking_status,
        Some(SmokingStatus::Current) | Some(SmokingStatus::Former)
    );

    if record.gender == Some(Gender::Female) && age > 50.0 {
        CancerType::Breast
    } else if smokes && age > 60.0 {
        CancerType::Lung
    } else if age > 70.0 && family_history >= 1.0 {
        CancerType::Colon
    } else if record.gender == Some(Gender::Male) && age > 60.0 {
        CancerType::Prostate
    } else if symptom_count > 4.0 && fatigue_level > 3.0 {
        CancerType::Leukemia
    } else if record.gender == Some(Gender::Female) && age > 45.0 {
        CancerType::Ovarian
    } else if weight_loss >= 1.0 && appetite_loss >= 1.0 {
        CancerType::Pancreatic
    } else {
        CancerType::Melanoma
    }
}
