//! Patient domain types, synthetic dataset generation, and feature encoding.
//!
//! Provides the seeded synthetic patient generator with its rule-based label
//! cascade, the named-column feature schema, and the categorical/standard-
//! scaling encoder that must be fitted once and reused unchanged between
//! training and inference.

mod domain;
mod encode;
mod error;
mod schema;
mod split;
mod synth;

pub use domain::{CancerType, Gender, PatientRecord, SmokingStatus, TrainingTable};
pub use encode::{FeatureEncoder, FittedEncoder};
pub use error::DataError;
pub use schema::FeatureSchema;
pub use split::{stratified_split, HoldoutSplit};
pub use synth::{assign_label, SynthConfig};
