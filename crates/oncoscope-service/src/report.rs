//! JSON artifact writer for training and prediction runs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::ServiceError;
use crate::pipeline::ModelEvaluation;
use crate::result::PredictionResult;

/// A validated run name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunName(String);

impl RunName {
    /// Parse and validate a run name.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidRunName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, ServiceError> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ServiceError::InvalidRunName { name });
        }
        Ok(Self(name))
    }

    /// Return the run name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Writes evaluation and prediction artifacts to JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{run}_evaluate.json` and `{run}_predict.json`.
pub struct ReportWriter {
    output_dir: PathBuf,
    run: RunName,
}

impl ReportWriter {
    /// Create a new writer targeting the given directory and run name.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::OutputDirCreate`] if the directory cannot be
    /// created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), run = %run))]
    pub fn new(output_dir: &Path, run: RunName) -> Result<Self, ServiceError> {
        fs::create_dir_all(output_dir).map_err(|e| ServiceError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            run,
        })
    }

    /// Write a training evaluation to `{run}_evaluate.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all)]
    pub fn write_evaluation(&self, evaluation: &ModelEvaluation) -> Result<(), ServiceError> {
        let path = self
            .output_dir
            .join(format!("{}_evaluate.json", self.run.as_str()));

        let class_metrics: Vec<ClassEntry> = evaluation
            .confusion_matrix
            .class_metrics()
            .iter()
            .map(|m| ClassEntry {
                class: m.name.clone(),
                precision: m.precision,
                recall: m.recall,
                f1: m.f1,
                support: m.support,
            })
            .collect();

        let n = evaluation.confusion_matrix.class_names().len();
        let confusion_matrix: Vec<Vec<usize>> = (0..n)
            .map(|t| evaluation.confusion_matrix.row(t).to_vec())
            .collect();

        let artifact = EvaluateArtifact {
            run: self.run.as_str(),
            n_train: evaluation.n_train,
            n_test: evaluation.n_test,
            holdout_accuracy: evaluation.holdout_accuracy,
            macro_f1: evaluation.confusion_matrix.macro_f1(),
            classes: evaluation.confusion_matrix.class_names(),
            confusion_matrix,
            class_metrics,
        };

        self.write_json(&path, &artifact)?;
        info!(path = %path.display(), "evaluation written");
        Ok(())
    }

    /// Write a prediction to `{run}_predict.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all)]
    pub fn write_prediction(
        &self,
        patient_name: &str,
        result: &PredictionResult,
    ) -> Result<(), ServiceError> {
        let path = self
            .output_dir
            .join(format!("{}_predict.json", self.run.as_str()));

        let artifact = PredictArtifact {
            run: self.run.as_str(),
            patient: patient_name,
            result,
        };

        self.write_json(&path, &artifact)?;
        info!(path = %path.display(), "prediction written");
        Ok(())
    }

    fn write_json<T: Serialize>(&self, path: &Path, artifact: &T) -> Result<(), ServiceError> {
        let json = serde_json::to_string_pretty(artifact).expect("serialization cannot fail");
        fs::write(path, &json).map_err(|e| ServiceError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

// --- Shadow structs for JSON serialization ---

#[derive(Serialize)]
struct EvaluateArtifact<'a> {
    run: &'a str,
    n_train: usize,
    n_test: usize,
    holdout_accuracy: f64,
    macro_f1: f64,
    classes: &'a [String],
    confusion_matrix: Vec<Vec<usize>>,
    class_metrics: Vec<ClassEntry>,
}

#[derive(Serialize)]
struct ClassEntry {
    class: String,
    precision: f64,
    recall: f64,
    f1: f64,
    support: usize,
}

#[derive(Serialize)]
struct PredictArtifact<'a> {
    run: &'a str,
    patient: &'a str,
    result: &'a PredictionResult,
}

#[cfg(test)]
mod tests {
    use oncoscope_data::Gender;
    use oncoscope_data::PatientRecord;
    use tempfile::TempDir;

    use super::*;
    use crate::pipeline::TrainingConfig;

    fn small_model() -> crate::pipeline::TrainedModel {
        TrainingConfig::new()
            .with_n_samples(200)
            .with_n_trees(10)
            .train()
            .unwrap()
    }

    #[test]
    fn write_evaluation_json_structure() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(dir.path(), RunName::new("demo_run".into()).unwrap()).unwrap();

        let model = small_model();
        writer.write_evaluation(model.evaluation()).unwrap();

        let path = dir.path().join("demo_run_evaluate.json");
        assert!(path.exists());

        let content: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(content["run"], "demo_run");
        assert!(content["holdout_accuracy"].is_number());
        assert_eq!(content["classes"].as_array().unwrap().len(), 8);
        assert_eq!(content["confusion_matrix"].as_array().unwrap().len(), 8);
        assert_eq!(content["class_metrics"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn write_prediction_json_structure() {
        let dir = TempDir::new().unwrap();
        let writer =
            ReportWriter::new(dir.path(), RunName::new("pred_run".into()).unwrap()).unwrap();

        let model = small_model();
        let patient = PatientRecord {
            name: Some("Jane Doe".to_string()),
            age: Some(70.0),
            gender: Some(Gender::Female),
            ..PatientRecord::default()
        };
        let result = model.snapshot().predict(&patient).unwrap();
        writer.write_prediction(patient.display_name(), &result).unwrap();

        let path = dir.path().join("pred_run_predict.json");
        let content: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(content["patient"], "Jane Doe");
        assert!(content["result"]["label"].is_string());
        assert_eq!(
            content["result"]["top_predictions"].as_array().unwrap().len(),
            3
        );
    }

    #[test]
    fn writer_creates_nested_output_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested").join("deep");
        let writer =
            ReportWriter::new(&nested, RunName::new("nested_run".into()).unwrap()).unwrap();

        let model = small_model();
        writer.write_evaluation(model.evaluation()).unwrap();
        assert!(nested.join("nested_run_evaluate.json").exists());
    }

    #[test]
    fn invalid_run_name_rejected() {
        assert!(matches!(
            RunName::new("bad name!".into()),
            Err(ServiceError::InvalidRunName { .. })
        ));
        assert!(matches!(
            RunName::new(String::new()),
            Err(ServiceError::InvalidRunName { .. })
        ));
    }
}
