use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use oncoscope_data::{CancerType, PatientRecord};
use oncoscope_explain::{explain_or_fallback, Explanation, TemplateGenerator};
use oncoscope_service::{
    PredictionResult, PredictionService, ReportWriter, RunName, TrainedModel, TrainingConfig,
};

#[derive(Parser)]
#[command(name = "oncoscope")]
#[command(about = "Cancer-type prediction demo on synthetic patient data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// RNG seed for reproducibility
    #[arg(long, default_value_t = 42, global = true)]
    seed: u64,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Shared training parameters.
#[derive(Args, Debug, Clone)]
struct TrainingArgs {
    /// Number of synthetic patients to generate
    #[arg(long, default_value_t = 1000)]
    n_samples: usize,

    /// Number of trees in the Random Forest
    #[arg(long, default_value_t = 100)]
    n_trees: usize,

    /// Maximum tree depth
    #[arg(long, default_value_t = 10)]
    max_depth: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Train on a fresh synthetic dataset and report holdout metrics
    Train {
        /// Run name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        run: Option<String>,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        #[command(flatten)]
        training: TrainingArgs,
    },

    /// Train in-process, then predict the cancer type for one patient
    Predict {
        /// Path to the patient record JSON file
        #[arg(long)]
        patient: PathBuf,

        /// Number of top classes to include in the output
        #[arg(long, default_value_t = 3)]
        top_k: usize,

        /// Run name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        run: Option<String>,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        #[command(flatten)]
        training: TrainingArgs,
    },

    /// Predict and render a full clinical explanation for one patient
    Explain {
        /// Path to the patient record JSON file
        #[arg(long)]
        patient: PathBuf,

        #[command(flatten)]
        training: TrainingArgs,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct TrainOutput {
    n_samples: usize,
    n_train: usize,
    n_test: usize,
    n_trees: usize,
    holdout_accuracy: f64,
    macro_f1: f64,
    class_metrics: Vec<ClassMetricOutput>,
}

#[derive(Serialize)]
struct ClassMetricOutput {
    class: String,
    precision: f64,
    recall: f64,
    f1: f64,
    support: usize,
}

#[derive(Serialize)]
struct PredictOutput {
    patient: String,
    label: CancerType,
    confidence: f64,
    confidence_interpretation: &'static str,
    top_predictions: Vec<TopPrediction>,
}

#[derive(Serialize)]
struct TopPrediction {
    label: CancerType,
    probability: f64,
}

#[derive(Serialize)]
struct ExplainOutput {
    patient: String,
    label: CancerType,
    confidence: f64,
    #[serde(flatten)]
    explanation: Explanation,
}

fn train_model(seed: u64, training: &TrainingArgs) -> Result<TrainedModel> {
    let model = TrainingConfig::new()
        .with_n_samples(training.n_samples)
        .with_n_trees(training.n_trees)
        .with_max_depth(Some(training.max_depth))
        .with_seed(seed)
        .train()
        .context("training failed")?;
    info!(
        accuracy = model.evaluation().holdout_accuracy,
        n_trees = training.n_trees,
        "model trained"
    );
    Ok(model)
}

fn load_patient(path: &PathBuf) -> Result<PatientRecord> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read patient file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse patient JSON {}", path.display()))
}

fn top_k_predictions(result: &PredictionResult, top_k: usize) -> Vec<TopPrediction> {
    let mut ranked: Vec<TopPrediction> = result
        .probabilities
        .iter()
        .map(|p| TopPrediction {
            label: p.label,
            probability: p.probability,
        })
        .collect();
    ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    ranked.truncate(top_k);
    ranked
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Train {
            run,
            output_dir,
            training,
        } => {
            let model = train_model(cli.seed, &training)?;
            let evaluation = model.evaluation();

            if let Some(run) = run {
                let writer = ReportWriter::new(&output_dir, RunName::new(run)?)?;
                writer.write_evaluation(evaluation)?;
            }

            let output = TrainOutput {
                n_samples: training.n_samples,
                n_train: evaluation.n_train,
                n_test: evaluation.n_test,
                n_trees: training.n_trees,
                holdout_accuracy: evaluation.holdout_accuracy,
                macro_f1: evaluation.confusion_matrix.macro_f1(),
                class_metrics: evaluation
                    .confusion_matrix
                    .class_metrics()
                    .into_iter()
                    .map(|m| ClassMetricOutput {
                        class: m.name,
                        precision: m.precision,
                        recall: m.recall,
                        f1: m.f1,
                        support: m.support,
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Predict {
            patient,
            top_k,
            run,
            output_dir,
            training,
        } => {
            let record = load_patient(&patient)?;

            // Current behavior trains per invocation; the snapshot keeps the
            // encoder and forest fitted together.
            let model = train_model(cli.seed, &training)?;
            let service = PredictionService::new();
            service.install(model.into_snapshot());

            let result = service
                .predict(&record)
                .context("prediction failed")?;
            info!(label = %result.label, confidence = result.confidence, "prediction complete");

            if let Some(run) = run {
                let writer = ReportWriter::new(&output_dir, RunName::new(run)?)?;
                writer.write_prediction(record.display_name(), &result)?;
            }

            let output = PredictOutput {
                patient: record.display_name().to_string(),
                label: result.label,
                confidence: result.confidence,
                confidence_interpretation: oncoscope_explain::interpret_confidence(
                    result.confidence,
                ),
                top_predictions: top_k_predictions(&result, top_k),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Explain { patient, training } => {
            let record = load_patient(&patient)?;

            let model = train_model(cli.seed, &training)?;
            let result = model
                .snapshot()
                .predict(&record)
                .context("prediction failed")?;
            info!(label = %result.label, confidence = result.confidence, "prediction complete");

            let explanation = explain_or_fallback(
                &TemplateGenerator,
                &record,
                result.label.as_str(),
                result.confidence,
            )
            .context("explanation rendering failed")?;

            let output = ExplainOutput {
                patient: record.display_name().to_string(),
                label: result.label,
                confidence: result.confidence,
                explanation,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
