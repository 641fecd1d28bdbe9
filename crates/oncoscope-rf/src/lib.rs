//! Multi-class Random Forest classification.
//!
//! CART decision trees with Gini/entropy split criteria, bootstrap
//! aggregation, per-split feature subsampling, parallel training via rayon,
//! and averaged class-probability prediction. Evaluation helpers provide a
//! confusion matrix with per-class precision/recall/F1.

mod config;
mod confusion;
mod error;
mod forest;
mod predict;
mod split;
mod tree;

pub use config::{MaxFeatures, RandomForestConfig};
pub use confusion::{ClassMetrics, ConfusionMatrix};
pub use error::RfError;
pub use forest::RandomForest;
pub use predict::ClassDistribution;
pub use split::SplitCriterion;
