//! Clinical explanation formatting for cancer-type predictions.
//!
//! A static knowledge table supplies per-cancer-type background (description,
//! risk factors, recommended tests, specialists). The formatter renders a
//! three-section patient letter from that table plus the patient's own
//! attributes, with confidence bands interpreting the classifier's score.
//! External text generation is a port ([`TextGenerator`]); the template
//! renderer is the mandatory local implementation, and external failures
//! degrade to it.

mod backend;
mod error;
mod formatter;
mod knowledge;

pub use backend::{explain_or_fallback, TextGenerator};
pub use error::ExplainError;
pub use formatter::{interpret_confidence, Explanation, TemplateGenerator};
pub use knowledge::{info, lookup, CancerInfo};
