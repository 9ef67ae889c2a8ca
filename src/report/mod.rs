//! Reporting utilities: result view derivation and formatted terminal output.
//!
//! Front-ends (console and TUI) only decide *where* text goes; *what* is shown
//! is computed here.

use serde::Serialize;

use crate::domain::{PredictionResult, RiskLevel};

pub mod format;

pub use format::*;

pub const APPROVED_LABEL: &str = "Approved";

pub const APPROVED_RECOMMENDATION: &str =
    "Your loan application looks good! Consider maintaining your credit score.";
pub const REJECTED_RECOMMENDATION: &str =
    "Consider improving your credit score and reducing existing debts.";

/// Everything needed to render a decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub prediction: String,
    pub approved: bool,
    pub probability: f64,
    /// Probability as a percentage with two decimals, without the `%` sign.
    pub probability_pct: String,
    pub risk: RiskLevel,
    pub recommendation: &'static str,
}

impl ResultView {
    pub fn from_result(result: &PredictionResult) -> Self {
        let approved = result.prediction == APPROVED_LABEL;
        Self {
            prediction: result.prediction.clone(),
            approved,
            probability: result.probability,
            probability_pct: format!("{:.2}", result.probability * 100.0),
            risk: RiskLevel::from_probability(result.probability),
            recommendation: if approved {
                APPROVED_RECOMMENDATION
            } else {
                REJECTED_RECOMMENDATION
            },
        }
    }
}
