//! Formatted terminal output for decisions and errors.

use crate::error::SubmitError;
use crate::report::ResultView;

pub const ERROR_PREFIX: &str = "Error: ";

/// Glyph for a risk label; unknown labels get a question mark.
pub fn risk_glyph(label: &str) -> &'static str {
    match label.to_ascii_lowercase().as_str() {
        "low" => "🟢",
        "medium" => "🟡",
        "high" => "🔴",
        _ => "❓",
    }
}

pub fn approval_glyph(approved: bool) -> &'static str {
    if approved { "✅" } else { "❌" }
}

/// Format a decision as four labelled lines.
pub fn format_result(view: &ResultView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} Prediction: {}\n",
        approval_glyph(view.approved),
        view.prediction
    ));
    out.push_str(&format!("📊 Approval Probability: {}%\n", view.probability_pct));
    out.push_str(&format!(
        "{} Risk Level: {}\n",
        risk_glyph(view.risk.label()),
        view.risk.label()
    ));
    out.push_str(&format!("💡 Recommendation: {}", view.recommendation));
    out
}

pub fn format_error(err: &SubmitError) -> String {
    format!("{ERROR_PREFIX}{err}")
}
