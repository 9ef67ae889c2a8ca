//! Domain types used throughout the submission flow.
//!
//! This module defines:
//!
//! - raw form input (`FormFields`)
//! - the service payload and response (`PredictionRequest`, `PredictionResult`)
//! - derived classifications (`Education`, `PriorDefaults`, `RiskLevel`)

pub mod types;

pub use types::*;
