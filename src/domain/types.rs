//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - filled in from the terminal form or from CLI flags
//! - sent to the prediction service as JSON
//! - rendered back to the user

use serde::{Deserialize, Serialize};

/// Fixed interest rate sent with every application.
pub const LOAN_INT_RATE: f64 = 11.5;

/// More existing loans than this are reported as previous defaults.
pub const DEFAULTS_LOAN_THRESHOLD: i32 = 2;

/// Raw values exactly as the user typed or picked them.
///
/// Nothing here is parsed or validated; see `form::build_request`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub age: String,
    pub gender: String,
    pub education: String,
    pub income: String,
    pub employment_years: String,
    pub home_ownership: String,
    pub loan_amount: String,
    pub loan_purpose: String,
    pub credit_score: String,
    pub existing_loans: String,
}

/// Education level as understood by the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Education {
    #[serde(rename = "High School")]
    HighSchool,
    Bachelor,
    Master,
    Doctor,
}

impl Education {
    /// Map a raw form value to an education level.
    ///
    /// Unknown values (including blanks) resolve to `Bachelor`.
    pub fn from_form_value(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high_school" => Education::HighSchool,
            "bachelor" => Education::Bachelor,
            "master" => Education::Master,
            "phd" => Education::Doctor,
            _ => Education::Bachelor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Education::HighSchool => "High School",
            Education::Bachelor => "Bachelor",
            Education::Master => "Master",
            Education::Doctor => "Doctor",
        }
    }
}

/// Whether the applicant has previous loan defaults on file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriorDefaults {
    Yes,
    No,
}

impl PriorDefaults {
    pub fn from_existing_loans(existing_loans: i32) -> Self {
        if existing_loans > DEFAULTS_LOAN_THRESHOLD {
            PriorDefaults::Yes
        } else {
            PriorDefaults::No
        }
    }
}

/// JSON payload posted to `/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub person_age: i32,
    pub person_gender: String,
    pub person_education: Education,
    pub person_income: f64,
    pub person_emp_exp: i32,
    pub person_home_ownership: String,
    pub loan_amnt: f64,
    pub loan_intent: String,
    pub loan_int_rate: f64,
    pub loan_percent_income: f64,
    pub cb_person_cred_hist_length: i32,
    pub credit_score: i32,
    pub previous_loan_defaults_on_file: PriorDefaults,
}

impl PredictionRequest {
    /// The sample application documented by the prediction service.
    pub fn example() -> Self {
        Self {
            person_age: 28,
            person_gender: "male".to_string(),
            person_education: Education::Bachelor,
            person_income: 550_000.0,
            person_emp_exp: 4,
            person_home_ownership: "RENT".to_string(),
            loan_amnt: 120_000.0,
            loan_intent: "EDUCATION".to_string(),
            loan_int_rate: LOAN_INT_RATE,
            loan_percent_income: 0.22,
            cb_person_cred_hist_length: 6,
            credit_score: 720,
            previous_loan_defaults_on_file: PriorDefaults::No,
        }
    }
}

/// Successful response body from `/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: String,
    pub probability: f64,
}

/// Three-tier risk classification derived from the approval probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Strictly greater-than at both cut points: 0.7 is Medium, 0.4 is High.
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.7 {
            RiskLevel::Low
        } else if probability > 0.4 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Values offered by the choice fields of the terminal form.
///
/// These are the categories the prediction service knows how to encode.
pub const GENDER_CHOICES: [&str; 2] = ["male", "female"];
pub const EDUCATION_CHOICES: [&str; 4] = ["high_school", "bachelor", "master", "phd"];
pub const HOME_OWNERSHIP_CHOICES: [&str; 3] = ["rent", "own", "mortgage"];
pub const LOAN_PURPOSE_CHOICES: [&str; 5] = ["personal", "education", "medical", "venture", "home"];
