//! Payload builder.
//!
//! Text fields are trimmed; home ownership and loan intent are upper-cased the
//! way the service's encoders expect. A numeric field that does not parse is
//! treated like any other invalid value, except existing loans, which only
//! feeds the prior-defaults flag.

use crate::domain::{
    Education, FormFields, PredictionRequest, PriorDefaults, LOAN_INT_RATE,
};
use crate::error::SubmitError;
use crate::form::validate::validate_request;

/// Build and validate the request for one submission.
pub fn prepare_request(fields: &FormFields) -> Result<PredictionRequest, SubmitError> {
    let request = build_request(fields)?;
    validate_request(&request)?;
    Ok(request)
}

/// Build the service payload, including the derived fields.
///
/// Only parsing happens here; range checks live in `validate_request`.
pub fn build_request(fields: &FormFields) -> Result<PredictionRequest, SubmitError> {
    let person_age = parse_int(&fields.age)?;
    let person_income = parse_float(&fields.income)?;
    let employment_years = parse_int(&fields.employment_years)?;
    let loan_amnt = parse_float(&fields.loan_amount)?;
    let credit_score = parse_int(&fields.credit_score)?;
    // Not part of the validity contract: blank or garbage counts as no loans.
    let prior_defaults = parse_int(&fields.existing_loans)
        .map(PriorDefaults::from_existing_loans)
        .unwrap_or(PriorDefaults::No);

    Ok(PredictionRequest {
        person_age,
        person_gender: fields.gender.trim().to_string(),
        person_education: Education::from_form_value(&fields.education),
        person_income,
        person_emp_exp: employment_years,
        person_home_ownership: fields.home_ownership.trim().to_uppercase(),
        loan_amnt,
        loan_intent: fields.loan_purpose.trim().to_uppercase(),
        loan_int_rate: LOAN_INT_RATE,
        loan_percent_income: loan_amnt / person_income,
        cb_person_cred_hist_length: employment_years,
        credit_score,
        previous_loan_defaults_on_file: prior_defaults,
    })
}

fn parse_int(raw: &str) -> Result<i32, SubmitError> {
    raw.trim().parse::<i32>().map_err(|_| SubmitError::Validation)
}

fn parse_float(raw: &str) -> Result<f64, SubmitError> {
    let value = raw.trim().parse::<f64>().map_err(|_| SubmitError::Validation)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SubmitError::Validation)
    }
}
