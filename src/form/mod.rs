//! Turning raw form input into a service payload.
//!
//! - parsing + derived fields (`payload`)
//! - the validity contract checked before any network call (`validate`)

pub mod payload;
pub mod validate;

pub use payload::*;
pub use validate::*;

/// A fully valid application used across tests.
#[cfg(test)]
pub(crate) fn sample_form() -> crate::domain::FormFields {
    crate::domain::FormFields {
        age: "30".to_string(),
        gender: "male".to_string(),
        education: "master".to_string(),
        income: "50000".to_string(),
        employment_years: "5".to_string(),
        home_ownership: "rent".to_string(),
        loan_amount: "10000".to_string(),
        loan_purpose: "personal".to_string(),
        credit_score: "700".to_string(),
        existing_loans: "1".to_string(),
    }
}
