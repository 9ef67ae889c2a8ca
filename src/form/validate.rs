use crate::domain::PredictionRequest;
use crate::error::SubmitError;

pub const AGE_RANGE: std::ops::RangeInclusive<i32> = 18..=100;
pub const CREDIT_SCORE_RANGE: std::ops::RangeInclusive<i32> = 0..=850;

/// Check the request against the validity contract.
///
/// All checks must hold; any failure yields `SubmitError::Validation`.
pub fn validate_request(request: &PredictionRequest) -> Result<(), SubmitError> {
    if is_valid(request) {
        Ok(())
    } else {
        Err(SubmitError::Validation)
    }
}

pub fn is_valid(request: &PredictionRequest) -> bool {
    !request.person_gender.is_empty()
        && AGE_RANGE.contains(&request.person_age)
        && !request.person_education.label().is_empty()
        && request.person_emp_exp >= 0
        && request.person_income > 0.0
        && !request.person_home_ownership.is_empty()
        && CREDIT_SCORE_RANGE.contains(&request.credit_score)
        && request.loan_amnt > 0.0
        && !request.loan_intent.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{build_request, sample_form};

    fn valid_request() -> PredictionRequest {
        build_request(&sample_form()).unwrap()
    }

    #[test]
    fn sample_application_is_valid() {
        assert_eq!(validate_request(&valid_request()), Ok(()));
    }

    #[test]
    fn age_bounds_are_inclusive() {
        for age in [-1, 0, 17, 101, 150] {
            let request = PredictionRequest { person_age: age, ..valid_request() };
            assert!(!is_valid(&request), "age {age} should be rejected");
        }
        for age in [18, 45, 100] {
            let request = PredictionRequest { person_age: age, ..valid_request() };
            assert!(is_valid(&request), "age {age} should be accepted");
        }
    }

    #[test]
    fn credit_score_bounds_are_inclusive() {
        for score in [-1, 851, 1000] {
            let request = PredictionRequest { credit_score: score, ..valid_request() };
            assert!(!is_valid(&request), "credit score {score} should be rejected");
        }
        for score in [0, 425, 850] {
            let request = PredictionRequest { credit_score: score, ..valid_request() };
            assert!(is_valid(&request), "credit score {score} should be accepted");
        }
    }

    #[test]
    fn amounts_must_be_positive() {
        let zero_income = PredictionRequest { person_income: 0.0, ..valid_request() };
        assert!(!is_valid(&zero_income));

        let negative_loan = PredictionRequest { loan_amnt: -5.0, ..valid_request() };
        assert!(!is_valid(&negative_loan));

        let negative_experience = PredictionRequest { person_emp_exp: -1, ..valid_request() };
        assert!(!is_valid(&negative_experience));

        let no_experience = PredictionRequest { person_emp_exp: 0, ..valid_request() };
        assert!(is_valid(&no_experience));
    }

    #[test]
    fn blank_text_fields_are_rejected() {
        let mut form = sample_form();
        form.gender = "   ".to_string();
        assert!(!is_valid(&build_request(&form).unwrap()));

        let mut form = sample_form();
        form.home_ownership = String::new();
        assert!(!is_valid(&build_request(&form).unwrap()));

        let mut form = sample_form();
        form.loan_purpose = String::new();
        assert_eq!(validate_request(&build_request(&form).unwrap()), Err(SubmitError::Validation));
    }
}
