//! Form field model for the terminal UI.
//!
//! Text fields hold whatever was typed. Choice fields cycle through a fixed
//! list that starts with an empty "(select)" entry, like an unselected
//! dropdown.

use crate::domain::{
    FormFields, EDUCATION_CHOICES, GENDER_CHOICES, HOME_OWNERSHIP_CHOICES, LOAN_PURPOSE_CHOICES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Age,
    Gender,
    Education,
    Income,
    EmploymentYears,
    HomeOwnership,
    LoanAmount,
    LoanPurpose,
    CreditScore,
    ExistingLoans,
}

impl FieldId {
    pub const ALL: [FieldId; 10] = [
        FieldId::Age,
        FieldId::Gender,
        FieldId::Education,
        FieldId::Income,
        FieldId::EmploymentYears,
        FieldId::HomeOwnership,
        FieldId::LoanAmount,
        FieldId::LoanPurpose,
        FieldId::CreditScore,
        FieldId::ExistingLoans,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FieldId::Age => "Age",
            FieldId::Gender => "Gender",
            FieldId::Education => "Education",
            FieldId::Income => "Annual income",
            FieldId::EmploymentYears => "Employment years",
            FieldId::HomeOwnership => "Home ownership",
            FieldId::LoanAmount => "Loan amount",
            FieldId::LoanPurpose => "Loan purpose",
            FieldId::CreditScore => "Credit score",
            FieldId::ExistingLoans => "Existing loans",
        }
    }

    pub fn choices(self) -> Option<&'static [&'static str]> {
        match self {
            FieldId::Gender => Some(&GENDER_CHOICES[..]),
            FieldId::Education => Some(&EDUCATION_CHOICES[..]),
            FieldId::HomeOwnership => Some(&HOME_OWNERSHIP_CHOICES[..]),
            FieldId::LoanPurpose => Some(&LOAN_PURPOSE_CHOICES[..]),
            _ => None,
        }
    }

    fn numeric_only(self) -> bool {
        self.choices().is_none()
    }

    /// Money fields take decimals; the rest are whole numbers.
    fn accepts_decimal(self) -> bool {
        matches!(self, FieldId::Income | FieldId::LoanAmount)
    }
}

/// Editable state of the whole form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub fields: FormFields,
}

impl FormState {
    pub fn value(&self, id: FieldId) -> &str {
        let f = &self.fields;
        match id {
            FieldId::Age => &f.age,
            FieldId::Gender => &f.gender,
            FieldId::Education => &f.education,
            FieldId::Income => &f.income,
            FieldId::EmploymentYears => &f.employment_years,
            FieldId::HomeOwnership => &f.home_ownership,
            FieldId::LoanAmount => &f.loan_amount,
            FieldId::LoanPurpose => &f.loan_purpose,
            FieldId::CreditScore => &f.credit_score,
            FieldId::ExistingLoans => &f.existing_loans,
        }
    }

    fn value_mut(&mut self, id: FieldId) -> &mut String {
        let f = &mut self.fields;
        match id {
            FieldId::Age => &mut f.age,
            FieldId::Gender => &mut f.gender,
            FieldId::Education => &mut f.education,
            FieldId::Income => &mut f.income,
            FieldId::EmploymentYears => &mut f.employment_years,
            FieldId::HomeOwnership => &mut f.home_ownership,
            FieldId::LoanAmount => &mut f.loan_amount,
            FieldId::LoanPurpose => &mut f.loan_purpose,
            FieldId::CreditScore => &mut f.credit_score,
            FieldId::ExistingLoans => &mut f.existing_loans,
        }
    }

    pub fn set(&mut self, id: FieldId, value: impl Into<String>) {
        *self.value_mut(id) = value.into();
    }

    /// Step a choice field forward or backward, wrapping through "(select)".
    ///
    /// Text fields are left unchanged.
    pub fn cycle(&mut self, id: FieldId, delta: i32) {
        let Some(choices) = id.choices() else {
            return;
        };

        // Position 0 is the empty entry; choices follow at 1..=len.
        let slots = choices.len() as i32 + 1;
        let current = choices
            .iter()
            .position(|c| *c == self.value(id))
            .map(|i| i as i32 + 1)
            .unwrap_or(0);
        let next = (current + delta).rem_euclid(slots);

        let value = if next == 0 {
            String::new()
        } else {
            choices[(next - 1) as usize].to_string()
        };
        self.set(id, value);
    }

    /// Accept a typed character for a text field.
    ///
    /// Returns `false` when the character is not allowed there.
    pub fn push_char(&mut self, id: FieldId, c: char) -> bool {
        if !id.numeric_only() {
            return false;
        }
        let allowed = c.is_ascii_digit() || c == '-' || (c == '.' && id.accepts_decimal());
        if !allowed {
            return false;
        }
        self.value_mut(id).push(c);
        true
    }

    pub fn pop_char(&mut self, id: FieldId) {
        self.value_mut(id).pop();
    }

    pub fn display_value(&self, id: FieldId) -> String {
        let value = self.value(id);
        if value.is_empty() {
            if id.choices().is_some() {
                "(select)".to_string()
            } else {
                "-".to_string()
            }
        } else {
            value.to_string()
        }
    }
}
