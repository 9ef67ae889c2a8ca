//! Command-line parsing for the loan prediction client.
//!
//! Argument parsing and command dispatch stay separate from the submission
//! flow so the same controller backs every front-end.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::FormFields;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "loan", version, about = "Loan approval prediction client")]
pub struct Cli {
    /// Base URL of the prediction service (overrides LOAN_API_URL).
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fill in the application in an interactive terminal form.
    Tui,
    /// Submit one application from flags and print the decision.
    Submit(SubmitArgs),
    /// Check whether the prediction service is reachable.
    Probe,
    /// Post the documented example application and print the raw response.
    Example,
}

/// Application fields for `loan submit`.
///
/// Values are taken as typed; parsing and range checks happen in the same
/// place as for the interactive form, so blanks are reported, not rejected
/// by the parser.
#[derive(Debug, Args, Clone, Default)]
pub struct SubmitArgs {
    /// Age in years (18-100).
    #[arg(long, default_value = "")]
    pub age: String,

    /// Gender (male, female).
    #[arg(long, default_value = "")]
    pub gender: String,

    /// Education (high_school, bachelor, master, phd).
    #[arg(long, default_value = "")]
    pub education: String,

    /// Annual income.
    #[arg(long, default_value = "")]
    pub income: String,

    /// Years of employment experience.
    #[arg(long, default_value = "")]
    pub employment_years: String,

    /// Home ownership (rent, own, mortgage).
    #[arg(long, default_value = "")]
    pub home_ownership: String,

    /// Requested loan amount.
    #[arg(long, default_value = "")]
    pub loan_amount: String,

    /// Loan purpose (personal, education, medical, venture, home).
    #[arg(long, default_value = "")]
    pub loan_purpose: String,

    /// Credit score (0-850).
    #[arg(long, default_value = "")]
    pub credit_score: String,

    /// Number of existing loans.
    #[arg(long, default_value = "0")]
    pub existing_loans: String,

    /// Print the JSON payload instead of sending it.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the decision as JSON.
    #[arg(long)]
    pub json: bool,
}

impl SubmitArgs {
    pub fn form_fields(&self) -> FormFields {
        FormFields {
            age: self.age.clone(),
            gender: self.gender.clone(),
            education: self.education.clone(),
            income: self.income.clone(),
            employment_years: self.employment_years.clone(),
            home_ownership: self.home_ownership.clone(),
            loan_amount: self.loan_amount.clone(),
            loan_purpose: self.loan_purpose.clone(),
            credit_score: self.credit_score.clone(),
            existing_loans: self.existing_loans.clone(),
        }
    }
}
