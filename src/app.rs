//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging and resolves settings
//! - probes the prediction service
//! - dispatches to the TUI or one-shot commands

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, SubmitArgs};
use crate::config::Settings;
use crate::data::{PredictionClient, ProbeStatus};
use crate::domain::PredictionRequest;
use crate::error::AppError;

pub mod console;
pub mod controller;
#[cfg(test)]
mod mock_service;

use console::ConsolePresenter;
use controller::{FormEvent, FormSubmissionController};

/// Entry point for the `loan` binary.
pub fn run() -> Result<(), AppError> {
    // `loan` and `loan --api-url X` behave like `loan tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    init_tracing(cli.log_file.as_deref())?;
    let settings = Settings::resolve(cli.api_url.as_deref())?;
    let client = PredictionClient::new(&settings);

    match cli.command {
        Command::Tui => handle_tui(client),
        Command::Submit(args) => handle_submit(client, &args),
        Command::Probe => handle_probe(&client),
        Command::Example => handle_example(&client),
    }
}

fn init_tracing(log_file: Option<&Path>) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // `try_init` fails only if a subscriber is already set; keep the existing one.
    match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                AppError::new(2, format!("Failed to create log file '{}': {e}", path.display()))
            })?;
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }
    Ok(())
}

/// Check the service once at startup. Never fatal.
pub fn startup_probe(client: &PredictionClient) {
    match client.probe() {
        Ok(ProbeStatus::Reachable) => {
            tracing::debug!(base_url = client.base_url(), "prediction service reachable");
        }
        Ok(ProbeStatus::NotResponding(status)) => {
            tracing::warn!(status, "API server is not responding");
        }
        Err(_) => {
            tracing::warn!(
                "Cannot connect to API server. Make sure it is running on {}",
                client.base_url()
            );
        }
    }
}

fn handle_tui(client: PredictionClient) -> Result<(), AppError> {
    // Probe before the alternate screen so any warning stays in the scrollback.
    startup_probe(&client);
    crate::tui::run(FormSubmissionController::new(client))
}

fn handle_submit(client: PredictionClient, args: &SubmitArgs) -> Result<(), AppError> {
    let fields = args.form_fields();

    if args.dry_run {
        let request = crate::form::prepare_request(&fields)?;
        let text = serde_json::to_string_pretty(&request)
            .map_err(|e| AppError::new(4, format!("Failed to encode payload: {e}")))?;
        println!("{text}");
        return Ok(());
    }

    let controller = FormSubmissionController::new(client);
    let mut presenter = ConsolePresenter::new(args.json);
    match controller.handle_event(FormEvent::Submit(fields), &mut presenter) {
        Ok(_) => Ok(()),
        // The presenter has already printed the message.
        Err(err) => Err(AppError::reported(err.exit_code())),
    }
}

fn handle_probe(client: &PredictionClient) -> Result<(), AppError> {
    match client.probe() {
        Ok(ProbeStatus::Reachable) => {
            println!("Prediction service at {} is reachable.", client.base_url());
            Ok(())
        }
        Ok(ProbeStatus::NotResponding(status)) => Err(AppError::new(
            4,
            format!("API server at {} is not responding (status {status}).", client.base_url()),
        )),
        Err(err) => Err(AppError::new(
            4,
            format!(
                "Cannot connect to API server. Make sure it is running on {} ({err}).",
                client.base_url()
            ),
        )),
    }
}

fn handle_example(client: &PredictionClient) -> Result<(), AppError> {
    let (status, body) = client.post_raw(&PredictionRequest::example())?;
    let pretty = serde_json::to_string_pretty(&body)
        .map_err(|e| AppError::new(4, format!("Failed to format response: {e}")))?;
    println!("Status Code: {status}");
    println!("Response: {pretty}");
    Ok(())
}

/// Global flags that take a separate value token.
const GLOBAL_VALUE_FLAGS: [&str; 2] = ["--api-url", "--log-file"];

/// Rewrite argv so `loan` defaults to `loan tui`.
///
/// Rules:
/// - `loan`                           -> `loan tui`
/// - `loan --api-url URL`             -> `loan tui --api-url URL`
/// - `loan --api-url URL submit ...`  -> unchanged (global flags before a subcommand)
/// - `loan --help/--version/-h`       -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    if argv.get(1..).is_some_and(only_global_flags) {
        argv.insert(1, "tui".to_string());
    }
    argv
}

/// True when no subcommand (or help/version request) follows the program name.
fn only_global_flags(args: &[String]) -> bool {
    let mut rest = args.iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-h" | "--help" | "-V" | "--version" => return false,
            flag if GLOBAL_VALUE_FLAGS.contains(&flag) => {
                rest.next();
            }
            flag if flag.starts_with('-') => {}
            // First positional token is the subcommand; clap reports unknown ones.
            _ => return false,
        }
    }
    true
}
