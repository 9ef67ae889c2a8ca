use std::process::ExitCode;

fn main() -> ExitCode {
    let Err(err) = loan_predictor::app::run() else {
        return ExitCode::SUCCESS;
    };
    // Submission errors are printed by the presenter that ran them.
    if !err.is_reported() {
        eprintln!("{err}");
    }
    ExitCode::from(err.exit_code())
}
