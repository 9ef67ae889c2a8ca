//! Line-oriented presenter for the one-shot `submit` command.

use crate::app::controller::Presenter;
use crate::error::SubmitError;
use crate::report::{format_error, format_result, ResultView};

pub struct ConsolePresenter {
    /// Print the result as JSON instead of labelled lines.
    json: bool,
}

impl ConsolePresenter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl Presenter for ConsolePresenter {
    fn show_loading(&mut self) {
        if !self.json {
            eprintln!("Requesting prediction...");
        }
    }

    fn show_result(&mut self, view: &ResultView) {
        if self.json {
            match serde_json::to_string_pretty(view) {
                Ok(text) => println!("{text}"),
                Err(e) => eprintln!("Failed to encode result: {e}"),
            }
        } else {
            println!("{}", format_result(view));
        }
    }

    fn show_error(&mut self, err: &SubmitError) {
        eprintln!("{}", format_error(err));
    }

    // Nothing to tear down on a line terminal.
    fn finish_loading(&mut self) {}
}
