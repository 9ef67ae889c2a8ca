//! Submission flow shared by the console and TUI front-ends.
//!
//! form fields -> payload -> validation -> POST /predict -> result or error
//!
//! Front-ends only implement `Presenter`; the controller decides what to show.

use crate::data::PredictionClient;
use crate::domain::{FormFields, PredictionRequest};
use crate::error::SubmitError;
use crate::form::prepare_request;
use crate::report::ResultView;

/// Presentation port.
///
/// `show_loading` and `finish_loading` always bracket one submission, with
/// exactly one of `show_result` / `show_error` in between.
pub trait Presenter {
    /// Show the spinner, hide previous result/error panels, disable submit.
    fn show_loading(&mut self);
    fn show_result(&mut self, view: &ResultView);
    fn show_error(&mut self, err: &SubmitError);
    /// Hide the spinner and re-enable submit. Panel visibility is left alone.
    fn finish_loading(&mut self);
}

/// Events a form front-end can raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Submit(FormFields),
}

pub struct FormSubmissionController {
    client: PredictionClient,
}

impl FormSubmissionController {
    pub fn new(client: PredictionClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &PredictionClient {
        &self.client
    }

    pub fn handle_event<P: Presenter + ?Sized>(
        &self,
        event: FormEvent,
        presenter: &mut P,
    ) -> Result<ResultView, SubmitError> {
        match event {
            FormEvent::Submit(fields) => self.submit_prediction(&fields, presenter),
        }
    }

    /// Run one submission end to end, reporting progress through `presenter`.
    pub fn submit_prediction<P: Presenter + ?Sized>(
        &self,
        fields: &FormFields,
        presenter: &mut P,
    ) -> Result<ResultView, SubmitError> {
        presenter.show_loading();

        let outcome = prepare_request(fields).and_then(|request| self.request_prediction(&request));
        match &outcome {
            Ok(view) => presenter.show_result(view),
            Err(err) => {
                tracing::debug!(kind = error_kind(err), "submission failed");
                presenter.show_error(err);
            }
        }

        presenter.finish_loading();
        outcome
    }

    fn request_prediction(&self, request: &PredictionRequest) -> Result<ResultView, SubmitError> {
        let result = self.client.predict(request)?;
        Ok(ResultView::from_result(&result))
    }
}

fn error_kind(err: &SubmitError) -> &'static str {
    match err {
        SubmitError::Validation => "validation",
        SubmitError::Api { .. } => "api",
        SubmitError::Network(_) => "network",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::app::mock_service;
    use crate::config::Settings;
    use crate::domain::RiskLevel;
    use crate::form::sample_form;
    use crate::report::format_error;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Loading,
        Result(ResultView),
        Error(String),
        Finished,
    }

    #[derive(Default)]
    struct RecordingPresenter {
        calls: Vec<Call>,
    }

    impl Presenter for RecordingPresenter {
        fn show_loading(&mut self) {
            self.calls.push(Call::Loading);
        }

        fn show_result(&mut self, view: &ResultView) {
            self.calls.push(Call::Result(view.clone()));
        }

        fn show_error(&mut self, err: &SubmitError) {
            self.calls.push(Call::Error(format_error(err)));
        }

        fn finish_loading(&mut self) {
            self.calls.push(Call::Finished);
        }
    }

    #[derive(Clone)]
    struct MockState {
        status: StatusCode,
        body: Value,
        received: Arc<Mutex<Vec<Value>>>,
    }

    async fn handle_predict(
        State(state): State<MockState>,
        Json(payload): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        if let Ok(mut received) = state.received.lock() {
            received.push(payload);
        }
        (state.status, Json(state.body.clone()))
    }

    /// Serve `/predict` with a fixed answer, recording every payload received.
    fn spawn_mock(status: StatusCode, body: Value) -> (String, Arc<Mutex<Vec<Value>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            body,
            received: received.clone(),
        };
        let app = Router::new()
            .route("/predict", post(handle_predict))
            .with_state(state);
        (mock_service::serve(app), received)
    }

    fn controller_for(base_url: &str) -> FormSubmissionController {
        let settings = Settings::from_sources(Some(base_url), None).expect("settings");
        FormSubmissionController::new(PredictionClient::new(&settings))
    }

    fn unreachable_base_url() -> String {
        // Bind then drop to get a port nobody listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        format!("http://{addr}")
    }

    #[test]
    fn approved_submission_sends_derived_fields_and_renders_low_risk() {
        let (base_url, received) = spawn_mock(
            StatusCode::OK,
            json!({"prediction": "Approved", "probability": 0.85}),
        );
        let controller = controller_for(&base_url);
        let mut presenter = RecordingPresenter::default();

        let view = controller
            .handle_event(FormEvent::Submit(sample_form()), &mut presenter)
            .unwrap();

        assert!(view.approved);
        assert_eq!(view.risk, RiskLevel::Low);
        assert_eq!(view.probability_pct, "85.00");

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let payload = &received[0];
        assert_eq!(payload["loan_percent_income"], 0.2);
        assert_eq!(payload["previous_loan_defaults_on_file"], "NO");
        assert_eq!(payload["person_age"], 30);
        assert_eq!(payload["credit_score"], 700);
        assert_eq!(payload["person_education"], "Master");
        assert_eq!(payload["loan_int_rate"], 11.5);

        assert_eq!(
            presenter.calls,
            vec![Call::Loading, Call::Result(view), Call::Finished]
        );
    }

    #[test]
    fn low_probability_is_high_risk_regardless_of_prediction() {
        let (base_url, _) = spawn_mock(
            StatusCode::OK,
            json!({"prediction": "Approved", "probability": 0.3}),
        );
        let controller = controller_for(&base_url);
        let mut presenter = RecordingPresenter::default();

        let view = controller.submit_prediction(&sample_form(), &mut presenter).unwrap();
        assert_eq!(view.risk, RiskLevel::High);
        assert!(view.approved);
    }

    #[test]
    fn blank_income_fails_validation_without_network_call() {
        let (base_url, received) = spawn_mock(
            StatusCode::OK,
            json!({"prediction": "Approved", "probability": 0.9}),
        );
        let controller = controller_for(&base_url);

        for income in ["", "0", "lots"] {
            let mut form = sample_form();
            form.income = income.to_string();
            let mut presenter = RecordingPresenter::default();

            let err = controller.submit_prediction(&form, &mut presenter).unwrap_err();
            assert_eq!(err, SubmitError::Validation);
            assert_eq!(
                presenter.calls,
                vec![
                    Call::Loading,
                    Call::Error("Error: Please fill in all fields with valid values".to_string()),
                    Call::Finished,
                ]
            );
        }

        assert!(received.lock().unwrap().is_empty());
    }

    #[test]
    fn service_detail_is_shown_on_rejection() {
        let (base_url, _) = spawn_mock(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({"detail": "invalid input"}),
        );
        let controller = controller_for(&base_url);
        let mut presenter = RecordingPresenter::default();

        let err = controller.submit_prediction(&sample_form(), &mut presenter).unwrap_err();
        assert_eq!(
            err,
            SubmitError::Api {
                status: 422,
                message: "invalid input".to_string()
            }
        );
        assert_eq!(presenter.calls[1], Call::Error("Error: invalid input".to_string()));
        assert_eq!(presenter.calls.last(), Some(&Call::Finished));
    }

    #[test]
    fn rejection_without_detail_uses_generic_message() {
        let (base_url, _) = spawn_mock(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"}));
        let controller = controller_for(&base_url);
        let mut presenter = RecordingPresenter::default();

        let err = controller.submit_prediction(&sample_form(), &mut presenter).unwrap_err();
        assert_eq!(err.to_string(), "Failed to get prediction");
    }

    #[test]
    fn malformed_success_body_is_a_network_error() {
        let (base_url, _) = spawn_mock(StatusCode::OK, json!({"unexpected": true}));
        let controller = controller_for(&base_url);
        let mut presenter = RecordingPresenter::default();

        let err = controller.submit_prediction(&sample_form(), &mut presenter).unwrap_err();
        assert!(matches!(err, SubmitError::Network(_)));
    }

    #[test]
    fn unreachable_service_reports_generic_failure_and_clears_loading() {
        let controller = controller_for(&unreachable_base_url());
        let mut presenter = RecordingPresenter::default();

        let err = controller.submit_prediction(&sample_form(), &mut presenter).unwrap_err();
        assert!(matches!(err, SubmitError::Network(_)));

        assert_eq!(presenter.calls.len(), 3);
        assert_eq!(presenter.calls[0], Call::Loading);
        match &presenter.calls[1] {
            Call::Error(message) => {
                assert!(message.starts_with("Error: Failed to fetch prediction"), "{message}")
            }
            other => panic!("expected error, got {other:?}"),
        }
        assert_eq!(presenter.calls[2], Call::Finished);
    }

    #[test]
    fn form_stays_usable_after_a_failure() {
        let (base_url, received) = spawn_mock(
            StatusCode::OK,
            json!({"prediction": "Rejected", "probability": 0.55}),
        );
        let controller = controller_for(&base_url);
        let mut presenter = RecordingPresenter::default();

        let mut bad = sample_form();
        bad.age = "12".to_string();
        assert!(controller.submit_prediction(&bad, &mut presenter).is_err());

        let view = controller.submit_prediction(&sample_form(), &mut presenter).unwrap();
        assert_eq!(view.risk, RiskLevel::Medium);
        assert!(!view.approved);
        assert_eq!(received.lock().unwrap().len(), 1);
    }
}
