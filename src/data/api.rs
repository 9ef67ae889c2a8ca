//! HTTP integration with the loan prediction service.

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::config::Settings;
use crate::domain::{PredictionRequest, PredictionResult};
use crate::error::{SubmitError, GENERIC_API_MESSAGE};

const PREDICT_PATH: &str = "/predict";
const DOCS_PATH: &str = "/docs";

/// Outcome of the `/docs` liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Reachable,
    NotResponding(u16),
}

pub struct PredictionClient {
    client: Client,
    base_url: String,
}

impl PredictionClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: Client::new(),
            base_url: settings.api_base_url.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the application and decode the decision.
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, SubmitError> {
        let url = format!("{}{PREDICT_PATH}", self.base_url);
        tracing::debug!(%url, "posting prediction request");

        // `.json()` also sets `Content-Type: application/json`.
        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "prediction service rejected request");
            return Err(api_error(status, resp));
        }

        resp.json::<PredictionResult>()
            .map_err(|e| SubmitError::Network(format!("invalid prediction response: {e}")))
    }

    /// GET the service docs page; only the status matters.
    pub fn probe(&self) -> Result<ProbeStatus, SubmitError> {
        let url = format!("{}{DOCS_PATH}", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            Ok(ProbeStatus::Reachable)
        } else {
            Ok(ProbeStatus::NotResponding(status.as_u16()))
        }
    }

    /// POST an arbitrary payload and return the raw status and JSON body.
    ///
    /// Used by the `example` smoke-test command, which prints whatever the
    /// service answers instead of interpreting it.
    pub fn post_raw(&self, request: &PredictionRequest) -> Result<(u16, Value), SubmitError> {
        let url = format!("{}{PREDICT_PATH}", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .json::<Value>()
            .map_err(|e| SubmitError::Network(format!("invalid JSON response: {e}")))?;
        Ok((status, body))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Value,
}

fn api_error(status: StatusCode, resp: Response) -> SubmitError {
    let message = resp
        .json::<ErrorBody>()
        .ok()
        .and_then(|body| detail_message(&body.detail))
        .unwrap_or_else(|| GENERIC_API_MESSAGE.to_string());

    SubmitError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Extract a human-readable message from a `detail` value.
///
/// Plain strings are used as-is. Validation failures arrive as a list of
/// objects with a `msg` field; those messages are joined.
fn detail_message(detail: &Value) -> Option<String> {
    let message = match detail {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item.get("msg").and_then(Value::as_str) {
                Some(msg) => msg.to_string(),
                None => item.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    };

    if message.is_empty() { None } else { Some(message) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_string_is_used_verbatim() {
        assert_eq!(detail_message(&json!("invalid input")).as_deref(), Some("invalid input"));
    }

    #[test]
    fn missing_or_empty_detail_has_no_message() {
        assert_eq!(detail_message(&Value::Null), None);
        assert_eq!(detail_message(&json!("")), None);
        assert_eq!(detail_message(&json!([])), None);
    }

    #[test]
    fn validation_detail_list_is_joined() {
        let detail = json!([
            {"loc": ["body", "person_age"], "msg": "Input should be a valid integer", "type": "int_parsing"},
            {"loc": ["body", "credit_score"], "msg": "Field required", "type": "missing"}
        ]);
        assert_eq!(
            detail_message(&detail).as_deref(),
            Some("Input should be a valid integer; Field required")
        );
    }

    #[test]
    fn non_string_detail_is_rendered_as_json() {
        assert_eq!(detail_message(&json!({"code": 7})).as_deref(), Some(r#"{"code":7}"#));
    }
}
