use thiserror::Error;

/// Message shown for any input that fails local checks.
pub const VALIDATION_MESSAGE: &str = "Please fill in all fields with valid values";

/// Message used when the service rejects a request without a usable `detail`.
pub const GENERIC_API_MESSAGE: &str = "Failed to get prediction";

/// Why a single submission failed.
///
/// Every variant is recoverable: the form stays usable and can be resubmitted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// Raised before any network call.
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,
    /// The service answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// Transport failure or a body that could not be decoded.
    #[error("Failed to fetch prediction: {0}")]
    Network(String),
}

impl SubmitError {
    /// Process exit code used by the one-shot `submit` command.
    pub fn exit_code(&self) -> u8 {
        match self {
            SubmitError::Validation => 2,
            SubmitError::Api { .. } => 3,
            SubmitError::Network(_) => 4,
        }
    }
}

/// Failure at the binary boundary: an exit code plus what to print.
///
/// `message` is `None` when a presenter already showed the error.
#[derive(Debug, Clone, Error)]
#[error("{}", .message.as_deref().unwrap_or_default())]
pub struct AppError {
    exit_code: u8,
    message: Option<String>,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: Some(message.into()),
        }
    }

    pub fn reported(exit_code: u8) -> Self {
        Self {
            exit_code,
            message: None,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn is_reported(&self) -> bool {
        self.message.is_none()
    }
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        AppError::new(err.exit_code(), crate::report::format_error(&err))
    }
}
