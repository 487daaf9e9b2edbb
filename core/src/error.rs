//! Error types for the Mira clients.
//!
//! # Design
//! Every fallible step inside the crate returns `Result<_, ApiError>`. The
//! public network-facing methods fold the error into an `ApiResponse` at the
//! boundary, so callers only see `ApiError` when they use the `build_*` and
//! `parse_*` halves directly.

use thiserror::Error;

/// Errors raised while building, executing or parsing a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. `message` is the server's
    /// `message` field, or the default error message when it had none.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never produced a response (DNS, refused connection, timeout).
    #[error("{0}")]
    Transport(String),

    /// A 2xx response body was not the expected JSON.
    #[error("invalid JSON in response body: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request could not be assembled.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Message placed in a failure envelope's `errors`.
    ///
    /// HTTP failures report only the server message, transport failures only
    /// the underlying error text.
    pub fn envelope_message(&self) -> String {
        match self {
            ApiError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Validation failures from `MiraForm::prepare_form_data`, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .errors.join("; "))]
pub struct FormValidationError {
    pub errors: Vec<String>,
}

/// Errors from loading a `ClientConfig` out of the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingVar(&'static str),

    #[error("{var} must be a positive whole number of milliseconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}
