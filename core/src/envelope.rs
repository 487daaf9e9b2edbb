//! The uniform `{success, data?, errors?}` result returned by every
//! network-facing operation.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Result envelope shared by the CMS and form APIs.
///
/// `errors` is present exactly when `success` is false, and `data` is only
/// ever set on a successful envelope. Use the constructors to keep that true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = Value> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            errors: None,
        }
    }

    /// A successful envelope whose response had no body.
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            errors: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            errors: Some(vec![message.into()]),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Error messages, empty on success.
    pub fn error_messages(&self) -> &[String] {
        self.errors.as_deref().unwrap_or(&[])
    }

    pub fn into_result(self) -> Result<Option<T>, Vec<String>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.errors.unwrap_or_default())
        }
    }
}

impl ApiResponse<Value> {
    /// Deserialize `data` into `U`. A decode failure turns the envelope into
    /// a failure; a failed envelope passes through unchanged.
    pub fn decode<U: DeserializeOwned>(self) -> ApiResponse<U> {
        match self.into_result() {
            Ok(None) => ApiResponse::empty(),
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(data) => ApiResponse::ok(data),
                Err(e) => ApiError::Deserialization(e.to_string()).into(),
            },
            Err(errors) => ApiResponse {
                success: false,
                data: None,
                errors: Some(errors),
            },
        }
    }
}

impl<T> From<ApiError> for ApiResponse<T> {
    fn from(err: ApiError) -> Self {
        ApiResponse::failure(err.envelope_message())
    }
}

impl<T> From<Result<T, ApiError>> for ApiResponse<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => ApiResponse::ok(data),
            Err(err) => err.into(),
        }
    }
}
