//! Request construction and response normalization shared by both clients.
//!
//! # Design
//! `RequestExecutor` holds the API key, the `ClientConfig` and a transport.
//! Building (`build_*`) and parsing (`parse_response`) are pure; `execute`
//! glues them to the transport and always yields an `ApiResponse`.

use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::endpoints::{CMS_AUTH_HEADER, CONTENT_TYPE_HEADER, DEFAULT_ERROR_MESSAGE, JSON_CONTENT_TYPE};
use crate::envelope::ApiResponse;
use crate::error::ApiError;
use crate::http::{FormPart, HttpBody, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

#[derive(Clone)]
pub struct RequestExecutor {
    api_key: String,
    config: ClientConfig,
    transport: Transport,
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("api_key", &"<redacted>")
            .field("config", &self.config)
            .finish()
    }
}

impl RequestExecutor {
    pub fn new(api_key: impl Into<String>, config: ClientConfig) -> Self {
        Self {
            api_key: api_key.into(),
            config,
            transport: Transport::new(),
        }
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// JSON POST to `path` authenticated with `Authorization: Bearer`.
    pub fn build_json_request<P: Serialize>(&self, path: &str, payload: &P) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.config.url(path),
            headers: vec![
                (CONTENT_TYPE_HEADER.to_string(), JSON_CONTENT_TYPE.to_string()),
                (CMS_AUTH_HEADER.to_string(), self.bearer()),
            ],
            body: HttpBody::Json(body),
            timeout: self.config.timeout(),
        })
    }

    /// Multipart POST to `path` carrying the bearer token under `auth_header`.
    /// The content type (with boundary) is left to the transport.
    pub fn build_multipart_request(&self, path: &str, parts: Vec<FormPart>, auth_header: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: self.config.url(path),
            headers: vec![(auth_header.to_string(), self.bearer())],
            body: HttpBody::Multipart(parts),
            timeout: self.config.timeout(),
        }
    }

    /// Build and execute a JSON POST.
    pub async fn send<P: Serialize>(&self, path: &str, payload: &P) -> ApiResponse {
        match self.build_json_request(path, payload) {
            Ok(request) => self.execute(request).await,
            Err(err) => err.into(),
        }
    }

    /// Execute a prebuilt request and normalize the outcome.
    pub async fn execute(&self, request: HttpRequest) -> ApiResponse {
        let url = request.url.clone();
        let envelope = match self.transport.execute(request).await {
            Ok(response) => parse_response(response),
            Err(err) => err.into(),
        };
        if !envelope.success {
            tracing::warn!(%url, errors = ?envelope.error_messages(), "request returned a failure envelope");
        }
        envelope
    }
}

/// Map an HTTP response onto the envelope.
///
/// - 2xx with JSON: success carrying the body.
/// - 2xx with an empty body: success without data.
/// - 2xx with anything else: failure describing the parse error.
/// - non-2xx: failure with the body's `message`, or the default message.
pub fn parse_response(response: HttpResponse) -> ApiResponse {
    match check_response(response) {
        Ok(Some(data)) => ApiResponse::ok(data),
        Ok(None) => ApiResponse::empty(),
        Err(err) => err.into(),
    }
}

fn check_response(response: HttpResponse) -> Result<Option<Value>, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Http {
            status: response.status,
            message: error_message(&response.body),
        });
    }
    if response.body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&response.body)
        .map(Some)
        .map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// The `message` of a JSON error body, or the default error message.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| value.get("message"))
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map_or_else(|| DEFAULT_ERROR_MESSAGE.to_string(), str::to_string)
}
