//! Executes plain-data `HttpRequest`s over `reqwest`.
//!
//! This is the only module that performs I/O. It never interprets status
//! codes: any response that arrives, 2xx or not, comes back as an
//! `HttpResponse`, and only failures to get a response become errors.

use std::error::Error as StdError;

use reqwest::multipart::{Form, Part};

use crate::error::ApiError;
use crate::http::{FormPart, FormValue, HttpBody, HttpMethod, HttpRequest, HttpResponse};

/// Shared HTTP transport. Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone, Default)]
pub struct Transport {
    client: reqwest::Client,
}

impl Transport {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;

        tracing::debug!(method = method.as_str(), %url, "sending request");

        let mut builder = match method {
            HttpMethod::Post => self.client.post(&url),
        };
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder = match body {
            HttpBody::Json(text) => builder.body(text),
            HttpBody::Multipart(parts) => builder.multipart(multipart_form(parts)?),
        };

        let response = builder.send().await.map_err(|e| {
            let message = error_chain(&e);
            tracing::warn!(%url, error = %message, "request failed");
            ApiError::Transport(message)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            let message = error_chain(&e);
            tracing::warn!(%url, status, error = %message, "failed to read response body");
            ApiError::Transport(message)
        })?;

        tracing::debug!(%url, status, "received response");
        Ok(HttpResponse { status, body })
    }
}

/// `err` followed by each of its sources, joined with `": "`. A source whose
/// text the message already ends with is skipped.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

fn multipart_form(parts: Vec<FormPart>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for FormPart { name, value } in parts {
        form = match value {
            FormValue::Text(text) => form.text(name, text),
            FormValue::File(file) => {
                let mut part = Part::bytes(file.bytes).file_name(file.file_name);
                if let Some(content_type) = file.content_type {
                    part = part
                        .mime_str(&content_type)
                        .map_err(|e| ApiError::InvalidRequest(format!("content type {content_type:?}: {e}")))?;
                }
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::FormFile;

    #[derive(Debug, thiserror::Error)]
    #[error("error sending request")]
    struct Outer(#[source] Inner);

    #[derive(Debug, thiserror::Error)]
    #[error("tcp connect error")]
    struct Inner(#[source] std::io::Error);

    #[test]
    fn error_chain_includes_every_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused");
        let err = Outer(Inner(io));
        assert_eq!(
            error_chain(&err),
            "error sending request: tcp connect error: Connection refused"
        );
    }

    #[test]
    fn error_chain_without_source_is_display() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "operation timed out");
        assert_eq!(error_chain(&io), "operation timed out");
    }

    #[test]
    fn multipart_form_accepts_text_and_files() {
        let parts = vec![
            FormPart::text("resourceId", "r1"),
            FormPart::file(
                "file_0",
                FormFile::new("cv.pdf", b"%PDF".to_vec()).with_content_type("application/pdf"),
            ),
        ];
        assert!(multipart_form(parts).is_ok());
    }

    #[test]
    fn multipart_form_rejects_bad_content_type() {
        let parts = vec![FormPart::file(
            "file_0",
            FormFile::new("a.bin", vec![0u8]).with_content_type("not a mime"),
        )];
        let err = multipart_form(parts).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
