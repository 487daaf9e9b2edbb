//! HTTP request and response types as plain data.
//!
//! # Design
//! The clients build `HttpRequest` values and parse `HttpResponse` values
//! without touching the network. Only `transport` turns a request into an
//! actual round-trip, so request shaping and response mapping stay
//! deterministic and can be tested from literals.

use std::time::Duration;

/// HTTP method for a request. Both vendor APIs only accept POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
        }
    }
}

/// A file attached to a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FormFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Value of a single multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(FormFile),
}

/// A named multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub value: FormValue,
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FormValue::Text(value.into()),
        }
    }

    pub fn file(name: impl Into<String>, file: FormFile) -> Self {
        Self {
            name: name.into(),
            value: FormValue::File(file),
        }
    }
}

/// Request body. Multipart bodies are kept as parts so the transport can
/// choose the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpBody {
    Json(String),
    Multipart(Vec<FormPart>),
}

impl HttpBody {
    /// JSON text of the body, if it is a JSON body.
    pub fn as_json(&self) -> Option<&str> {
        match self {
            HttpBody::Json(text) => Some(text),
            HttpBody::Multipart(_) => None,
        }
    }

    pub fn as_parts(&self) -> Option<&[FormPart]> {
        match self {
            HttpBody::Json(_) => None,
            HttpBody::Multipart(parts) => Some(parts),
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by the clients' `build_*` methods and executed by `transport`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: HttpBody,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Produced by `transport` (or by hand in tests) and passed to
/// `request::parse_response`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
