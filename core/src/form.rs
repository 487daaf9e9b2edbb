//! Client for the Mira form-submission API.
//!
//! # Design
//! Submission is two steps. `prepare_form_data` validates the input and
//! assembles the multipart fields without any I/O; it returns either a
//! `PreparedForm` or every rule the input broke. `send_form` accepts only a
//! `PreparedForm`, so an unvalidated form cannot be sent.

use serde_json::Value;

use crate::config::ClientConfig;
use crate::endpoints::{FORM_AUTH_HEADER, SEND_FORM};
use crate::envelope::ApiResponse;
use crate::error::FormValidationError;
use crate::http::{FormPart, HttpRequest};
use crate::request::RequestExecutor;
use crate::types::PrepareFormDataParams;

pub const RESOURCE_ID_REQUIRED: &str = "resourceId is required";
pub const FORM_ID_REQUIRED: &str = "formId is required";
pub const CONTENT_NOT_OBJECT: &str = "content must be a valid object";

/// Validated multipart fields, ready for `MiraForm::send_form`.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedForm {
    parts: Vec<FormPart>,
}

impl PreparedForm {
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn part(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|part| part.name == name)
    }

    /// Field names in submission order.
    pub fn field_names(&self) -> Vec<&str> {
        self.parts.iter().map(|part| part.name.as_str()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct MiraForm {
    executor: RequestExecutor,
}

impl MiraForm {
    pub fn new(api_key: impl Into<String>, config: ClientConfig) -> Self {
        Self {
            executor: RequestExecutor::new(api_key, config),
        }
    }

    /// Validate `params` and lay out the multipart fields.
    ///
    /// All broken rules are reported together, in the order resource id,
    /// form id, content. On success the fields are `resourceId`, `formId`,
    /// `content` (JSON text, `{}` when absent) and `file_0`, `file_1`, ...
    pub fn prepare_form_data(&self, params: PrepareFormDataParams) -> Result<PreparedForm, FormValidationError> {
        let PrepareFormDataParams {
            resource_id,
            form_id,
            content,
            files,
        } = params;

        let content = content.filter(|value| !value.is_null());
        let mut errors = Vec::new();
        if resource_id.is_empty() {
            errors.push(RESOURCE_ID_REQUIRED.to_string());
        }
        if form_id.is_empty() {
            errors.push(FORM_ID_REQUIRED.to_string());
        }
        if content.as_ref().is_some_and(|value| !value.is_object()) {
            errors.push(CONTENT_NOT_OBJECT.to_string());
        }
        if !errors.is_empty() {
            return Err(FormValidationError { errors });
        }

        let content = content.unwrap_or_else(|| Value::Object(Default::default()));
        let mut parts = Vec::with_capacity(3 + files.len());
        parts.push(FormPart::text("resourceId", resource_id));
        parts.push(FormPart::text("formId", form_id));
        parts.push(FormPart::text("content", content.to_string()));
        parts.extend(
            files
                .into_iter()
                .enumerate()
                .map(|(idx, file)| FormPart::file(format!("file_{idx}"), file)),
        );
        Ok(PreparedForm { parts })
    }

    pub fn build_send_form(&self, form: &PreparedForm) -> HttpRequest {
        self.executor
            .build_multipart_request(SEND_FORM, form.parts.clone(), FORM_AUTH_HEADER)
    }

    /// Submit a prepared form. Authenticates with `Authentication: Bearer`.
    pub async fn send_form(&self, form: &PreparedForm) -> ApiResponse {
        tracing::debug!(fields = form.parts.len(), "submitting form");
        self.executor.execute(self.build_send_form(form)).await
    }
}
