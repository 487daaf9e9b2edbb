//! Request payloads and form inputs.
//!
//! Payloads serialize to the camelCase JSON the CMS API expects. Optional
//! fields are omitted rather than sent as `null`, and nothing is validated:
//! empty keys, empty resource lists and negative paging values go out as-is.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::FormFile;

/// Body of the single-resource CMS reads (categories, article indexes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDocumentRequest {
    pub resource_id: String,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// Body of the cross-resource article index read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllArticlesIndexesRequest {
    pub resource_ids: Vec<String>,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// Input to `MiraForm::prepare_form_data`.
///
/// `content` must be a JSON object when given; `Value::Null` counts as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrepareFormDataParams {
    pub resource_id: String,
    pub form_id: String,
    pub content: Option<Value>,
    pub files: Vec<FormFile>,
}

impl PrepareFormDataParams {
    pub fn new(resource_id: impl Into<String>, form_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            form_id: form_id.into(),
            ..Self::default()
        }
    }

    pub fn content(mut self, content: Value) -> Self {
        self.content = Some(content);
        self
    }

    pub fn file(mut self, file: FormFile) -> Self {
        self.files.push(file);
        self
    }
}
