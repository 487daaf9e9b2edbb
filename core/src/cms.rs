//! Read client for the Mira CMS API.
//!
//! # Design
//! `MiraCms` holds the API key and configuration and hands out
//! resource-scoped `MiraResource` handles. Every operation has a pure
//! `build_*` method producing the `HttpRequest` and an async method that
//! sends it and returns the envelope. No input is validated client-side.

use crate::config::ClientConfig;
use crate::endpoints;
use crate::envelope::ApiResponse;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::request::RequestExecutor;
use crate::types::{AllArticlesIndexesRequest, ResourceDocumentRequest};

/// Entry point for the CMS API.
#[derive(Debug, Clone)]
pub struct MiraCms {
    executor: RequestExecutor,
}

impl MiraCms {
    pub fn new(api_key: impl Into<String>, config: ClientConfig) -> Self {
        Self {
            executor: RequestExecutor::new(api_key, config),
        }
    }

    /// Handle for reads scoped to one resource (a tenant UUID).
    pub fn init_resource(&self, resource_id: impl Into<String>) -> MiraResource {
        MiraResource {
            resource_id: resource_id.into(),
            executor: self.executor.clone(),
        }
    }

    pub fn build_all_articles_indexes<I, S>(
        &self,
        resource_ids: I,
        key: &str,
        page: Option<i64>,
        limit: Option<i64>,
        lang: Option<&str>,
    ) -> Result<HttpRequest, ApiError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let payload = AllArticlesIndexesRequest {
            resource_ids: resource_ids.into_iter().map(Into::into).collect(),
            key: key.to_string(),
            lang: lang.map(str::to_string),
            page,
            limit,
        };
        self.executor.build_json_request(endpoints::ALL_ARTICLES_INDEXES, &payload)
    }

    /// Article indexes stored under `key` across several resources.
    /// `page` and `limit` are forwarded untouched.
    pub async fn get_all_articles_indexes<I, S>(
        &self,
        resource_ids: I,
        key: &str,
        page: Option<i64>,
        limit: Option<i64>,
        lang: Option<&str>,
    ) -> ApiResponse
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.build_all_articles_indexes(resource_ids, key, page, limit, lang) {
            Ok(request) => self.executor.execute(request).await,
            Err(err) => err.into(),
        }
    }
}

/// CMS reads bound to a single resource.
#[derive(Debug, Clone)]
pub struct MiraResource {
    resource_id: String,
    executor: RequestExecutor,
}

impl MiraResource {
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn payload(&self, key: &str, lang: Option<&str>) -> ResourceDocumentRequest {
        ResourceDocumentRequest {
            resource_id: self.resource_id.clone(),
            key: key.to_string(),
            lang: lang.map(str::to_string),
        }
    }

    pub fn build_categories(&self, key: &str, lang: Option<&str>) -> Result<HttpRequest, ApiError> {
        self.executor
            .build_json_request(endpoints::CATEGORIES, &self.payload(key, lang))
    }

    pub fn build_articles_indexes(&self, key: &str, lang: Option<&str>) -> Result<HttpRequest, ApiError> {
        self.executor
            .build_json_request(endpoints::ARTICLES_INDEXES, &self.payload(key, lang))
    }

    /// Categories document stored under `key`, e.g. `blog/categories.json`.
    pub async fn get_categories(&self, key: &str, lang: Option<&str>) -> ApiResponse {
        self.executor
            .send(endpoints::CATEGORIES, &self.payload(key, lang))
            .await
    }

    /// Article index stored under `key`, e.g. `blog/articles-index.json`.
    pub async fn get_articles_indexes(&self, key: &str, lang: Option<&str>) -> ApiResponse {
        self.executor
            .send(endpoints::ARTICLES_INDEXES, &self.payload(key, lang))
            .await
    }
}
