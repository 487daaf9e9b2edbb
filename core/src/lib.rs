//! Async client for the Mira CMS read API and the Mira form API.
//!
//! # Overview
//! `MiraCms` reads categories and article indexes, `MiraForm` validates and
//! submits multipart forms. Every network-facing method returns an
//! `ApiResponse` envelope; HTTP errors, transport failures and malformed
//! response bodies all become failure envelopes instead of errors.
//!
//! # Design
//! - Requests are built as plain `HttpRequest` data (`build_*`) and responses
//!   are mapped from plain `HttpResponse` data (`parse_response`). Only
//!   `transport` touches the network.
//! - Clients hold an immutable `ClientConfig` and share no mutable state, so
//!   they can be cloned freely across tasks.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod cms;
pub mod config;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod form;
pub mod http;
pub mod request;
pub mod transport;
pub mod types;

pub use cms::{MiraCms, MiraResource};
pub use config::ClientConfig;
pub use envelope::ApiResponse;
pub use error::{ApiError, ConfigError, FormValidationError};
pub use form::{MiraForm, PreparedForm};
pub use http::{FormFile, FormPart, FormValue, HttpBody, HttpMethod, HttpRequest, HttpResponse};
pub use request::{parse_response, RequestExecutor};
pub use types::{AllArticlesIndexesRequest, PrepareFormDataParams, ResourceDocumentRequest};
