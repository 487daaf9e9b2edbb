//! Fixed endpoint paths, header names and fallback messages for both APIs.

pub const CATEGORIES: &str = "/api/v1/cms/categories";
pub const ARTICLES_INDEXES: &str = "/api/v1/cms/articles-indexes";
pub const ALL_ARTICLES_INDEXES: &str = "/api/v1/cms/all/articles-indexes";
pub const SEND_FORM: &str = "/api/v1/send";

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Bearer header read by the CMS API.
pub const CMS_AUTH_HEADER: &str = "Authorization";

/// Bearer header read by the form API. It differs from the CMS one and the
/// deployed form server only accepts this spelling.
pub const FORM_AUTH_HEADER: &str = "Authentication";

/// Error reported when a failed response carries no usable `message`.
pub const DEFAULT_ERROR_MESSAGE: &str = "Unknown error";
