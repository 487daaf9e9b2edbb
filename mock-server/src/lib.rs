use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::JsonRejection,
        Multipart, State,
    },
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const CMS_AUTH_HEADER: &str = "authorization";
pub const FORM_AUTH_HEADER: &str = "authentication";

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    pub resource_id: String,
    pub key: String,
    pub lang: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllIndexesRequest {
    pub resource_ids: Vec<String>,
    pub key: String,
    pub lang: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedFile {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub resource_id: String,
    pub form_id: String,
    pub content: Value,
    pub files: Vec<ReceivedFile>,
}

type DocumentKey = (String, String, Option<String>);
type Failure = (StatusCode, Json<Value>);

/// In-memory backing store shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    api_key: Arc<str>,
    documents: Arc<RwLock<HashMap<DocumentKey, Value>>>,
    submissions: Arc<RwLock<Vec<Submission>>>,
}

impl AppState {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: Arc::from(api_key),
            documents: Arc::default(),
            submissions: Arc::default(),
        }
    }

    /// Store `value` under `(resource_id, key, lang)`. A document without a
    /// language answers lookups for any language that has no document of its own.
    pub async fn insert_document(&self, resource_id: &str, key: &str, lang: Option<&str>, value: Value) {
        let doc_key = (resource_id.to_string(), key.to_string(), lang.map(str::to_string));
        self.documents.write().await.insert(doc_key, value);
    }

    pub async fn submissions(&self) -> Vec<Submission> {
        self.submissions.read().await.clone()
    }

    async fn lookup(&self, resource_id: &str, key: &str, lang: Option<&str>) -> Option<Value> {
        let documents = self.documents.read().await;
        let exact = (resource_id.to_string(), key.to_string(), lang.map(str::to_string));
        documents
            .get(&exact)
            .or_else(|| documents.get(&(resource_id.to_string(), key.to_string(), None)))
            .cloned()
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/cms/categories", post(fetch_document))
        .route("/api/v1/cms/articles-indexes", post(fetch_document))
        .route("/api/v1/cms/all/articles-indexes", post(all_articles_indexes))
        .route("/api/v1/send", post(send_form))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

fn failure(status: StatusCode, message: impl Into<String>) -> Failure {
    (status, Json(json!({ "message": message.into() })))
}

fn authorize(headers: &HeaderMap, header: &str, state: &AppState) -> Result<(), Failure> {
    let expected = format!("Bearer {}", state.api_key);
    match headers.get(header).and_then(|value| value.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(failure(StatusCode::UNAUTHORIZED, "invalid api key")),
    }
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Failure> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| failure(rejection.status(), rejection.body_text()))
}

async fn fetch_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<DocumentRequest>, JsonRejection>,
) -> Result<Json<Value>, Failure> {
    authorize(&headers, CMS_AUTH_HEADER, &state)?;
    let input = json_body(payload)?;
    if input.key.is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "key is required"));
    }
    tracing::debug!(resource_id = %input.resource_id, key = %input.key, "document lookup");
    state
        .lookup(&input.resource_id, &input.key, input.lang.as_deref())
        .await
        .map(Json)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "document not found"))
}

async fn all_articles_indexes(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AllIndexesRequest>, JsonRejection>,
) -> Result<Json<Value>, Failure> {
    authorize(&headers, CMS_AUTH_HEADER, &state)?;
    let input = json_body(payload)?;
    if input.key.is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "key is required"));
    }
    let page = input.page.unwrap_or(DEFAULT_PAGE);
    let limit = input.limit.unwrap_or(DEFAULT_LIMIT);
    if page < 1 || limit < 1 {
        return Err(failure(StatusCode::BAD_REQUEST, "page and limit must be positive"));
    }

    let mut found = Vec::new();
    for resource_id in &input.resource_ids {
        if let Some(data) = state.lookup(resource_id, &input.key, input.lang.as_deref()).await {
            found.push(json!({ "resourceId": resource_id, "data": data }));
        }
    }
    let total = found.len();
    let skip = usize::try_from((page - 1).saturating_mul(limit)).unwrap_or(usize::MAX);
    let take = usize::try_from(limit).unwrap_or(usize::MAX);
    let items: Vec<Value> = found.into_iter().skip(skip).take(take).collect();

    Ok(Json(json!({
        "items": items,
        "page": page,
        "limit": limit,
        "total": total,
    })))
}

async fn send_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, Failure> {
    authorize(&headers, FORM_AUTH_HEADER, &state)?;
    let mut multipart = multipart.map_err(|rejection| failure(rejection.status(), rejection.body_text()))?;

    let mut fields: HashMap<String, String> = HashMap::new();
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| failure(StatusCode::BAD_REQUEST, e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if field.file_name().is_some() {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| failure(StatusCode::BAD_REQUEST, e.body_text()))?;
            files.push(ReceivedFile {
                field: name,
                file_name,
                content_type,
                size: bytes.len(),
            });
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| failure(StatusCode::BAD_REQUEST, e.body_text()))?;
            fields.insert(name, text);
        }
    }

    let resource_id = fields.remove("resourceId").unwrap_or_default();
    let form_id = fields.remove("formId").unwrap_or_default();
    if resource_id.is_empty() || form_id.is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "resourceId and formId are required"));
    }
    let content = fields
        .get("content")
        .and_then(|raw| serde_json::from_str::<Value>(raw).ok())
        .filter(Value::is_object)
        .ok_or_else(|| failure(StatusCode::BAD_REQUEST, "content must be a JSON object"))?;

    let submission = Submission {
        id: Uuid::new_v4(),
        resource_id,
        form_id,
        content,
        files,
    };
    tracing::info!(id = %submission.id, files = submission.files.len(), "form received");
    let response = json!({
        "id": submission.id,
        "resourceId": submission.resource_id,
        "formId": submission.form_id,
        "files": submission.files.len(),
    });
    state.submissions.write().await.push(submission);
    Ok(Json(response))
}
