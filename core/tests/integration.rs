//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every client
//! operation over real HTTP. Validates that request building, transport and
//! envelope mapping work together against the actual server, and that
//! transport failures come back as envelopes.

use std::time::Duration;

use mira_core::{ApiResponse, ClientConfig, FormFile, MiraCms, MiraForm, PrepareFormDataParams};
use mock_server::AppState;
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;

const API_KEY: &str = "integration-key";

/// Start the mock server on a random port and return its base URL.
async fn start_server(state: AppState) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener, state));
    format!("http://{addr}")
}

async fn seeded_state() -> AppState {
    let state = AppState::new(API_KEY);
    state
        .insert_document(
            "r1",
            "blog/categories.json",
            None,
            json!([{"slug": "news", "title": "News"}, {"slug": "guides", "title": "Guides"}]),
        )
        .await;
    state
        .insert_document("r1", "blog/index.json", None, json!({"articles": ["hello-world"]}))
        .await;
    state
        .insert_document("r1", "blog/index.json", Some("de"), json!({"articles": ["hallo-welt"]}))
        .await;
    state
        .insert_document("r2", "blog/index.json", None, json!({"articles": ["second"]}))
        .await;
    state
}

#[derive(Debug, Deserialize, PartialEq)]
struct Category {
    slug: String,
    title: String,
}

#[tokio::test]
async fn cms_reads_end_to_end() {
    let base_url = start_server(seeded_state().await).await;
    let resource = MiraCms::new(API_KEY, ClientConfig::new(base_url)).init_resource("r1");

    let categories: ApiResponse<Vec<Category>> = resource
        .get_categories("blog/categories.json", None)
        .await
        .decode();
    assert!(categories.success, "{:?}", categories.errors);
    let categories = categories.data.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].slug, "news");

    let index = resource.get_articles_indexes("blog/index.json", Some("de")).await;
    assert_eq!(index, ApiResponse::ok(json!({"articles": ["hallo-welt"]})));

    let index = resource.get_articles_indexes("blog/index.json", Some("fr")).await;
    assert_eq!(index, ApiResponse::ok(json!({"articles": ["hello-world"]})));
}

#[tokio::test]
async fn cms_server_errors_become_failure_envelopes() {
    let base_url = start_server(seeded_state().await).await;
    let cms = MiraCms::new(API_KEY, ClientConfig::new(&base_url));

    let missing = cms.init_resource("r1").get_categories("nope.json", None).await;
    assert_eq!(missing, ApiResponse::failure("document not found"));

    // No client-side validation: the empty key reaches the server.
    let empty_key = cms.init_resource("r1").get_articles_indexes("", None).await;
    assert_eq!(empty_key, ApiResponse::failure("key is required"));

    let wrong_key = MiraCms::new("wrong", ClientConfig::new(&base_url))
        .init_resource("r1")
        .get_categories("blog/categories.json", None)
        .await;
    assert_eq!(wrong_key, ApiResponse::failure("invalid api key"));
}

#[tokio::test]
async fn error_without_message_uses_default() {
    let base_url = start_server(seeded_state().await).await;
    // Unknown route: 404 with an empty body.
    let cms = MiraCms::new(API_KEY, ClientConfig::new(format!("{base_url}/unmounted")));

    let envelope = cms.init_resource("r1").get_categories("blog/categories.json", None).await;
    assert_eq!(envelope, ApiResponse::failure("Unknown error"));
}

#[tokio::test]
async fn all_articles_indexes_end_to_end() {
    let base_url = start_server(seeded_state().await).await;
    let cms = MiraCms::new(API_KEY, ClientConfig::new(base_url));

    let envelope = cms
        .get_all_articles_indexes(["r1", "r2", "r3"], "blog/index.json", Some(1), Some(10), None)
        .await;
    assert!(envelope.success);
    let data = envelope.data.unwrap();
    assert_eq!(data["total"], 2);
    assert_eq!(
        data["items"],
        json!([
            {"resourceId": "r1", "data": {"articles": ["hello-world"]}},
            {"resourceId": "r2", "data": {"articles": ["second"]}}
        ])
    );

    // Negative paging is forwarded and rejected by the server, not the client.
    let envelope = cms
        .get_all_articles_indexes(["r1"], "blog/index.json", Some(-1), None, None)
        .await;
    assert_eq!(envelope, ApiResponse::failure("page and limit must be positive"));
}

#[tokio::test]
async fn form_submission_lifecycle() {
    let state = AppState::new(API_KEY);
    let base_url = start_server(state.clone()).await;
    let client = MiraForm::new(API_KEY, ClientConfig::new(base_url));

    let form = client
        .prepare_form_data(
            PrepareFormDataParams::new("r1", "contact")
                .content(json!({"email": "ada@example.com", "message": "hi"}))
                .file(FormFile::new("notes.txt", b"hello".to_vec()).with_content_type("text/plain"))
                .file(FormFile::new("blob.bin", vec![0u8, 1, 2, 3])),
        )
        .unwrap();

    let envelope = client.send_form(&form).await;
    assert!(envelope.success, "{:?}", envelope.errors);
    assert!(envelope.errors.is_none());
    let data = envelope.data.unwrap();
    assert_eq!(data["resourceId"], "r1");
    assert_eq!(data["formId"], "contact");
    assert_eq!(data["files"], 2);

    let submissions = state.submissions().await;
    assert_eq!(submissions.len(), 1);
    let submission = &submissions[0];
    assert_eq!(data["id"], submission.id.to_string());
    assert_eq!(submission.content, json!({"email": "ada@example.com", "message": "hi"}));
    assert_eq!(submission.files[0].field, "file_0");
    assert_eq!(submission.files[0].file_name.as_deref(), Some("notes.txt"));
    assert_eq!(submission.files[0].content_type.as_deref(), Some("text/plain"));
    assert_eq!(submission.files[0].size, 5);
    assert_eq!(submission.files[1].field, "file_1");
    assert_eq!(submission.files[1].size, 4);
}

#[tokio::test]
async fn form_with_wrong_key_is_rejected() {
    let state = AppState::new(API_KEY);
    let base_url = start_server(state.clone()).await;
    let client = MiraForm::new("wrong", ClientConfig::new(base_url));

    let form = client
        .prepare_form_data(PrepareFormDataParams::new("r1", "contact"))
        .unwrap();
    let envelope = client.send_form(&form).await;
    assert_eq!(envelope, ApiResponse::failure("invalid api key"));
    assert!(state.submissions().await.is_empty());
}

#[tokio::test]
async fn refused_connection_becomes_failure_envelope() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::new(format!("http://{addr}"));
    let envelope = MiraCms::new(API_KEY, config.clone())
        .init_resource("r1")
        .get_categories("blog/categories.json", None)
        .await;
    assert!(!envelope.success);
    assert!(envelope.data.is_none());
    assert_eq!(envelope.error_messages().len(), 1);
    let message = &envelope.error_messages()[0];
    assert!(message.contains("refused"), "unexpected message: {message}");
    assert!(!message.contains("timed out"), "unexpected message: {message}");

    let client = MiraForm::new(API_KEY, config);
    let form = client
        .prepare_form_data(PrepareFormDataParams::new("r1", "contact"))
        .unwrap();
    let envelope = client.send_form(&form).await;
    assert!(!envelope.success);
    assert_eq!(envelope.error_messages().len(), 1);
    assert!(envelope.error_messages()[0].contains("refused"));
}

#[tokio::test]
async fn configured_timeout_aborts_stalled_request() {
    // Accepts connections and never answers.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let config = ClientConfig::new(format!("http://{addr}")).with_timeout(Duration::from_millis(200));
    let resource = MiraCms::new(API_KEY, config).init_resource("r1");
    let request = resource.get_categories("blog/categories.json", None);
    let envelope = tokio::time::timeout(Duration::from_secs(10), request)
        .await
        .expect("client timeout should fire before the test guard");
    assert!(!envelope.success);
    assert!(envelope.data.is_none());
    assert_eq!(envelope.error_messages().len(), 1);
    let message = &envelope.error_messages()[0];
    assert!(message.contains("timed out"), "unexpected message: {message}");
}
