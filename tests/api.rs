//! Integration tests for the Inventario API.
//!
//! These run the real router against a temp-file SQLite database and a
//! scripted vision model, so no network or API key is needed.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use inventario_server::config::Config;
use inventario_server::db::create_pool;
use inventario_server::extract::{ExtractError, Extractor, VisionBackend, VisionModel};
use inventario_server::routes;
use inventario_server::state::AppState;

/// Vision model stub that replays a canned outcome.
struct ScriptedModel {
    script: Script,
}

enum Script {
    Text(&'static str),
    Fail(&'static str),
}

impl ScriptedModel {
    fn replying(text: &'static str) -> Arc<Self> {
        Arc::new(Self {
            script: Script::Text(text),
        })
    }

    fn failing(message: &'static str) -> Arc<Self> {
        Arc::new(Self {
            script: Script::Fail(message),
        })
    }
}

#[async_trait]
impl VisionModel for ScriptedModel {
    fn backend(&self) -> VisionBackend {
        VisionBackend::Gemini
    }

    async fn generate(
        &self,
        _prompt: &str,
        _image_data: &[u8],
        _mime_type: &str,
    ) -> Result<String, ExtractError> {
        match &self.script {
            Script::Text(text) => Ok(text.to_string()),
            Script::Fail(message) => Err(ExtractError::Upstream(message.to_string())),
        }
    }
}

/// Build a test server over a fresh database and the given model.
async fn test_server(model: Arc<dyn VisionModel>) -> (TempDir, TestServer) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let url = format!("sqlite:{}/inventario.db", dir.path().display());
    let pool = create_pool(&url).await.expect("Failed to create pool");

    let state = AppState::new(Config::default(), pool, Extractor::new(model));

    let app = Router::new()
        .merge(routes::ui::router())
        .nest("/api/books", routes::books::router())
        .nest("/api/extract", routes::extract::router())
        .with_state(state);

    let server = TestServer::new(app).expect("Failed to start test server");
    (dir, server)
}

async fn server_with_dummy_model() -> (TempDir, TestServer) {
    test_server(ScriptedModel::replying("{}")).await
}

#[tokio::test]
async fn create_then_list_returns_the_record_first() {
    let (_dir, server) = server_with_dummy_model().await;

    let created = server
        .post("/api/books")
        .json(&json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "subject": "Science Fiction"
        }))
        .await;
    assert_eq!(created.status_code(), 201);

    let body: Value = created.json();
    assert_eq!(body["message"], "Book saved successfully");
    assert!(body["bookId"].as_str().is_some_and(|id| !id.is_empty()));

    let listed = server.get("/api/books").await;
    assert_eq!(listed.status_code(), 200);

    let books: Vec<Value> = listed.json();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Dune");
    assert_eq!(books[0]["author"], "Frank Herbert");
    assert_eq!(books[0]["gradeLevel"], "");
    assert!(books[0]["createdAt"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn create_without_author_is_rejected_and_writes_nothing() {
    let (_dir, server) = server_with_dummy_model().await;

    let created = server
        .post("/api/books")
        .json(&json!({ "title": "Dune", "author": "Frank Herbert" }))
        .await;
    assert_eq!(created.status_code(), 201);

    let rejected = server
        .post("/api/books")
        .json(&json!({ "title": "Foo" }))
        .await;
    assert_eq!(rejected.status_code(), 400);

    let body: Value = rejected.json();
    assert_eq!(body["error"], "Title and Author are required");

    // List is unchanged
    let books: Vec<Value> = server.get("/api/books").await.json();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Dune");
}

#[tokio::test]
async fn create_with_empty_title_is_rejected() {
    let (_dir, server) = server_with_dummy_model().await;

    let rejected = server
        .post("/api/books")
        .json(&json!({ "title": "", "author": "Frank Herbert" }))
        .await;
    assert_eq!(rejected.status_code(), 400);

    let books: Vec<Value> = server.get("/api/books").await.json();
    assert!(books.is_empty());
}

#[tokio::test]
async fn list_is_ordered_newest_first() {
    let (_dir, server) = server_with_dummy_model().await;

    for (title, author) in [
        ("Dune", "Frank Herbert"),
        ("Foundation", "Isaac Asimov"),
        ("Hyperion", "Dan Simmons"),
    ] {
        let created = server
            .post("/api/books")
            .json(&json!({ "title": title, "author": author }))
            .await;
        assert_eq!(created.status_code(), 201);
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    let books: Vec<Value> = server.get("/api/books").await.json();
    assert_eq!(books.len(), 3);
    assert_eq!(books[0]["title"], "Hyperion");
    assert_eq!(books[2]["title"], "Dune");

    let timestamps: Vec<&str> = books
        .iter()
        .map(|b| b["createdAt"].as_str().unwrap())
        .collect();
    assert!(timestamps.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn extract_returns_all_five_fields_as_strings() {
    let model = ScriptedModel::replying(
        "```json\n{\"title\":\"Dune\",\"author\":\"Frank Herbert\",\"gradeLevel\":7,\"series\":null,\"publisher\":\"Ace\"}\n```",
    );
    let (_dir, server) = test_server(model).await;

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
            .file_name("cover.jpg")
            .mime_type("image/jpeg"),
    );

    let response = server.post("/api/extract").multipart(form).await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 5);
    for key in ["title", "author", "gradeLevel", "subject", "series"] {
        assert!(object[key].is_string(), "{} should be a string", key);
    }
    assert_eq!(body["title"], "Dune");
    // Non-string and null values coerce to empty strings
    assert_eq!(body["gradeLevel"], "");
    assert_eq!(body["series"], "");
}

#[tokio::test]
async fn extract_without_image_field_is_rejected() {
    let (_dir, server) = server_with_dummy_model().await;

    let form = MultipartForm::new().add_text("note", "no image here");
    let response = server.post("/api/extract").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "No image file found");
}

#[tokio::test]
async fn extract_reports_unparseable_model_output() {
    let model = ScriptedModel::replying("Sorry, I can't read this cover.");
    let (_dir, server) = test_server(model).await;

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(vec![0x89, 0x50, 0x4E, 0x47])
            .file_name("cover.png")
            .mime_type("image/png"),
    );

    let response = server.post("/api/extract").multipart(form).await;
    assert_eq!(response.status_code(), 500);

    let body: Value = response.json();
    assert_eq!(body["error"], "Internal Server Error");
    assert!(body["details"].as_str().is_some_and(|d| !d.is_empty()));
}

#[tokio::test]
async fn extract_reports_upstream_failure() {
    let model = ScriptedModel::failing("connection refused");
    let (_dir, server) = test_server(model).await;

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(vec![1, 2, 3]).file_name("cover.png").mime_type("image/png"),
    );

    let response = server.post("/api/extract").multipart(form).await;
    assert_eq!(response.status_code(), 500);

    let body: Value = response.json();
    assert!(body["details"]
        .as_str()
        .is_some_and(|d| d.contains("connection refused")));
}

#[tokio::test]
async fn index_page_is_served() {
    let (_dir, server) = server_with_dummy_model().await;

    let response = server.get("/").await;
    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("Inventario"));
}
