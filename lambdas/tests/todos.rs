use async_trait::async_trait;
use lambda_http::http::{header::CONTENT_TYPE, StatusCode};
use lambda_http::{Body, Request, Response};
use serde_json::{json, Value};

use todo_lambdas::common::errors::StoreError;
use todo_lambdas::common::TodoItem;
use todo_lambdas::handlers::{add_todo, list_todos, respond};
use todo_lambdas::store::{ItemStore, MemoryItemStore, Record};

/// Store whose every call fails with the configured error.
struct FailingStore(StoreError);

#[async_trait]
impl ItemStore for FailingStore {
    async fn put(&self, _item: TodoItem) -> Result<(), StoreError> {
        Err(self.0.clone())
    }

    async fn scan_all(&self) -> Result<Vec<Record>, StoreError> {
        Err(self.0.clone())
    }
}

fn post(body: impl Into<Body>) -> Request {
    lambda_http::http::Request::builder()
        .method("POST")
        .uri("/todos")
        .header(CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn get() -> Request {
    lambda_http::http::Request::builder()
        .method("GET")
        .uri("/todos")
        .body(Body::Empty)
        .unwrap()
}

fn body_json(response: &Response<String>) -> Value {
    serde_json::from_str(response.body()).unwrap()
}

async fn create<S: ItemStore>(store: &S, body: Value) -> Response<String> {
    respond(add_todo::process_request(post(body.to_string()), store).await).unwrap()
}

async fn list<S: ItemStore>(store: &S) -> Response<String> {
    respond(list_todos::process_request(get(), store).await).unwrap()
}

// --- create ---

#[tokio::test]
async fn create_returns_201_and_persists() {
    let store = MemoryItemStore::new();
    let resp = create(
        &store,
        json!({"id": "1", "description": "buy milk", "isCompleted": false}),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(body_json(&resp), json!({"message": "Task created"}));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn create_rejects_incomplete_payloads() {
    let store = MemoryItemStore::new();

    for body in [
        json!({}),
        json!({"description": "no id", "isCompleted": false}),
        json!({"id": "1", "isCompleted": false}),
        json!({"id": "1", "description": "no flag"}),
        json!({"id": "1", "description": "stringly", "isCompleted": "true"}),
        json!({"id": "", "description": "empty id", "isCompleted": true}),
    ] {
        let resp = create(&store, body).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(&resp),
            json!({"error": "Missing id, task, or isCompleted field in the request body"})
        );
    }

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn create_without_body_is_rejected() {
    let store = MemoryItemStore::new();
    let resp = respond(add_todo::process_request(post(Body::Empty), &store).await).unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn create_with_malformed_json_is_rejected() {
    let store = MemoryItemStore::new();
    let resp = respond(add_todo::process_request(post("{\"id\":"), &store).await).unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(&resp)["error"].is_string());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn create_twice_overwrites() {
    let store = MemoryItemStore::new();
    create(
        &store,
        json!({"id": "7", "description": "first", "isCompleted": false}),
    )
    .await;
    let resp = create(
        &store,
        json!({"id": "7", "description": "second", "isCompleted": true}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let todos = body_json(&list(&store).await);
    assert_eq!(
        todos,
        json!([{"id": "7", "task": "second", "isCompleted": true}])
    );
}

#[tokio::test]
async fn create_surfaces_store_failure() {
    let store = FailingStore(StoreError::Downstream(
        "Requested resource not found".into(),
    ));
    let resp = create(
        &store,
        json!({"id": "1", "description": "buy milk", "isCompleted": false}),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(&resp),
        json!({"error": "Requested resource not found"})
    );
}

// --- list ---

#[tokio::test]
async fn list_empty_returns_empty_array() {
    let store = MemoryItemStore::new();
    let resp = list(&store).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.body(), "[]");
}

#[tokio::test]
async fn created_todo_appears_in_list_with_task_field() {
    let store = MemoryItemStore::new();
    create(
        &store,
        json!({"id": "1", "description": "buy milk", "isCompleted": false}),
    )
    .await;
    create(
        &store,
        json!({"id": "2", "description": "walk dog", "isCompleted": true}),
    )
    .await;

    let resp = list(&store).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(&resp),
        json!([
            {"id": "1", "task": "buy milk", "isCompleted": false},
            {"id": "2", "task": "walk dog", "isCompleted": true}
        ])
    );
}

#[tokio::test]
async fn list_surfaces_store_failure() {
    let resp = list(&FailingStore(StoreError::Downstream("throttled".into()))).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(&resp), json!({"error": "throttled"}));
}

#[tokio::test]
async fn unknown_store_failure_has_generic_message() {
    let resp = list(&FailingStore(StoreError::Unknown)).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(&resp),
        json!({"error": "An unknown error occurred"})
    );
}
