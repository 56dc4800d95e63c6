use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers;
use crate::store::TodoStore;

/// Shared handler state. Handlers hold no other state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Diagnostics
        .route("/test", get(handlers::test_route))
        // Todo routes
        .route("/todos", get(handlers::list_todos))
        .route("/todos", post(handlers::create_todo))
        .route("/todos", put(handlers::update_todo))
        .route("/todos", delete(handlers::delete_todo))
}

/// Full router without transport layers (CORS, tracing, static files)
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewTodo, TodoChanges};
    use crate::store::MemoryTodoStore;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use todo_shared::{ListTodosResponse, Todo};
    use tower::ServiceExt;
    use uuid::Uuid;

    /// Store whose backend is always down
    struct FailingStore;

    #[async_trait]
    impl TodoStore for FailingStore {
        async fn list(&self) -> Result<Vec<Todo>> {
            Err(anyhow!("connection refused"))
        }

        async fn create(&self, _new_todo: NewTodo) -> Result<Todo> {
            Err(anyhow!("null value in column \"text\" violates not-null constraint"))
        }

        async fn update(&self, _id: Option<Uuid>, _changes: TodoChanges) -> Result<usize> {
            Err(anyhow!("connection refused"))
        }

        async fn delete(&self, _id: Option<Uuid>) -> Result<usize> {
            Err(anyhow!("connection refused"))
        }
    }

    fn memory_app() -> Router {
        app(AppState::new(Arc::new(MemoryTodoStore::new())))
    }

    fn failing_app() -> Router {
        app(AppState::new(Arc::new(FailingStore)))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    async fn list(app: &Router) -> Vec<Todo> {
        let response = send(app, Method::GET, "/api/todos", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: ListTodosResponse =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        body.todos
    }

    async fn create(app: &Router, text: &str) -> Todo {
        let response = send(app, Method::POST, "/api/todos", Some(json!({ "text": text }))).await;
        assert_eq!(response.status(), StatusCode::OK);
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_list_empty() {
        let app = memory_app();
        let response = send(&app, Method::GET, "/api/todos", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "todos": [] }));
    }

    #[tokio::test]
    async fn test_create_returns_assigned_row() {
        let app = memory_app();
        let response = send(
            &app,
            Method::POST,
            "/api/todos",
            Some(json!({ "text": "Buy milk", "completed": false })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["text"], "Buy milk");
        assert_eq!(body["completed"], false);
        assert!(body["id"].as_str().is_some());
        assert!(body["created_at"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let app = memory_app();
        create(&app, "first").await;
        create(&app, "second").await;
        create(&app, "third").await;

        let texts: Vec<_> = list(&app).await.into_iter().map(|t| t.text).collect();
        assert_eq!(texts, ["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_update_partial_fields() {
        let app = memory_app();
        let todo = create(&app, "Buy milk").await;

        let response = send(
            &app,
            Method::PUT,
            "/api/todos",
            Some(json!({ "id": todo.id, "completed": true })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(body_bytes(response).await.is_empty());

        let response = send(
            &app,
            Method::PUT,
            "/api/todos",
            Some(json!({ "id": todo.id, "text": "Buy oat milk" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let stored = &list(&app).await[0];
        assert_eq!(stored.id, todo.id);
        assert_eq!(stored.text, "Buy oat milk");
        assert!(stored.completed);
        assert_eq!(stored.created_at, todo.created_at);
    }

    #[tokio::test]
    async fn test_update_without_id_is_a_no_op() {
        let app = memory_app();
        create(&app, "unchanged").await;

        let response = send(
            &app,
            Method::PUT,
            "/api/todos",
            Some(json!({ "text": "changed" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(list(&app).await[0].text, "unchanged");
    }

    #[tokio::test]
    async fn test_delete_removes_only_target() {
        let app = memory_app();
        let keep = create(&app, "keep").await;
        let gone = create(&app, "gone").await;

        let response = send(
            &app,
            Method::DELETE,
            "/api/todos",
            Some(json!({ "id": gone.id })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        assert_eq!(list(&app).await, vec![keep]);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_a_no_op() {
        let app = memory_app();
        create(&app, "stays").await;

        let response = send(
            &app,
            Method::DELETE,
            "/api/todos",
            Some(json!({ "id": Uuid::new_v4() })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(list(&app).await.len(), 1);
    }

    #[tokio::test]
    async fn test_store_failures_are_500_with_message() {
        let app = failing_app();

        let response = send(&app, Method::GET, "/api/todos", None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "error": "connection refused" }));

        let response = send(&app, Method::POST, "/api/todos", Some(json!({ "text": "x" }))).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("not-null"));

        let response = send(
            &app,
            Method::PUT,
            "/api/todos",
            Some(json!({ "id": Uuid::new_v4(), "completed": true })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = send(
            &app,
            Method::DELETE,
            "/api/todos",
            Some(json!({ "id": Uuid::new_v4() })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_malformed_body_is_500() {
        let app = memory_app();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/todos")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_json(response).await["error"].is_string());

        let response = send(
            &app,
            Method::DELETE,
            "/api/todos",
            Some(json!({ "id": "not-a-uuid" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert!(list(&app).await.is_empty());
    }

    #[tokio::test]
    async fn test_diagnostic_routes() {
        let app = memory_app();

        let response = send(&app, Method::GET, "/api/test", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Test API route working" })
        );

        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
