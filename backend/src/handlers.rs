use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
};
use todo_shared::{
    CreateTodoRequest, DeleteTodoRequest, ListTodosResponse, MessageResponse, Todo,
    UpdateTodoRequest,
};

use crate::error::ApiResult;
use crate::models::{NewTodo, TodoChanges};
use crate::routes::AppState;

// Todo handlers
pub async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<ListTodosResponse>> {
    let todos = state.store.list().await?;

    Ok(Json(ListTodosResponse { todos }))
}

pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> ApiResult<Json<Todo>> {
    let Json(request) = payload?;

    let todo = state.store.create(NewTodo::from(request)).await?;
    tracing::debug!("Created todo {}", todo.id);

    Ok(Json(todo))
}

pub async fn update_todo(
    State(state): State<AppState>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(request) = payload?;

    let changes = TodoChanges::from(&request);
    let rows = state.store.update(request.id, changes).await?;
    tracing::debug!("Updated todo {:?} ({} rows)", request.id, rows);

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_todo(
    State(state): State<AppState>,
    payload: Result<Json<DeleteTodoRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(request) = payload?;

    let rows = state.store.delete(request.id).await?;
    tracing::debug!("Deleted todo {:?} ({} rows)", request.id, rows);

    Ok(StatusCode::NO_CONTENT)
}

// Diagnostics
pub async fn test_route() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Test API route working".to_string(),
    })
}

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
