use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Todo;

/// Single resource path served by the gateway
pub const TODOS_PATH: &str = "/api/todos";

/// Liveness route returning a static message
pub const TEST_PATH: &str = "/api/test";

// ============================================================================
// Todo API Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    pub text: String,

    #[serde(default)]
    pub completed: bool,
}

impl CreateTodoRequest {
    /// New, not yet completed item
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

/// Partial update: only the fields that are present are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    pub id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodoRequest {
    pub fn text(id: Uuid, text: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            text: Some(text.into()),
            completed: None,
        }
    }

    pub fn completed(id: Uuid, completed: bool) -> Self {
        Self {
            id: Some(id),
            text: None,
            completed: Some(completed),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTodoRequest {
    pub id: Option<Uuid>,
}

impl DeleteTodoRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id: Some(id) }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTodosResponse {
    pub todos: Vec<Todo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Error Types
// ============================================================================

/// API error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults_completed() {
        let request: CreateTodoRequest = serde_json::from_str(r#"{"text":"Walk dog"}"#).unwrap();
        assert_eq!(request, CreateTodoRequest::new("Walk dog"));
    }

    #[test]
    fn test_update_request_omits_absent_fields() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(UpdateTodoRequest::completed(id, true)).unwrap();
        assert_eq!(json["completed"], true);
        assert!(json.get("text").is_none());
    }

    #[test]
    fn test_update_request_without_id() {
        let request: UpdateTodoRequest = serde_json::from_str(r#"{"text":"x"}"#).unwrap();
        assert_eq!(request.id, None);
        assert_eq!(request.text.as_deref(), Some("x"));
        assert_eq!(request.completed, None);
    }

    #[test]
    fn test_error_response_carries_only_error() {
        let json = serde_json::to_string(&ErrorResponse::new("boom")).unwrap();
        assert_eq!(json, r#"{"error":"boom"}"#);
    }
}
