use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Todo item matching database column order exactly.
///
/// `id` and `created_at` are always assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct Todo {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Short id shown in listings
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_wire_shape() {
        let json = r#"{
            "id": "6f1c1f2e-8d8b-4a53-9b7e-1d1a4f2b9c10",
            "text": "Buy milk",
            "completed": false,
            "created_at": "2024-05-01T12:00:00Z"
        }"#;

        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.text, "Buy milk");
        assert!(!todo.completed);
        assert_eq!(todo.short_id(), "6f1c1f2e");

        let value = serde_json::to_value(&todo).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 4);
        assert!(keys.iter().any(|k| k == "created_at"));
    }
}
