// Database models for Diesel
use diesel::prelude::*;
use todo_shared::{CreateTodoRequest, UpdateTodoRequest};

/// Insertable row; `id` and `created_at` come from column defaults
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = crate::schema::todos)]
pub struct NewTodo {
    pub text: String,
    pub completed: bool,
}

impl From<CreateTodoRequest> for NewTodo {
    fn from(request: CreateTodoRequest) -> Self {
        NewTodo {
            text: request.text,
            completed: request.completed,
        }
    }
}

/// Partial update; `None` fields are left out of the UPDATE statement
#[derive(Debug, Clone, Default, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = crate::schema::todos)]
pub struct TodoChanges {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

impl TodoChanges {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none()
    }
}

impl From<&UpdateTodoRequest> for TodoChanges {
    fn from(request: &UpdateTodoRequest) -> Self {
        TodoChanges {
            text: request.text.clone(),
            completed: request.completed,
        }
    }
}
