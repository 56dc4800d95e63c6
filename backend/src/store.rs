//! Storage seam for the todo handlers.
//!
//! Handlers only see [`TodoStore`]; the Postgres implementation forwards each
//! call to exactly one query, and the in-memory one backs local development
//! and the tests.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use todo_shared::Todo;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::{self, DbPool};
use crate::models::{NewTodo, TodoChanges};

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All rows ordered by creation time, newest first.
    async fn list(&self) -> Result<Vec<Todo>>;

    /// Insert one row and return it with its assigned id and timestamp.
    async fn create(&self, new_todo: NewTodo) -> Result<Todo>;

    /// Apply `changes` to the row matching `id`. Returns rows touched.
    async fn update(&self, id: Option<Uuid>, changes: TodoChanges) -> Result<usize>;

    /// Delete the row matching `id`. Returns rows touched.
    async fn delete(&self, id: Option<Uuid>) -> Result<usize>;
}

pub struct PgTodoStore {
    pool: DbPool,
}

impl PgTodoStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn list(&self) -> Result<Vec<Todo>> {
        let mut conn = self.pool.get().await.context("Database connection unavailable")?;
        db::todos::list_all(&mut conn).await
    }

    async fn create(&self, new_todo: NewTodo) -> Result<Todo> {
        let mut conn = self.pool.get().await.context("Database connection unavailable")?;
        db::todos::create(&mut conn, &new_todo).await
    }

    async fn update(&self, id: Option<Uuid>, changes: TodoChanges) -> Result<usize> {
        let mut conn = self.pool.get().await.context("Database connection unavailable")?;
        db::todos::update(&mut conn, id, &changes).await
    }

    async fn delete(&self, id: Option<Uuid>) -> Result<usize> {
        let mut conn = self.pool.get().await.context("Database connection unavailable")?;
        db::todos::delete(&mut conn, id).await
    }
}

/// Process-local store. Rows are kept in insertion order.
#[derive(Default)]
pub struct MemoryTodoStore {
    rows: RwLock<Vec<Todo>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn seeded(rows: Vec<Todo>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn list(&self) -> Result<Vec<Todo>> {
        // Reverse first so equal timestamps come back newest-inserted first
        let mut items: Vec<Todo> = self.rows.read().await.iter().rev().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn create(&self, new_todo: NewTodo) -> Result<Todo> {
        let todo = Todo {
            id: Uuid::new_v4(),
            text: new_todo.text,
            completed: new_todo.completed,
            created_at: Utc::now(),
        };
        self.rows.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: Option<Uuid>, changes: TodoChanges) -> Result<usize> {
        let mut rows = self.rows.write().await;
        let mut touched = 0;
        for row in rows.iter_mut().filter(|row| Some(row.id) == id) {
            if let Some(text) = &changes.text {
                row.text = text.clone();
            }
            if let Some(completed) = changes.completed {
                row.completed = completed;
            }
            touched += 1;
        }
        Ok(touched)
    }

    async fn delete(&self, id: Option<Uuid>) -> Result<usize> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| Some(row.id) != id);
        Ok(before - rows.len())
    }
}
