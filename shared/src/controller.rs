//! Client-side list state and the request contract that keeps it in sync with
//! the gateway.
//!
//! The state is a plain value driven by [`TodoListState::reduce`]. A user
//! command is first resolved against the current state with [`plan`], the
//! resulting request is sent with [`perform`], and the action it yields is
//! reduced into the next state. Local state is only changed once the backend
//! has confirmed the request.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::api::{CreateTodoRequest, DeleteTodoRequest, UpdateTodoRequest};
use crate::models::Todo;

/// Failure talking to the gateway
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("HTTP error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Transport used by the list controller.
///
/// Not `Send`: the browser implementation holds JS values.
#[async_trait(?Send)]
pub trait TodoApi {
    /// All items, newest first.
    async fn list(&self) -> Result<Vec<Todo>, ClientError>;

    /// Insert one item and return it with its backend-assigned id and timestamp.
    async fn create(&self, request: &CreateTodoRequest) -> Result<Todo, ClientError>;

    async fn update(&self, request: &UpdateTodoRequest) -> Result<(), ClientError>;

    async fn delete(&self, request: &DeleteTodoRequest) -> Result<(), ClientError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Add,
    Delete,
    Edit,
    Toggle,
}

impl Operation {
    /// Message shown to the user when the operation fails
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch todos. Please try again.",
            Operation::Add => "Failed to add todo. Please try again.",
            Operation::Delete => "Failed to delete todo. Please try again.",
            Operation::Edit => "Failed to update todo. Please try again.",
            Operation::Toggle => "Failed to toggle todo. Please try again.",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Operation::List => "fetching",
            Operation::Add => "adding",
            Operation::Delete => "deleting",
            Operation::Edit => "updating",
            Operation::Toggle => "toggling",
        }
    }
}

/// The single item currently being edited and its unsaved text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: Uuid,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListState {
    pub todos: Vec<Todo>,
    pub loading: bool,
    pub error: Option<String>,
    /// At most one item is in edit mode at a time.
    pub editing: Option<EditDraft>,
}

impl Default for TodoListState {
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            loading: true,
            error: None,
            editing: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoAction {
    Started(Operation),
    Loaded(Vec<Todo>),
    Added(Todo),
    Removed(Uuid),
    BeginEdit { id: Uuid, text: String },
    EditChanged(String),
    CancelEdit,
    TextSaved { id: Uuid, text: String },
    CompletedSet { id: Uuid, completed: bool },
    Failed(Operation),
}

impl TodoListState {
    pub fn find(&self, id: Uuid) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn is_editing(&self, id: Uuid) -> bool {
        self.editing.as_ref().is_some_and(|draft| draft.id == id)
    }

    pub fn reduce(mut self, action: TodoAction) -> Self {
        match action {
            TodoAction::Started(operation) => {
                self.error = None;
                if operation == Operation::List {
                    self.loading = true;
                }
            }
            TodoAction::Loaded(todos) => {
                self.todos = todos;
                self.loading = false;
            }
            TodoAction::Added(todo) => {
                self.todos.insert(0, todo);
            }
            TodoAction::Removed(id) => {
                self.todos.retain(|todo| todo.id != id);
                if self.is_editing(id) {
                    self.editing = None;
                }
            }
            TodoAction::BeginEdit { id, text } => {
                self.editing = Some(EditDraft { id, text });
            }
            TodoAction::EditChanged(text) => {
                if let Some(draft) = self.editing.as_mut() {
                    draft.text = text;
                }
            }
            TodoAction::CancelEdit => {
                self.editing = None;
            }
            TodoAction::TextSaved { id, text } => {
                if let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) {
                    todo.text = text;
                }
                if self.is_editing(id) {
                    self.editing = None;
                }
            }
            TodoAction::CompletedSet { id, completed } => {
                if let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) {
                    todo.completed = completed;
                }
            }
            TodoAction::Failed(operation) => {
                self.error = Some(operation.failure_message().to_string());
                if operation == Operation::List {
                    self.loading = false;
                }
            }
        }
        self
    }
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Add(String),
    Delete(Uuid),
    SaveEdit,
    Toggle(Uuid),
}

/// A fully resolved request to the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoRequest {
    List,
    Create { text: String },
    Delete { id: Uuid },
    UpdateText { id: Uuid, text: String },
    SetCompleted { id: Uuid, completed: bool },
}

impl TodoRequest {
    pub fn operation(&self) -> Operation {
        match self {
            TodoRequest::List => Operation::List,
            TodoRequest::Create { .. } => Operation::Add,
            TodoRequest::Delete { .. } => Operation::Delete,
            TodoRequest::UpdateText { .. } => Operation::Edit,
            TodoRequest::SetCompleted { .. } => Operation::Toggle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Nothing to send and nothing to report.
    Skip,
    /// The command cannot be carried out against the current state.
    Reject(Operation),
    Send(TodoRequest),
}

/// Resolve a command against the current state.
pub fn plan(state: &TodoListState, command: Command) -> Plan {
    match command {
        Command::Refresh => Plan::Send(TodoRequest::List),
        Command::Add(text) => {
            if text.trim().is_empty() {
                Plan::Skip
            } else {
                Plan::Send(TodoRequest::Create { text })
            }
        }
        Command::Delete(id) => Plan::Send(TodoRequest::Delete { id }),
        Command::SaveEdit => match &state.editing {
            Some(draft) => Plan::Send(TodoRequest::UpdateText {
                id: draft.id,
                text: draft.text.clone(),
            }),
            None => Plan::Skip,
        },
        Command::Toggle(id) => match state.find(id) {
            Some(todo) => Plan::Send(TodoRequest::SetCompleted {
                id,
                completed: !todo.completed,
            }),
            None => {
                tracing::error!("Error toggling todo: {} is not in the list", id);
                Plan::Reject(Operation::Toggle)
            }
        },
    }
}

/// Send one request and translate the outcome into the action to reduce.
pub async fn perform<A: TodoApi + ?Sized>(api: &A, request: TodoRequest) -> TodoAction {
    let operation = request.operation();

    let outcome = match request {
        TodoRequest::List => api.list().await.map(TodoAction::Loaded),
        TodoRequest::Create { text } => api
            .create(&CreateTodoRequest::new(text))
            .await
            .map(TodoAction::Added),
        TodoRequest::Delete { id } => api
            .delete(&DeleteTodoRequest::new(id))
            .await
            .map(|()| TodoAction::Removed(id)),
        TodoRequest::UpdateText { id, text } => api
            .update(&UpdateTodoRequest::text(id, text.as_str()))
            .await
            .map(|()| TodoAction::TextSaved { id, text }),
        TodoRequest::SetCompleted { id, completed } => api
            .update(&UpdateTodoRequest::completed(id, completed))
            .await
            .map(|()| TodoAction::CompletedSet { id, completed }),
    };

    outcome.unwrap_or_else(|e| {
        tracing::error!("Error {} todo: {}", operation.verb(), e);
        TodoAction::Failed(operation)
    })
}

/// Owns a transport and a state and runs commands to completion one at a time.
pub struct ListController<A> {
    api: A,
    state: TodoListState,
}

impl<A: TodoApi> ListController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: TodoListState::default(),
        }
    }

    pub fn state(&self) -> &TodoListState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn into_state(self) -> TodoListState {
        self.state
    }

    pub fn dispatch(&mut self, action: TodoAction) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action);
    }

    pub async fn run(&mut self, command: Command) {
        match plan(&self.state, command) {
            Plan::Skip => {}
            Plan::Reject(operation) => {
                self.dispatch(TodoAction::Started(operation));
                self.dispatch(TodoAction::Failed(operation));
            }
            Plan::Send(request) => {
                self.dispatch(TodoAction::Started(request.operation()));
                let action = perform(&self.api, request).await;
                self.dispatch(action);
            }
        }
    }

    pub async fn refresh(&mut self) {
        self.run(Command::Refresh).await
    }

    pub async fn add(&mut self, text: impl Into<String>) {
        self.run(Command::Add(text.into())).await
    }

    pub async fn delete(&mut self, id: Uuid) {
        self.run(Command::Delete(id)).await
    }

    pub async fn toggle(&mut self, id: Uuid) {
        self.run(Command::Toggle(id)).await
    }

    /// Put `id` in edit mode with its current text. Returns false when the
    /// item is not in the list.
    pub fn begin_edit(&mut self, id: Uuid) -> bool {
        let Some(text) = self.state.find(id).map(|todo| todo.text.clone()) else {
            return false;
        };
        self.dispatch(TodoAction::BeginEdit { id, text });
        true
    }

    pub fn edit_text(&mut self, text: impl Into<String>) {
        self.dispatch(TodoAction::EditChanged(text.into()));
    }

    pub fn cancel_edit(&mut self) {
        self.dispatch(TodoAction::CancelEdit);
    }

    pub async fn save_edit(&mut self) {
        self.run(Command::SaveEdit).await
    }
}
