pub mod api;
pub mod controller;
pub mod models;

pub use api::{
    CreateTodoRequest, DeleteTodoRequest, ErrorResponse, ListTodosResponse, MessageResponse,
    UpdateTodoRequest, TEST_PATH, TODOS_PATH,
};
pub use controller::{
    ClientError, Command, EditDraft, ListController, Operation, TodoAction, TodoApi,
    TodoListState,
};
pub use models::Todo;
