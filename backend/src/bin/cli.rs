use async_trait::async_trait;
use clap::{Parser, Subcommand};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use todo_shared::{
    ClientError, CreateTodoRequest, DeleteTodoRequest, ErrorResponse, ListController,
    ListTodosResponse, MessageResponse, Todo, TodoApi, TodoListState, UpdateTodoRequest,
    TEST_PATH, TODOS_PATH,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "todo-cli")]
#[command(about = "CLI for managing todos via the backend API")]
#[command(
    long_about = "A command-line interface for the todo backend server.\n\n\
    Every command loads the current list first, applies one change and\n\
    prints the list as it stands after the server confirmed the change."
)]
struct Cli {
    /// Backend server URL to connect to.
    #[arg(
        short,
        long,
        default_value = "http://localhost:8080",
        env = "TODO_API_URL"
    )]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all todos, newest first
    ///
    /// Displays each todo with a checkbox indicator (○ pending, ✓ completed)
    /// and its short ID.
    List,

    /// Add a new todo
    Add {
        /// Text of the todo, stored as typed. Blank text is ignored.
        text: String,
    },

    /// Permanently delete a todo
    Delete {
        /// The UUID of the todo to delete.
        id: Uuid,
    },

    /// Replace the text of a todo
    Edit {
        /// The UUID of the todo to edit.
        id: Uuid,

        /// New text.
        text: String,
    },

    /// Flip a todo between pending and completed
    Toggle {
        /// The UUID of the todo to toggle.
        id: Uuid,
    },

    /// Check that the API is reachable
    Ping,
}

/// Talks to the gateway over HTTP
struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn ping(&self) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .get(self.url(TEST_PATH))
            .send()
            .await
            .map_err(network)?;
        json(check(response).await?).await
    }
}

fn network(e: reqwest::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

/// Turn non-2xx responses into errors, keeping the server's message
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response
        .json()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl TodoApi for HttpApi {
    async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let response = self
            .client
            .get(self.url(TODOS_PATH))
            .send()
            .await
            .map_err(network)?;
        let body: ListTodosResponse = json(check(response).await?).await?;
        Ok(body.todos)
    }

    async fn create(&self, request: &CreateTodoRequest) -> Result<Todo, ClientError> {
        let response = self
            .client
            .post(self.url(TODOS_PATH))
            .json(request)
            .send()
            .await
            .map_err(network)?;
        json(check(response).await?).await
    }

    async fn update(&self, request: &UpdateTodoRequest) -> Result<(), ClientError> {
        let response = self
            .client
            .put(self.url(TODOS_PATH))
            .json(request)
            .send()
            .await
            .map_err(network)?;
        check(response).await?;
        Ok(())
    }

    async fn delete(&self, request: &DeleteTodoRequest) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(TODOS_PATH))
            .json(request)
            .send()
            .await
            .map_err(network)?;
        check(response).await?;
        Ok(())
    }
}

fn print_todos(state: &TodoListState) {
    if state.todos.is_empty() {
        println!("No todos found.");
        return;
    }
    for todo in &state.todos {
        let status = if todo.completed { "✓" } else { "○" };
        println!("{} [{}] {}", status, todo.short_id(), todo.text);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = HttpApi::new(&cli.base_url);

    if let Commands::Ping = cli.command {
        let reply = api.ping().await?;
        println!("{}", reply.message);
        return Ok(());
    }

    let mut controller = ListController::new(api);
    controller.refresh().await;

    // Nothing to apply a change to if the list could not be loaded
    if controller.state().error.is_none() {
        match cli.command {
            Commands::List | Commands::Ping => {}
            Commands::Add { text } => controller.add(text).await,
            Commands::Delete { id } => controller.delete(id).await,
            Commands::Edit { id, text } => {
                if controller.begin_edit(id) {
                    controller.edit_text(text);
                    controller.save_edit().await;
                } else {
                    eprintln!("No todo with id {}", id);
                    std::process::exit(1);
                }
            }
            Commands::Toggle { id } => controller.toggle(id).await,
        }
    }

    let state = controller.into_state();
    if state.error.is_none() || !state.todos.is_empty() {
        print_todos(&state);
    }

    if let Some(error) = &state.error {
        eprintln!("{}", error);
        std::process::exit(1);
    }

    Ok(())
}
