use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use todo_shared::{
    ClientError, CreateTodoRequest, DeleteTodoRequest, ErrorResponse, ListTodosResponse, Todo,
    TodoApi, UpdateTodoRequest, TODOS_PATH,
};

/// Browser transport; paths are relative to the page origin
#[derive(Clone, Copy, Default)]
pub struct ApiService;

fn network(e: gloo_net::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

async fn check(response: Response) -> Result<Response, ClientError> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);

    Err(ClientError::Status { status, message })
}

async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response
        .json()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl TodoApi for ApiService {
    async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let response = Request::get(TODOS_PATH).send().await.map_err(network)?;
        let body: ListTodosResponse = json(check(response).await?).await?;
        Ok(body.todos)
    }

    async fn create(&self, request: &CreateTodoRequest) -> Result<Todo, ClientError> {
        let response = Request::post(TODOS_PATH)
            .json(request)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        json(check(response).await?).await
    }

    async fn update(&self, request: &UpdateTodoRequest) -> Result<(), ClientError> {
        let response = Request::put(TODOS_PATH)
            .json(request)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        check(response).await?;
        Ok(())
    }

    async fn delete(&self, request: &DeleteTodoRequest) -> Result<(), ClientError> {
        let response = Request::delete(TODOS_PATH)
            .json(request)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        check(response).await?;
        Ok(())
    }
}
