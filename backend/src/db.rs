use anyhow::Context;
use diesel::prelude::*;
use diesel_async::{
    pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager, ManagerConfig},
    AsyncPgConnection, RunQueryDsl,
};
use todo_shared::Todo;
use uuid::Uuid;

use crate::models::{NewTodo, TodoChanges};

pub type DbPool = Pool<AsyncPgConnection>;

async fn establish_tls_connection(config: String) -> diesel::ConnectionResult<AsyncPgConnection> {
    // Set up rustls TLS configuration
    let root_store =
        rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();
    let tls = tokio_postgres_rustls::MakeRustlsConnect::new(tls_config);

    // Parse the connection string and connect with TLS
    let (client, connection) = tokio_postgres::connect(&config, tls)
        .await
        .map_err(|e| diesel::ConnectionError::BadConnection(e.to_string()))?;

    // Spawn the connection task
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("Connection error: {}", e);
        }
    });

    AsyncPgConnection::try_from(client).await
}

/// Build the connection pool. Hosted databases expect TLS; plain connections
/// are for local Postgres only.
pub fn establish_connection_pool(
    database_url: &str,
    max_size: usize,
    tls: bool,
) -> anyhow::Result<DbPool> {
    let manager = if tls {
        let mut manager_config = ManagerConfig::default();
        manager_config.custom_setup =
            Box::new(|url| Box::pin(establish_tls_connection(url.to_string())));
        AsyncDieselConnectionManager::<AsyncPgConnection>::new_with_config(
            database_url,
            manager_config,
        )
    } else {
        AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url)
    };

    let pool = Pool::builder(manager)
        .max_size(max_size)
        .build()
        .context("Failed to create database pool")?;

    Ok(pool)
}

// Todo database operations
pub mod todos {
    use super::*;

    /// Newest first
    pub async fn list_all(conn: &mut AsyncPgConnection) -> anyhow::Result<Vec<Todo>> {
        use crate::schema::todos::dsl::*;

        let items = todos
            .order_by(created_at.desc())
            .load::<Todo>(conn)
            .await?;

        Ok(items)
    }

    pub async fn create(conn: &mut AsyncPgConnection, new_todo: &NewTodo) -> anyhow::Result<Todo> {
        use crate::schema::todos::dsl::*;

        let created = diesel::insert_into(todos)
            .values(new_todo)
            .get_result::<Todo>(conn)
            .await?;

        Ok(created)
    }

    /// Returns the number of rows touched. A missing id is bound as NULL and
    /// matches nothing.
    pub async fn update(
        conn: &mut AsyncPgConnection,
        todo_id: Option<Uuid>,
        changes: &TodoChanges,
    ) -> anyhow::Result<usize> {
        use crate::schema::todos::dsl::*;

        // Diesel refuses an UPDATE with an empty SET clause
        if changes.is_empty() {
            return Ok(0);
        }

        let rows = diesel::update(todos.filter(id.nullable().eq(todo_id)))
            .set(changes)
            .execute(conn)
            .await?;

        Ok(rows)
    }

    pub async fn delete(conn: &mut AsyncPgConnection, todo_id: Option<Uuid>) -> anyhow::Result<usize> {
        use crate::schema::todos::dsl::*;

        let rows = diesel::delete(todos.filter(id.nullable().eq(todo_id)))
            .execute(conn)
            .await?;

        Ok(rows)
    }
}
