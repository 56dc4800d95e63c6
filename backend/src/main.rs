mod config;
mod db;
mod error;
mod handlers;
mod models;
mod routes;
mod schema;
mod store;

use anyhow::Result;
use axum::{
    http::{header, Method},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, StoreConfig};
use crate::routes::AppState;
use crate::store::{MemoryTodoStore, PgTodoStore, TodoStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenv::dotenv().ok();
    let config = AppConfig::from_env()?;

    tracing::info!("Starting todo backend server");

    let store: Arc<dyn TodoStore> = match &config.store {
        StoreConfig::Postgres {
            database_url,
            tls,
            pool_size,
        } => {
            let pool = db::establish_connection_pool(database_url, *pool_size, *tls)?;
            tracing::info!("Database connection pool initialized (tls: {})", tls);
            Arc::new(PgTodoStore::new(pool))
        }
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory todo store, data is lost on restart");
            Arc::new(MemoryTodoStore::new())
        }
    };

    let app = create_app(AppState::new(store), &config);

    // Run server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_app(state: AppState, config: &AppConfig) -> Router {
    let app = routes::app(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(config.cors_allowed_origins.as_deref()));

    // Serve static frontend files if the directory exists
    let frontend_dir = &config.frontend_dir;
    if std::path::Path::new(frontend_dir).exists() {
        tracing::info!("Serving frontend from {}", frontend_dir);
        let index_path = format!("{}/index.html", frontend_dir);
        let serve_dir = ServeDir::new(frontend_dir).not_found_service(ServeFile::new(index_path));
        app.fallback_service(serve_dir)
    } else {
        tracing::info!(
            "Frontend directory not found at {}, serving API only",
            frontend_dir
        );
        app
    }
}

/// Build CORS layer from the configured origins.
///
/// Without an explicit list, defaults to permissive CORS (for development only).
fn build_cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    let origins: Vec<_> = allowed_origins
        .unwrap_or_default()
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!(
            "CORS_ALLOWED_ORIGINS not set, using permissive CORS (not recommended for production)"
        );
        return CorsLayer::permissive();
    }

    tracing::info!("CORS configured for origins: {:?}", origins);
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}
