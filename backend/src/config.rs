use anyhow::{bail, Context, Result};
use std::env;

/// Where todos are persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Postgres {
        database_url: String,
        tls: bool,
        pool_size: usize,
    },
    /// Process-local, lost on restart. Local development only.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub store: StoreConfig,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub frontend_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let store = match lookup("TODO_STORE").as_deref().unwrap_or("postgres") {
            "postgres" => StoreConfig::Postgres {
                database_url: lookup("DATABASE_URL").context("DATABASE_URL must be set")?,
                tls: parse_bool(
                    "DATABASE_TLS",
                    &lookup("DATABASE_TLS").unwrap_or_else(|| "true".to_string()),
                )?,
                pool_size: lookup("DATABASE_POOL_SIZE")
                    .unwrap_or_else(|| "10".to_string())
                    .parse()
                    .context("DATABASE_POOL_SIZE must be a valid number")?,
            },
            "memory" => StoreConfig::Memory,
            other => bail!("TODO_STORE must be 'postgres' or 'memory', got '{}'", other),
        };

        Ok(Self {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            store,
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS").map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
            frontend_dir: lookup("FRONTEND_DIR").unwrap_or_else(|| "frontend/dist".to_string()),
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("{} must be true or false, got '{}'", key, value),
    }
}
