//! Store creation from the command-line backend configuration.

use std::{path::PathBuf, sync::Arc};

use qna::{
    UserStore,
    store::{InMemory, SqlxBackend},
};

use crate::cli::{Backend, BackendConfig};

/// SQLite database file inside the data directory
pub const SQLITE_FILE: &str = "qna.db";
/// In-memory persistence file inside the data directory
pub const JSON_FILE: &str = "qna.json";

/// Redact credentials from a PostgreSQL connection URL for safe logging
pub fn redact_postgres_url(url: &str) -> String {
    let Ok(parsed) = url::Url::parse(url) else {
        return "postgres://***@<unparsable-url>".to_string();
    };
    let mut redacted = parsed.clone();
    if !parsed.username().is_empty() {
        let _ = redacted.set_username("***");
    }
    if parsed.password().is_some() {
        let _ = redacted.set_password(Some("***"));
    }
    redacted.to_string()
}

/// Short label for the configured backend.
pub fn backend_label(config: &BackendConfig) -> &'static str {
    match config.backend {
        Backend::Sqlite => "sqlite",
        Backend::Postgres => "postgres",
        Backend::Inmemory => "inmemory",
    }
}

/// Path of the in-memory persistence file for `config`.
pub fn json_path(config: &BackendConfig) -> PathBuf {
    config.data_dir().join(JSON_FILE)
}

/// Open the user store described by `config`.
pub async fn create_backend(
    config: &BackendConfig,
) -> Result<Arc<dyn UserStore>, Box<dyn std::error::Error>> {
    let data_dir = config.data_dir();
    tokio::fs::create_dir_all(&data_dir).await?;

    match config.backend {
        Backend::Sqlite => {
            let db_path = data_dir.join(SQLITE_FILE);
            tracing::info!("Using SQLite backend at {}", db_path.display());
            Ok(Arc::new(SqlxBackend::open_sqlite(&db_path).await?))
        }
        Backend::Postgres => {
            let url = config
                .postgres_url
                .as_ref()
                .ok_or("PostgreSQL backend requires --postgres-url or QNA_POSTGRES_URL")?;

            let display_url = redact_postgres_url(url);
            tracing::info!("Connecting to PostgreSQL backend at {}", display_url);

            match SqlxBackend::connect_postgres(url).await {
                Ok(backend) => {
                    tracing::info!("Connected to PostgreSQL successfully");
                    Ok(Arc::new(backend))
                }
                Err(e) => {
                    Err(format!("Failed to connect to PostgreSQL at {display_url}: {e}").into())
                }
            }
        }
        Backend::Inmemory => {
            let json_path = data_dir.join(JSON_FILE);
            tracing::info!(
                "Using in-memory backend with persistence at {}",
                json_path.display()
            );
            match InMemory::load_from_file(&json_path).await {
                Ok(store) => Ok(Arc::new(store)),
                Err(e) => {
                    tracing::warn!("Failed to load {}: {e}. Starting empty.", json_path.display());
                    Ok(Arc::new(InMemory::new()))
                }
            }
        }
    }
}
