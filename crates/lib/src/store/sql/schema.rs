//! SQL schema definitions and version check.
//!
//! The schema is created from code rather than SQL files so that dialect
//! differences between SQLite and PostgreSQL (auto-increment keys) can be
//! handled in one place.

use crate::Result;
use crate::store::StoreError;

use super::{DbKind, SqlxBackend};

/// Current schema version.
pub const SCHEMA_VERSION: i64 = 1;

// BIGINT (64-bit) used for portability between SQLite and PostgreSQL
const CREATE_SCHEMA_VERSION: &str = "CREATE TABLE IF NOT EXISTS schema_version (
    version BIGINT PRIMARY KEY
)";

const CREATE_USERS_SQLITE: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    name TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT ''
)";

const CREATE_USERS_POSTGRES: &str = "CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    user_id TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    name TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT ''
)";

/// Statements creating the tables for the given dialect.
pub fn create_tables(kind: DbKind) -> [&'static str; 2] {
    let users = match kind {
        DbKind::Sqlite => CREATE_USERS_SQLITE,
        DbKind::Postgres => CREATE_USERS_POSTGRES,
    };
    [CREATE_SCHEMA_VERSION, users]
}

/// Initialize the database schema.
///
/// Creates tables if they don't exist and records `SCHEMA_VERSION` in a fresh
/// database. A database stamped with any other version is rejected.
pub async fn initialize(backend: &SqlxBackend) -> Result<()> {
    let pool = backend.pool();

    for statement in create_tables(backend.kind()) {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| StoreError::SqlxError {
                reason: format!("Schema creation failed: {e} - SQL: {statement}"),
                source: Some(e),
            })?;
    }

    let row: Option<(i64,)> = sqlx::query_as("SELECT version FROM schema_version")
        .fetch_optional(pool)
        .await
        .map_err(|e| StoreError::SqlxError {
            reason: format!("Failed to check schema version: {e}"),
            source: Some(e),
        })?;

    match row {
        None => {
            sqlx::query("INSERT INTO schema_version (version) VALUES ($1)")
                .bind(SCHEMA_VERSION)
                .execute(pool)
                .await
                .map_err(|e| StoreError::SqlxError {
                    reason: format!("Failed to initialize schema version: {e}"),
                    source: Some(e),
                })?;
            tracing::info!(version = SCHEMA_VERSION, "Initialized SQL schema");
        }
        Some((current,)) if current != SCHEMA_VERSION => {
            return Err(StoreError::SqlxError {
                reason: format!(
                    "Unsupported schema version {current}; this build supports version {SCHEMA_VERSION}"
                ),
                source: None,
            }
            .into());
        }
        Some(_) => {}
    }

    Ok(())
}
