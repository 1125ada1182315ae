//! Persistence operations for the InMemory store
//!
//! Serializes the user table to and from a JSON file.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tokio::sync::RwLock;

use super::{InMemory, UserTable};
use crate::{Result, store::StoreError, user::User};

/// The current persistence file format version.
/// v0 indicates this is an unstable format subject to breaking changes.
const PERSISTENCE_VERSION: u8 = 0;

/// Helper to check if version is default (0) for serde skip_serializing_if
fn is_v0(v: &u8) -> bool {
    *v == 0
}

/// Validates the persistence version during deserialization.
fn validate_persistence_version<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u8::deserialize(deserializer)?;
    if version != PERSISTENCE_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported persistence version {version}; only version {PERSISTENCE_VERSION} is supported"
        )));
    }
    Ok(version)
}

/// On-disk layout of an InMemory store
#[derive(Serialize, Deserialize)]
struct SerializableStore {
    #[serde(
        rename = "_v",
        default,
        skip_serializing_if = "is_v0",
        deserialize_with = "validate_persistence_version"
    )]
    version: u8,
    next_id: i64,
    users: Vec<User>,
}

pub(super) async fn save_to_file<P: AsRef<Path>>(store: &InMemory, path: P) -> Result<()> {
    let serializable = {
        let table = store.table.read().await;
        SerializableStore {
            version: PERSISTENCE_VERSION,
            next_id: table.next_id,
            users: table.users.values().cloned().collect(),
        }
    };

    let json = serde_json::to_string_pretty(&serializable)
        .map_err(|e| StoreError::SerializationFailed { source: e })?;
    tokio::fs::write(path.as_ref(), json)
        .await
        .map_err(|e| StoreError::FileIo { source: e })?;

    tracing::info!(
        users = serializable.users.len(),
        "Saved user store to {}",
        path.as_ref().display()
    );
    Ok(())
}

pub(super) async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<InMemory> {
    let path = path.as_ref();
    let json = match tokio::fs::read_to_string(path).await {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(InMemory::new()),
        Err(e) => return Err(StoreError::FileIo { source: e }.into()),
    };

    let serializable: SerializableStore = serde_json::from_str(&json)
        .map_err(|e| StoreError::DeserializationFailed { source: e })?;

    let mut table = UserTable::default();
    for user in serializable.users {
        if let Some(id) = user.id {
            table.users.insert(id, user);
        }
    }
    // Never hand out an id that is already in use, even if the file was edited by hand.
    let max_id = table.users.keys().next_back().copied().unwrap_or(0);
    table.next_id = serializable.next_id.max(max_id + 1);

    Ok(InMemory {
        table: RwLock::new(table),
    })
}
