//! In-memory user store
//!
//! Suitable for testing, development, or single-node deployments where the
//! whole table is saved to a JSON file on shutdown.

mod persistence;

use std::any::Any;
use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Result;
use crate::store::{StoreError, UserStore};
use crate::user::User;

/// Users keyed by id, plus the id the next insert receives.
#[derive(Debug, Clone)]
pub(crate) struct UserTable {
    pub(crate) users: BTreeMap<i64, User>,
    pub(crate) next_id: i64,
}

impl Default for UserTable {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// A simple in-memory store using a `BTreeMap` for storage.
///
/// The uniqueness check on `user_id` and the insert happen under one write
/// lock, so concurrent sign-ups cannot both claim the same login name.
///
/// Persistence is available via `save_to_file` and `load_from_file`,
/// serializing the table to JSON.
#[derive(Debug, Default)]
pub struct InMemory {
    pub(crate) table: RwLock<UserTable>,
}

impl InMemory {
    /// Creates a new, empty `InMemory` store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves every user to `path` as JSON.
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        persistence::save_to_file(self, path).await
    }

    /// Loads a store previously written by [`InMemory::save_to_file`].
    ///
    /// If the file does not exist, a new, empty store is returned.
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        persistence::load_from_file(path).await
    }
}

#[async_trait]
impl UserStore for InMemory {
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>> {
        let table = self.table.read().await;
        Ok(table
            .users
            .values()
            .find(|u| u.user_id == user_id)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let table = self.table.read().await;
        Ok(table.users.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let table = self.table.read().await;
        Ok(table.users.values().cloned().collect())
    }

    async fn save(&self, mut user: User) -> Result<User> {
        let mut table = self.table.write().await;
        match user.id {
            None => {
                if table.users.values().any(|u| u.user_id == user.user_id) {
                    return Err(StoreError::DuplicateUserId {
                        user_id: user.user_id,
                    }
                    .into());
                }
                let id = table.next_id;
                table.next_id += 1;
                user.id = Some(id);
                table.users.insert(id, user.clone());
            }
            Some(id) => {
                if table
                    .users
                    .values()
                    .any(|u| u.user_id == user.user_id && u.id != Some(id))
                {
                    return Err(StoreError::DuplicateUserId {
                        user_id: user.user_id,
                    }
                    .into());
                }
                match table.users.get_mut(&id) {
                    Some(stored) => *stored = user.clone(),
                    None => return Err(StoreError::UserNotFound { id }.into()),
                }
            }
        }
        Ok(user)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.table.read().await.users.len())
    }

    fn kind_label(&self) -> &'static str {
        "inmemory"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
