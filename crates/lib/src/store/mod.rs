//! Storage for QnA users
//!
//! This module provides the `UserStore` trait and its backend implementations.
//!
//! The trait defines the lookups and the single write operation the request
//! handlers need, so the handling logic stays independent of where users are
//! actually persisted.

use std::any::Any;

use async_trait::async_trait;

use crate::Result;
use crate::user::User;

pub mod errors;
mod in_memory;
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub mod sql;

pub use errors::StoreError;
pub use in_memory::InMemory;
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub use sql::{DbKind, SqlxBackend};

/// Persistence abstraction for users.
///
/// All stores must be `Send` and `Sync` to be shared across request handlers,
/// and implement `Any` to allow for downcasting if needed (e.g. to persist an
/// `InMemory` store on shutdown).
///
/// Lookups return `Ok(None)` when nothing matches; only genuine storage
/// failures are errors.
#[async_trait]
pub trait UserStore: Send + Sync + Any {
    /// Find a user by login identifier.
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>>;

    /// Find a user by store-assigned id.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    /// All users, ordered by id.
    async fn find_all(&self) -> Result<Vec<User>>;

    /// Insert or update a user.
    ///
    /// A user without an id is inserted and gets the next id assigned; the
    /// returned copy carries it. A user with an id replaces the stored record
    /// with that id, failing with [`StoreError::UserNotFound`] if none exists.
    ///
    /// Inserting a `user_id` that is already taken fails with
    /// [`StoreError::DuplicateUserId`].
    async fn save(&self, user: User) -> Result<User>;

    /// Number of stored users.
    async fn count(&self) -> Result<usize>;

    /// Short backend label for logs and health reporting.
    fn kind_label(&self) -> &'static str;

    /// Returns a reference to the store instance as a `dyn Any`.
    fn as_any(&self) -> &dyn Any;
}
