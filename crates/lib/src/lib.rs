//!
//! QnA: user management for a Q&A web application.
//! This library provides the framework-agnostic core behind the web server.
//!
//! ## Core Concepts
//!
//! * **Users (`user::User`)**: A member of the site, identified by a numeric `id` assigned by
//!   the store and a unique, human-chosen `user_id` used for login.
//! * **Stores (`store::UserStore`)**: A pluggable persistence layer for users, with an
//!   in-memory backend and SQL backends (SQLite, PostgreSQL).
//! * **Sessions (`session::Session`)**: The per-client record holding the authenticated user,
//!   passed explicitly into every request.
//! * **Controller (`controller::UserController`)**: Maps each user-facing operation to a store
//!   call and decides between rendering a view and redirecting.

pub mod controller;
pub mod session;
pub mod store;
pub mod user;

pub use controller::{Page, UserController, View};
pub use session::{Session, SessionStore};
pub use store::UserStore;
pub use user::{User, UserForm};

/// Result type used throughout the QnA library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the QnA library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Business-rule errors raised while handling user requests
    #[error(transparent)]
    User(user::UserError),

    /// Structured persistence errors from the store module
    #[error(transparent)]
    Store(store::StoreError),

    /// Session access errors
    #[error(transparent)]
    Session(session::SessionError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::User(_) => "user",
            Error::Store(_) => "store",
            Error::Session(_) => "session",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_not_found(),
            Error::Store(store_err) => store_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates the caller may not act on the resource.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Error::User(user::UserError::Forbidden { .. }))
    }

    /// Check if this error indicates invalid submitted data.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::User(user::UserError::Validation { .. }))
    }

    /// Check if this error indicates a supplied password did not match.
    pub fn is_password_mismatch(&self) -> bool {
        matches!(self, Error::User(user::UserError::PasswordMismatch))
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_conflict(),
            _ => false,
        }
    }
}

impl From<user::UserError> for Error {
    fn from(err: user::UserError) -> Self {
        Error::User(err)
    }
}

impl From<store::StoreError> for Error {
    fn from(err: store::StoreError) -> Self {
        Error::Store(err)
    }
}

impl From<session::SessionError> for Error {
    fn from(err: session::SessionError) -> Self {
        Error::Session(err)
    }
}
