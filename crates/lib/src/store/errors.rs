//! Error types for user stores.
//!
//! Structured errors for persistence operations, shared by every backend.

use thiserror::Error;

/// Errors that can occur during store operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// An update targeted an id that has no stored user.
    #[error("User not found: id {id}")]
    UserNotFound {
        /// The id that was not found
        id: i64,
    },

    /// Insert would violate `user_id` uniqueness.
    #[error("User id already taken: {user_id}")]
    DuplicateUserId {
        /// The conflicting login identifier
        user_id: String,
    },

    /// Serialization failed.
    #[error("Serialization failed")]
    SerializationFailed {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization failed.
    #[error("Deserialization failed")]
    DeserializationFailed {
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// File I/O error.
    #[error("File I/O error")]
    FileIo {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// SQL backend error.
    #[cfg(any(feature = "sqlite", feature = "postgres"))]
    #[error("SQL error: {reason}")]
    SqlxError {
        /// Description including the failing operation
        reason: String,
        /// The underlying sqlx error, if any
        #[source]
        source: Option<sqlx::Error>,
    },
}

impl StoreError {
    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::UserNotFound { .. })
    }

    /// Check if this error indicates a uniqueness conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::DuplicateUserId { .. })
    }
}
