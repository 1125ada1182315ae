//! Error types for the user system
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error("No user with id {id}")]
    IdNotFound { id: i64 },

    /// The session user tried to act on another user's profile.
    #[error("Not allowed to access user {id}")]
    Forbidden { id: i64 },

    #[error("Invalid submission: {reason}")]
    Validation { reason: String },

    #[error("Password does not match")]
    PasswordMismatch,
}

impl UserError {
    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            UserError::UserNotFound { .. } | UserError::IdNotFound { .. }
        )
    }
}
