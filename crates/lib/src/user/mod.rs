//! User entity for QnA
//!
//! Holds the `User` record, the raw form payload submitted by browsers, and
//! the business-rule errors raised while handling user requests.

pub mod errors;
pub mod types;

pub use errors::UserError;
pub use types::*;
