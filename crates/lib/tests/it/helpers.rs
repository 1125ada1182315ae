#![allow(dead_code)]

use std::sync::Arc;

use qna::{
    Session, SessionStore, User, UserController, UserForm,
    store::{InMemory, UserStore},
    user::LoginForm,
};

// Re-export tokio test macro for convenience
pub use tokio;

// ==========================
// CORE TEST FACTORIES
// ==========================

/// Creates a test store based on TEST_BACKEND env var.
///
/// Supported values:
/// - "inmemory" or unset: InMemory store (default)
/// - "sqlite": SQLite in-memory database (requires `sqlite` feature)
///
/// # Example
/// ```bash
/// # Run tests with InMemory (default)
/// cargo test
///
/// # Run tests with SQLite
/// TEST_BACKEND=sqlite cargo test --features sqlite
/// ```
pub async fn test_store() -> Arc<dyn UserStore> {
    match std::env::var("TEST_BACKEND").as_deref() {
        Ok("sqlite") => {
            #[cfg(feature = "sqlite")]
            {
                use qna::store::SqlxBackend;
                Arc::new(
                    SqlxBackend::sqlite_in_memory()
                        .await
                        .expect("Failed to create SQLite store"),
                )
            }
            #[cfg(not(feature = "sqlite"))]
            {
                panic!("TEST_BACKEND=sqlite requires the 'sqlite' feature to be enabled")
            }
        }
        Ok("inmemory") | Ok("") | Err(_) => Arc::new(InMemory::new()),
        Ok(other) => {
            panic!("Unknown TEST_BACKEND value: {other}. Supported: inmemory, sqlite")
        }
    }
}

/// Controller over an empty test store.
pub async fn test_controller() -> UserController {
    UserController::new(test_store().await)
}

/// The sign-up form for a user named `user_id` with password `password`.
pub fn signup_form(user_id: &str, password: &str) -> UserForm {
    UserForm {
        user_id: Some(user_id.to_string()),
        password: Some(password.to_string()),
        name: Some(format!("{user_id} name")),
        email: Some(format!("{user_id}@example.com")),
    }
}

/// An update form carrying `password` and new name/email.
pub fn update_form(password: &str, name: &str, email: &str) -> UserForm {
    UserForm {
        user_id: None,
        password: Some(password.to_string()),
        name: Some(name.to_string()),
        email: Some(email.to_string()),
    }
}

/// Controller whose store holds `{id: 1, userId: "abc", password: "p1"}`.
pub async fn seeded_controller() -> UserController {
    let controller = test_controller().await;
    controller
        .create_user(Some(signup_form("abc", "p1")))
        .await
        .expect("Failed to create seed user");
    controller
}

/// A fresh anonymous session.
pub async fn anonymous_session() -> (SessionStore, Session) {
    let sessions = SessionStore::new();
    let session = sessions.open(None).await;
    (sessions, session)
}

/// A session logged in as `user_id`.
pub async fn logged_in_session(
    controller: &UserController,
    user_id: &str,
    password: &str,
) -> (SessionStore, Session) {
    let (sessions, session) = anonymous_session().await;
    controller
        .login(LoginForm::new(user_id, password), &session)
        .await
        .expect("Failed to login");
    assert!(session.is_login_user().await, "login should set the session user");
    (sessions, session)
}

/// Current stored record for `id` (panics if absent).
pub async fn stored_user(controller: &UserController, id: i64) -> User {
    controller
        .store()
        .find_by_id(id)
        .await
        .expect("store lookup failed")
        .expect("user should exist")
}
