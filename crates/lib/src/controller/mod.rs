//! Request handling for the `/users` pages
//!
//! Each operation maps one user-facing request to at most a lookup and a
//! save on the store, reads or writes the session, and answers with a
//! [`Page`]. Business-rule violations come back as typed errors; deciding
//! how to present them is left to the web layer.
//!
//! Login is deliberately asymmetric: an unknown `userId` is an error, while a
//! wrong password just sends the client back to the login form.

mod page;

use std::sync::Arc;

use crate::Result;
use crate::session::Session;
use crate::store::UserStore;
use crate::user::{LoginForm, UserError, UserForm};

pub use page::{HOME, LOGIN_FORM, Page, USER_LIST, View};

/// Handles the user-management requests against a store.
#[derive(Clone)]
pub struct UserController {
    store: Arc<dyn UserStore>,
}

impl UserController {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// The store this controller writes to.
    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    pub fn sign_up_form(&self) -> Page {
        tracing::debug!(page = "sign-up form");
        View::SignUpForm.into()
    }

    /// Register a new user from the sign-up form.
    ///
    /// `None` stands for a request that carried no form at all.
    pub async fn create_user(&self, form: Option<UserForm>) -> Result<Page> {
        tracing::debug!(page = "create user");

        let form = form.ok_or_else(|| UserError::Validation {
            reason: "missing user".to_string(),
        })?;
        let user = self.store.save(form.into_new_user()?).await?;
        tracing::info!(user_id = %user.user_id, id = ?user.id, "Created user");

        Ok(Page::Redirect(USER_LIST))
    }

    pub fn login_form(&self) -> Page {
        tracing::debug!(page = "login form");
        View::LoginForm.into()
    }

    pub async fn logout(&self, session: &Session) -> Page {
        tracing::debug!(page = "logout");
        session.clear_user().await;
        Page::Redirect(HOME)
    }

    pub async fn login(&self, form: LoginForm, session: &Session) -> Result<Page> {
        tracing::debug!(page = "login");

        let (user_id, password) = form.into_credentials()?;
        let user = self
            .store
            .find_by_user_id(&user_id)
            .await?
            .ok_or_else(|| UserError::UserNotFound {
                user_id: user_id.clone(),
            })?;

        if !user.match_password(&password) {
            tracing::debug!(user_id = %user_id, "password mismatch");
            return Ok(Page::Redirect(LOGIN_FORM));
        }

        tracing::debug!(user_id = %user_id, "login succeeded");
        session.set_user(user).await;
        Ok(Page::Redirect(HOME))
    }

    pub async fn list_users(&self) -> Result<Page> {
        tracing::debug!(page = "user list");
        let users = self.store.find_all().await?;
        Ok(View::UserList { users }.into())
    }

    pub async fn profile(&self, id: i64) -> Result<Page> {
        tracing::debug!(page = "user profile", id);
        let user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(UserError::IdNotFound { id })?;
        Ok(View::Profile { user }.into())
    }

    pub async fn update_form(&self, id: i64, session: &Session) -> Result<Page> {
        tracing::debug!(page = "update form", id);

        if !session.is_login_user().await {
            tracing::debug!("not logged in");
            return Ok(Page::Redirect(LOGIN_FORM));
        }

        let user = session.user().await?;
        if !user.match_id(id) {
            tracing::debug!(id, session_id = ?user.id, "update form for another user");
            return Err(UserError::Forbidden { id }.into());
        }

        Ok(View::UpdateForm { user }.into())
    }

    /// Apply a profile update for user `id`.
    ///
    /// Requires a logged-in session for that same user and the user's current
    /// password in the form. Only password, name and email change; the stored
    /// `id` and `user_id` are kept. The session copy is refreshed afterwards.
    pub async fn update_user(&self, id: i64, form: UserForm, session: &Session) -> Result<Page> {
        tracing::debug!(page = "update user", id);

        if !session.is_login_user().await {
            tracing::debug!("not logged in");
            return Ok(Page::Redirect(LOGIN_FORM));
        }

        let session_user = session.user().await?;
        if !session_user.match_id(id) {
            tracing::debug!(id, session_id = ?session_user.id, "update of another user");
            return Err(UserError::Forbidden { id }.into());
        }

        let update = form.into_update()?;
        let mut user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(UserError::IdNotFound { id })?;

        if !user.match_password(&update.password) {
            tracing::debug!(id, "password mismatch");
            return Err(UserError::PasswordMismatch.into());
        }

        user.update(&update);
        let saved = self.store.save(user).await?;
        session.set_user(saved).await;

        Ok(Page::Redirect(USER_LIST))
    }
}
