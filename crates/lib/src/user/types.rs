//! Core data types for the user system

use serde::{Deserialize, Serialize};

use super::errors::UserError;

/// A registered member of the site.
///
/// `id` is assigned by the store the first time the user is saved and never
/// changes afterwards. `user_id` is the login name and is unique across users.
///
/// Passwords are held and compared as plain strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier, `None` until the first save
    pub id: Option<i64>,

    /// Unique login identifier
    pub user_id: String,

    pub password: String,

    /// Display name
    pub name: String,

    pub email: String,
}

impl User {
    /// Create an unsaved user.
    pub fn new(
        user_id: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            password: password.into(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// True if this user has been saved under `id`.
    pub fn match_id(&self, id: i64) -> bool {
        self.id == Some(id)
    }

    /// Exact comparison against a candidate password.
    pub fn match_password(&self, password: &str) -> bool {
        self.password == password
    }

    /// Copy the mutable fields (password, name, email) from a submitted update.
    ///
    /// `id` and `user_id` are identity fields and are never touched.
    pub fn update(&mut self, update: &UserUpdate) {
        self.password = update.password.clone();
        self.name = update.name.clone();
        self.email = update.email.clone();
    }
}

/// Raw form payload for user creation and profile updates.
///
/// Every field is optional so that a missing field surfaces as a
/// [`UserError::Validation`] instead of a decoding rejection.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UserForm {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserForm {
    /// Validate a sign-up submission and turn it into an unsaved [`User`].
    ///
    /// `userId` and `password` must be present and non-blank; name and email
    /// default to empty strings.
    pub fn into_new_user(self) -> Result<User, UserError> {
        let user_id = required("userId", self.user_id)?;
        let password = required("password", self.password)?;
        Ok(User::new(
            user_id,
            password,
            self.name.unwrap_or_default(),
            self.email.unwrap_or_default(),
        ))
    }

    /// Validate a profile-update submission.
    ///
    /// `password` must be present since it is checked against the stored one.
    /// A blank password is passed through and fails that check.
    pub fn into_update(self) -> Result<UserUpdate, UserError> {
        let password = present("password", self.password)?;
        Ok(UserUpdate {
            password,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
        })
    }
}

/// Validated profile update: the fields that may change on an existing user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserUpdate {
    pub password: String,
    pub name: String,
    pub email: String,
}

/// Login credentials as submitted by the login form.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct LoginForm {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginForm {
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            password: Some(password.into()),
        }
    }

    /// `(user_id, password)`, both present.
    ///
    /// An empty password is passed through unchanged; it simply won't match.
    pub fn into_credentials(self) -> Result<(String, String), UserError> {
        let user_id = required("userId", self.user_id)?;
        let password = present("password", self.password)?;
        Ok((user_id, password))
    }
}

/// The field must be submitted and non-blank.
fn required(field: &str, value: Option<String>) -> Result<String, UserError> {
    match present(field, value)? {
        v if v.trim().is_empty() => Err(UserError::Validation {
            reason: format!("{field} is required"),
        }),
        v => Ok(v),
    }
}

/// The field must be submitted; blank values are kept as-is.
fn present(field: &str, value: Option<String>) -> Result<String, UserError> {
    value.ok_or_else(|| UserError::Validation {
        reason: format!("{field} is required"),
    })
}
