//! Outcomes of handling a request: a view to render or a place to redirect to.

use crate::user::User;

/// Redirect target after login and logout.
pub const HOME: &str = "/";
/// Redirect target after sign-up and profile update.
pub const USER_LIST: &str = "/users/list";
/// Redirect target for anonymous access and failed logins.
pub const LOGIN_FORM: &str = "/users/loginForm";

/// A server-rendered page together with the data it shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    SignUpForm,
    LoginForm,
    UserList { users: Vec<User> },
    Profile { user: User },
    UpdateForm { user: User },
}

impl View {
    /// Template name of the view.
    pub fn name(&self) -> &'static str {
        match self {
            View::SignUpForm => "users/form",
            View::LoginForm => "users/login",
            View::UserList { .. } => "users/list",
            View::Profile { .. } => "users/profile",
            View::UpdateForm { .. } => "users/updateForm",
        }
    }
}

/// What the web layer should send back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    View(View),
    Redirect(&'static str),
}

impl Page {
    /// Redirect target, if this is a redirect.
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Page::Redirect(target) => Some(target),
            Page::View(_) => None,
        }
    }

    /// Rendered view, if this is not a redirect.
    pub fn view(&self) -> Option<&View> {
        match self {
            Page::View(view) => Some(view),
            Page::Redirect(_) => None,
        }
    }
}

impl From<View> for Page {
    fn from(view: View) -> Self {
        Page::View(view)
    }
}
