//! Binding of server-side sessions to the `qna_session` cookie.

use qna::{Session, SessionStore};
use tower_cookies::{Cookie, Cookies};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "qna_session";

/// Open the session named by the request's cookie, starting a new one if
/// the cookie is absent or stale. A new token is written back to the client.
pub async fn open_session(sessions: &SessionStore, cookies: &Cookies) -> Session {
    let presented = cookies.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let session = sessions.open(presented.as_deref()).await;

    if presented.as_deref() != Some(session.token()) {
        let mut cookie = Cookie::new(SESSION_COOKIE, session.token().to_string());
        cookie.set_http_only(true);
        cookie.set_path("/");
        cookies.add(cookie);
    }
    session
}
