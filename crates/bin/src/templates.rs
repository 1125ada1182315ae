//! HTML templates for the web interface
//!
//! Simple inline HTML templates without a template engine.

use qna::{User, View};

/// Common CSS styles for all pages
const COMMON_STYLES: &str = r#"
    body {
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
        max-width: 900px;
        margin: 40px auto;
        padding: 0 20px;
        background: #f5f5f5;
    }
    .container {
        background: white;
        padding: 30px;
        border-radius: 8px;
        box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    }
    nav {
        margin-bottom: 20px;
    }
    nav a {
        margin-right: 15px;
        color: #0066cc;
        text-decoration: none;
    }
    nav .who {
        float: right;
        color: #666;
    }
    h1 {
        color: #333;
        border-bottom: 2px solid #0066cc;
        padding-bottom: 10px;
    }
    .info-row {
        margin: 10px 0;
        padding: 8px;
        background: #f9f9f9;
        border-radius: 4px;
    }
    .label {
        font-weight: bold;
        color: #666;
        display: inline-block;
        width: 150px;
    }
    .form-group {
        margin: 15px 0;
    }
    label {
        display: block;
        font-weight: bold;
        margin-bottom: 5px;
        color: #333;
    }
    input[type="text"],
    input[type="email"],
    input[type="password"] {
        width: 100%;
        padding: 10px;
        border: 1px solid #ddd;
        border-radius: 4px;
        font-size: 14px;
        box-sizing: border-box;
    }
    button {
        background: #0066cc;
        color: white;
        padding: 10px 20px;
        border: none;
        border-radius: 4px;
        cursor: pointer;
        font-size: 14px;
        font-weight: bold;
    }
    button:hover {
        background: #0052a3;
    }
    table {
        width: 100%;
        border-collapse: collapse;
        margin: 20px 0;
    }
    th, td {
        text-align: left;
        padding: 12px;
        border-bottom: 1px solid #ddd;
    }
    th {
        background: #f0f0f0;
    }
    .error {
        color: #d9534f;
        background: #f2dede;
        padding: 10px;
        border-radius: 4px;
        margin: 10px 0;
    }
"#;

/// Wrap `body` in the common page chrome.
///
/// The navigation shows login/sign-up links to anonymous visitors and the
/// logged-in user's name with a logout link otherwise.
fn layout(title: &str, current: Option<&User>, body: &str) -> String {
    let session_links = match current {
        Some(user) => {
            let profile_link = user
                .id
                .map(|id| format!(r#"<a href="/users/{id}/form">Edit profile</a>"#))
                .unwrap_or_default();
            format!(
                r#"{profile_link}<a href="/users/logout">Logout</a><span class="who">{}</span>"#,
                html_escape(&user.name)
            )
        }
        None => r#"<a href="/users/loginForm">Login</a><a href="/users/form">Sign up</a>"#
            .to_string(),
    };
    let title = html_escape(title);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>QnA - {title}</title>
    <style>{COMMON_STYLES}</style>
</head>
<body>
    <nav><a href="/">Home</a><a href="/users/list">Members</a>{session_links}</nav>
    <div class="container">
        <h1>{title}</h1>
        {body}
    </div>
</body>
</html>"#
    )
}

/// Render a controller view.
pub fn render_view(view: &View, current: Option<&User>) -> String {
    match view {
        View::SignUpForm => sign_up_page(current),
        View::LoginForm => login_page(current),
        View::UserList { users } => user_list_page(users, current),
        View::Profile { user } => profile_page(user, current),
        View::UpdateForm { user } => update_form_page(user, current),
    }
}

/// Render the home page
pub fn home_page(current: Option<&User>) -> String {
    let greeting = match current {
        Some(user) => format!(
            "<p>Welcome back, {}.</p>",
            html_escape(display_name(user))
        ),
        None => r#"<p>Welcome. <a href="/users/loginForm">Log in</a> or <a href="/users/form">sign up</a> to take part.</p>"#.to_string(),
    };
    layout("Home", current, &greeting)
}

fn sign_up_page(current: Option<&User>) -> String {
    let body = r#"<form method="POST" action="/users">
            <div class="form-group">
                <label for="userId">User ID:</label>
                <input type="text" id="userId" name="userId" required autofocus>
            </div>
            <div class="form-group">
                <label for="password">Password:</label>
                <input type="password" id="password" name="password" required>
            </div>
            <div class="form-group">
                <label for="name">Name:</label>
                <input type="text" id="name" name="name">
            </div>
            <div class="form-group">
                <label for="email">Email:</label>
                <input type="email" id="email" name="email">
            </div>
            <button type="submit">Sign up</button>
        </form>
        <p>Already a member? <a href="/users/loginForm">Login here</a></p>"#;
    layout("Sign up", current, body)
}

fn login_page(current: Option<&User>) -> String {
    let body = r#"<form method="POST" action="/users/login">
            <div class="form-group">
                <label for="userId">User ID:</label>
                <input type="text" id="userId" name="userId" required autofocus>
            </div>
            <div class="form-group">
                <label for="password">Password:</label>
                <input type="password" id="password" name="password">
            </div>
            <button type="submit">Login</button>
        </form>
        <p>Don't have an account? <a href="/users/form">Sign up here</a></p>"#;
    layout("Login", current, body)
}

fn user_list_page(users: &[User], current: Option<&User>) -> String {
    let body = if users.is_empty() {
        r#"<p style="color: #666; font-style: italic;">No members yet.</p>"#.to_string()
    } else {
        let rows: String = users
            .iter()
            .map(|user| {
                let id = user.id.map(|id| id.to_string()).unwrap_or_default();
                format!(
                    r#"<tr><td>{id}</td><td><a href="/users/{id}">{}</a></td><td>{}</td><td>{}</td></tr>"#,
                    html_escape(&user.user_id),
                    html_escape(&user.name),
                    html_escape(&user.email)
                )
            })
            .collect();
        format!(
            r#"<table>
            <tr><th>#</th><th>User ID</th><th>Name</th><th>Email</th></tr>
            {rows}
        </table>"#
        )
    };
    layout("Members", current, &body)
}

fn profile_page(user: &User, current: Option<&User>) -> String {
    let body = format!(
        r#"<div class="info-row"><span class="label">User ID:</span> {}</div>
        <div class="info-row"><span class="label">Name:</span> {}</div>
        <div class="info-row"><span class="label">Email:</span> {}</div>"#,
        html_escape(&user.user_id),
        html_escape(&user.name),
        html_escape(&user.email)
    );
    layout("Profile", current, &body)
}

/// Browsers cannot submit PUT, so the form posts to the alias route.
fn update_form_page(user: &User, current: Option<&User>) -> String {
    let id = user.id.map(|id| id.to_string()).unwrap_or_default();
    let body = format!(
        r#"<form method="POST" action="/users/{id}">
            <div class="info-row"><span class="label">User ID:</span> {user_id}</div>
            <div class="form-group">
                <label for="password">Current password:</label>
                <input type="password" id="password" name="password" required autofocus>
            </div>
            <div class="form-group">
                <label for="name">Name:</label>
                <input type="text" id="name" name="name" value="{name}">
            </div>
            <div class="form-group">
                <label for="email">Email:</label>
                <input type="email" id="email" name="email" value="{email}">
            </div>
            <button type="submit">Update</button>
        </form>"#,
        user_id = html_escape(&user.user_id),
        name = html_escape(&user.name),
        email = html_escape(&user.email),
    );
    layout("Edit profile", current, &body)
}

/// Render an error page for a failed request.
pub fn error_page(title: &str, message: &str, current: Option<&User>) -> String {
    let body = format!(
        r#"<div class="error">{}</div>
        <p><a href="/">Back to home</a></p>"#,
        html_escape(message)
    );
    layout(title, current, &body)
}

fn display_name(user: &User) -> &str {
    if user.name.is_empty() {
        &user.user_id
    } else {
        &user.name
    }
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
