//! Serve command - runs the QnA web server.

use std::time::Duration;

use axum::{
    Form, Router,
    extract::{Path, State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tokio::signal::unix::{SignalKind, signal};
use tower_cookies::{CookieManagerLayer, Cookies};

use qna::{
    Page, Session, SessionStore, User, UserController, UserForm, store::InMemory, user::LoginForm,
};

use crate::backend::{create_backend, json_path};
use crate::cli::ServeArgs;
use crate::session::open_session;
use crate::templates;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub controller: UserController,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(controller: UserController, sessions: SessionStore) -> Self {
        Self {
            controller,
            sessions,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_home))
        .route("/health", get(handle_health_endpoint))
        .route("/users", post(handle_create_user))
        .route("/users/form", get(handle_sign_up_form))
        .route("/users/loginForm", get(handle_login_form))
        .route("/users/login", post(handle_login))
        .route("/users/logout", get(handle_logout))
        .route("/users/list", get(handle_list_users))
        .route(
            "/users/{id}",
            get(handle_profile)
                .put(handle_update_user)
                .post(handle_update_user),
        )
        .route("/users/{id}/form", get(handle_update_form))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

/// Run the QnA server
pub async fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = create_backend(&args.backend_config).await?;
    let sessions = SessionStore::with_ttl(Duration::from_secs(args.session_ttl));
    let sweeper = spawn_session_sweeper(sessions.clone());
    let app_state = AppState::new(UserController::new(store), sessions);
    let app = router(app_state.clone());

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!("QnA server listening on {local_addr}");
    println!("QnA server started on http://localhost:{}", local_addr.port());
    println!();
    println!("Available endpoints:");
    println!("  GET  /                  - Home page");
    println!("  GET  /users/form        - Sign-up form");
    println!("  POST /users             - Sign-up submission");
    println!("  GET  /users/loginForm   - Login form");
    println!("  POST /users/login       - Login submission");
    println!("  GET  /users/logout      - Logout");
    println!("  GET  /users/list        - Member list");
    println!("  GET  /users/{{id}}        - Profile");
    println!("  GET  /users/{{id}}/form   - Profile update form (requires login)");
    println!("  PUT  /users/{{id}}        - Profile update (requires login)");
    println!("  GET  /health            - Health check");
    println!();
    println!("Press Ctrl+C to shutdown");

    let json_path = json_path(&args.backend_config);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;

            // Only the in-memory store needs an explicit save
            if let Some(in_memory) = app_state
                .controller
                .store()
                .as_any()
                .downcast_ref::<InMemory>()
            {
                match in_memory.save_to_file(&json_path).await {
                    Ok(()) => {
                        tracing::info!("Users saved to {}", json_path.display());
                        println!("\nUsers saved successfully");
                    }
                    Err(e) => {
                        tracing::error!("Failed to save users: {e:?}");
                        eprintln!("Failed to save users: {e:?}");
                    }
                }
            }
        })
        .await?;

    sweeper.abort();
    println!("Server shut down");
    Ok(())
}

/// Periodically drop sessions that outlived their idle TTL.
fn spawn_session_sweeper(sessions: SessionStore) -> tokio::task::JoinHandle<()> {
    let period = (sessions.ttl() / 2).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let removed = sessions.purge_expired().await;
            if removed > 0 {
                tracing::debug!(removed, "Expired idle sessions");
            }
        }
    })
}

async fn shutdown_signal() {
    let (mut sigterm, mut sigint) =
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("Failed to install signal handlers ({e}), waiting for Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

    tokio::select! {
        _ = sigterm.recv() => tracing::info!("Received SIGTERM, initiating graceful shutdown..."),
        _ = sigint.recv() => tracing::info!("Received SIGINT, initiating graceful shutdown..."),
    }
}

// ============================================================================
// Response mapping
// ============================================================================

/// Turn a controller outcome into an HTTP response.
async fn respond(session: &Session, result: qna::Result<Page>) -> Response {
    let current = session.user().await.ok();
    match result {
        Ok(Page::View(view)) => Html(templates::render_view(&view, current.as_ref())).into_response(),
        Ok(Page::Redirect(target)) => Redirect::to(target).into_response(),
        Err(err) => error_response(&err, current.as_ref()),
    }
}

/// HTTP status for a failed request.
pub fn error_status(err: &qna::Error) -> StatusCode {
    if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.is_forbidden() {
        StatusCode::FORBIDDEN
    } else if err.is_validation() || err.is_password_mismatch() {
        StatusCode::BAD_REQUEST
    } else if err.is_conflict() {
        StatusCode::CONFLICT
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn error_response(err: &qna::Error, current: Option<&User>) -> Response {
    let status = error_status(err);
    let title = status.canonical_reason().unwrap_or("Error");

    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(module = err.module(), "Request failed: {err}");
        "Something went wrong on our side.".to_string()
    } else {
        tracing::debug!(module = err.module(), %status, "Request rejected: {err}");
        err.to_string()
    };

    (
        status,
        Html(templates::error_page(title, &message, current)),
    )
        .into_response()
}

// ============================================================================
// Page Handlers
// ============================================================================

/// Handler for GET /
async fn handle_home(State(state): State<AppState>, cookies: Cookies) -> Html<String> {
    let session = open_session(&state.sessions, &cookies).await;
    let current = session.user().await.ok();
    Html(templates::home_page(current.as_ref()))
}

/// Handler for GET /users/form
async fn handle_sign_up_form(State(state): State<AppState>, cookies: Cookies) -> Response {
    let session = open_session(&state.sessions, &cookies).await;
    respond(&session, Ok(state.controller.sign_up_form())).await
}

/// Handler for POST /users
///
/// A body that cannot be decoded as a form counts as no form at all.
async fn handle_create_user(
    State(state): State<AppState>,
    cookies: Cookies,
    form: Result<Form<UserForm>, FormRejection>,
) -> Response {
    let session = open_session(&state.sessions, &cookies).await;
    let form = form.ok().map(|Form(form)| form);
    let result = state.controller.create_user(form).await;
    respond(&session, result).await
}

/// Handler for GET /users/loginForm
async fn handle_login_form(State(state): State<AppState>, cookies: Cookies) -> Response {
    let session = open_session(&state.sessions, &cookies).await;
    respond(&session, Ok(state.controller.login_form())).await
}

/// Handler for POST /users/login
async fn handle_login(
    State(state): State<AppState>,
    cookies: Cookies,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    let session = open_session(&state.sessions, &cookies).await;
    let form = form.map(|Form(form)| form).unwrap_or_default();
    let result = state.controller.login(form, &session).await;
    respond(&session, result).await
}

/// Handler for GET /users/logout
async fn handle_logout(State(state): State<AppState>, cookies: Cookies) -> Response {
    let session = open_session(&state.sessions, &cookies).await;
    let page = state.controller.logout(&session).await;
    respond(&session, Ok(page)).await
}

/// Handler for GET /users/list
async fn handle_list_users(State(state): State<AppState>, cookies: Cookies) -> Response {
    let session = open_session(&state.sessions, &cookies).await;
    let result = state.controller.list_users().await;
    respond(&session, result).await
}

/// Handler for GET /users/{id}
async fn handle_profile(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<i64>,
) -> Response {
    let session = open_session(&state.sessions, &cookies).await;
    let result = state.controller.profile(id).await;
    respond(&session, result).await
}

/// Handler for GET /users/{id}/form
async fn handle_update_form(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<i64>,
) -> Response {
    let session = open_session(&state.sessions, &cookies).await;
    let result = state.controller.update_form(id, &session).await;
    respond(&session, result).await
}

/// Handler for PUT /users/{id} and its POST alias
async fn handle_update_user(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<i64>,
    form: Result<Form<UserForm>, FormRejection>,
) -> Response {
    let session = open_session(&state.sessions, &cookies).await;
    let form = form.map(|Form(form)| form).unwrap_or_default();
    let result = state.controller.update_user(id, form, &session).await;
    respond(&session, result).await
}

// ============================================================================
// Health Handler
// ============================================================================

/// Health check response
#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<usize>,
}

/// Handler for GET /health - Health check endpoint
async fn handle_health_endpoint(State(state): State<AppState>) -> Response {
    let store = state.controller.store();
    let backend = store.kind_label().to_string();

    match store.count().await {
        Ok(users) => axum::Json(HealthResponse {
            status: "healthy".to_string(),
            backend,
            users: Some(users),
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Health check failed to reach the store: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                axum::Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    backend,
                    users: None,
                }),
            )
                .into_response()
        }
    }
}
