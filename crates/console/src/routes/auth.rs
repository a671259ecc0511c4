//! Authentication route handlers.
//!
//! Operators sign in with their email and access key. The form endpoints
//! serve the HTML console; the `/api/auth` endpoints serve scripted
//! clients.

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalOperator, clear_current_operator, set_current_operator};
use crate::models::CurrentOperator;
use crate::state::AppState;

/// Login page template.
#[derive(Template)]
#[template(path = "login.html")]
struct LoginPageTemplate {
    error: Option<String>,
    email: String,
}

/// Login credentials, from a form or a JSON body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub access_key: SecretString,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login_form))
        .route("/auth/logout", post(logout))
        .route("/api/auth/login", post(login_api))
        .route("/api/auth/logout", post(logout_api))
}

fn render_login(error: Option<String>, email: String) -> Html<String> {
    Html(
        LoginPageTemplate { error, email }
            .render()
            .unwrap_or_else(|e| {
                tracing::error!("Template render error: {}", e);
                String::from("Error rendering template")
            }),
    )
}

/// Verify credentials and start an authenticated session.
async fn sign_in(
    state: &AppState,
    session: &Session,
    request: &LoginRequest,
) -> Result<CurrentOperator, AppError> {
    let Some(operator) = state
        .directory()
        .authenticate(&request.email, &request.access_key)
    else {
        tracing::warn!(email = %request.email, "Login failed");
        return Err(AppError::Unauthorized(
            "Invalid email or access key".to_string(),
        ));
    };

    let current = CurrentOperator::from(operator);

    // New session id on privilege change
    session.cycle_id().await?;
    set_current_operator(session, &current).await?;
    set_sentry_user(&current.email, current.role.as_str());

    tracing::info!(
        email = %current.email,
        panel = %current.panel,
        role = %current.role,
        "Operator signed in"
    );
    if !state
        .policies()
        .table(current.panel)
        .contains_role(current.role.as_str())
    {
        tracing::warn!(
            email = %current.email,
            panel = %current.panel,
            role = %current.role,
            "Operator role has no entry in permission table"
        );
    }
    Ok(current)
}

/// Render the login page.
///
/// GET /auth/login
async fn login_page(OptionalOperator(operator): OptionalOperator) -> Response {
    if operator.is_some() {
        return Redirect::to("/").into_response();
    }
    render_login(None, String::new()).into_response()
}

/// Sign in from the login form.
///
/// POST /auth/login
#[instrument(skip_all)]
async fn login_form(
    State(state): State<AppState>,
    session: Session,
    Form(request): Form<LoginRequest>,
) -> Result<Response, AppError> {
    match sign_in(&state, &session, &request).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(AppError::Unauthorized(message)) => Ok((
            StatusCode::UNAUTHORIZED,
            render_login(Some(message), request.email),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

/// Sign in with a JSON body.
///
/// POST /api/auth/login
#[instrument(skip_all)]
async fn login_api(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<CurrentOperator>, AppError> {
    sign_in(&state, &session, &request).await.map(Json)
}

/// Logout and clear session.
///
/// POST /auth/logout
async fn logout(session: Session) -> impl IntoResponse {
    // Clear the current operator from session
    let _ = clear_current_operator(&session).await;
    clear_sentry_user();

    Redirect::to("/auth/login")
}

/// Logout without a redirect.
///
/// POST /api/auth/logout
async fn logout_api(session: Session) -> Result<StatusCode, AppError> {
    clear_current_operator(&session).await?;
    clear_sentry_user();
    Ok(StatusCode::NO_CONTENT)
}
