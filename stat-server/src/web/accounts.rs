//! Account pages: login, logout, profile, profile edit

use axum::{
    Form, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    middleware,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;

use super::{LOGIN_PATH, PageResult, is_form_error, page_context};
use crate::auth::session::{clear_session_cookie, safe_next, session_cookie};
use crate::auth::{CurrentUser, authenticate, require_login};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_len, validate_required_text,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{User, UserUpdate};

const EDIT_PATH: &str = "/auth/edit/";

/// Account routes
pub fn router() -> Router<ServerState> {
    let public_pages = Router::new()
        .route(LOGIN_PATH, get(login_form).post(login))
        .route("/auth/logout/", get(logout));

    let login_pages = Router::new()
        .route("/auth/profile/", get(profile))
        .route(EDIT_PATH, get(edit_form).post(edit))
        .layer(middleware::from_fn(require_login));

    public_pages.merge(login_pages)
}

// ── Login / logout ──────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub next: String,
}

fn render_login(state: &ServerState, username: &str, next: &str, errors: Vec<String>) -> PageResult {
    let ctx = page_context(
        None,
        "вход",
        json!({"username": username, "next": next, "errors": errors}),
    );
    Ok(state.templates.render("login", &ctx)?.into_response())
}

/// GET /auth/login/
pub async fn login_form(State(state): State<ServerState>, Query(query): Query<LoginQuery>) -> PageResult {
    let next = safe_next(query.next.as_deref()).unwrap_or_default();
    render_login(&state, "", next, vec![])
}

/// POST /auth/login/
///
/// Sets the session cookie and redirects to `next`, or to `/`.
pub async fn login(State(state): State<ServerState>, Form(form): Form<LoginForm>) -> PageResult {
    let next = safe_next(Some(&form.next)).unwrap_or("/");

    match authenticate(&state, &form.username, &form.password).await {
        Ok(outcome) => {
            let cookie = session_cookie(&outcome.token, state.get_jwt_service().lifetime_seconds());
            Ok((
                StatusCode::FOUND,
                [(header::SET_COOKIE, cookie), (header::LOCATION, next.to_string())],
            )
                .into_response())
        }
        Err(err) if is_login_failure(&err) => {
            let next = safe_next(Some(&form.next)).unwrap_or_default();
            render_login(&state, &form.username, next, vec![err.message])
        }
        Err(err) => Err(err.into()),
    }
}

fn is_login_failure(err: &AppError) -> bool {
    is_form_error(err) || matches!(err.code, ErrorCode::InvalidCredentials | ErrorCode::AccountDisabled)
}

/// GET /auth/logout/
pub async fn logout(State(state): State<ServerState>, user: Option<CurrentUser>) -> PageResult {
    if let Some(user) = &user {
        tracing::info!(user_id = user.id, username = %user.username, "User logged out");
    }
    let page = state
        .templates
        .render("logged_out", &page_context(None, "выход", json!({})))?;
    Ok(([(header::SET_COOKIE, clear_session_cookie())], page).into_response())
}

// ── Profile ─────────────────────────────────────────────────────────

async fn load_user(state: &ServerState, current: &CurrentUser) -> AppResult<User> {
    user::find_by_id(&state.pool, current.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))
}

/// GET /auth/profile/
pub async fn profile(State(state): State<ServerState>, current: CurrentUser) -> PageResult {
    let found = load_user(&state, &current).await?;
    let profile = user::find_profile(&state.pool, found.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProfileMissing))?;

    let ctx = page_context(
        Some(&current),
        "профиль",
        json!({"user": found, "profile": profile}),
    );
    Ok(state.templates.render("profile", &ctx)?.into_response())
}

// ── Profile edit ────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub email: String,
}

impl EditForm {
    fn validate(&self) -> AppResult<UserUpdate> {
        let username = self.username.trim();
        let first_name = self.first_name.trim();
        let email = self.email.trim();
        validate_required_text(username, "username", MAX_NAME_LEN)?;
        validate_len(first_name, "first_name", MAX_NAME_LEN)?;
        validate_email(email)?;
        Ok(UserUpdate {
            username: Some(username.to_string()),
            first_name: Some(first_name.to_string()),
            email: Some(email.to_string()),
        })
    }
}

fn render_edit(state: &ServerState, current: &CurrentUser, form: &EditForm, errors: Vec<String>) -> PageResult {
    let ctx = page_context(
        Some(current),
        "редактировать",
        json!({
            "form": {
                "username": form.username,
                "first_name": form.first_name,
                "email": form.email,
            },
            "errors": errors,
        }),
    );
    Ok(state.templates.render("profile_edit", &ctx)?.into_response())
}

/// GET /auth/edit/
pub async fn edit_form(State(state): State<ServerState>, current: CurrentUser) -> PageResult {
    let found = load_user(&state, &current).await?;
    let form = EditForm {
        username: found.username,
        first_name: found.first_name,
        email: found.email,
    };
    render_edit(&state, &current, &form, vec![])
}

/// POST /auth/edit/
///
/// Saves the user and touches its profile in one transaction, then
/// reissues the session cookie so it carries the new username.
pub async fn edit(
    State(state): State<ServerState>,
    current: CurrentUser,
    Form(form): Form<EditForm>,
) -> PageResult {
    let result = async {
        let update = form.validate()?;
        let updated = user::update(&state.pool, current.id, update).await?;
        Ok::<_, AppError>(updated)
    }
    .await;

    match result {
        Ok(updated) => {
            tracing::info!(user_id = updated.id, "Profile updated");
            let jwt = state.get_jwt_service();
            let token = jwt
                .generate_token(updated.id, &updated.username, updated.is_staff)
                .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;
            let cookie = session_cookie(&token, jwt.lifetime_seconds());
            Ok((
                StatusCode::FOUND,
                [(header::SET_COOKIE, cookie), (header::LOCATION, EDIT_PATH.to_string())],
            )
                .into_response())
        }
        Err(err) if is_form_error(&err) => render_edit(&state, &current, &form, vec![err.message]),
        Err(err) => Err(err.into()),
    }
}
