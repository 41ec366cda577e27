//! User API Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::json_body;
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_len, validate_password, validate_required_text,
};
use shared::error::AppResult;
use shared::models::{User, UserCreate};

/// GET /stat/api/users/
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(user::find_all(&state.pool).await?))
}

/// POST /stat/api/users/
///
/// Creates the user and its profile together.
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<UserCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<User>)> {
    let payload = json_body(body)?;
    let username = payload.username.trim();
    let email = payload.email.trim();
    let first_name = payload.first_name.as_deref().map(str::trim).unwrap_or_default();
    validate_required_text(username, "username", MAX_NAME_LEN)?;
    validate_email(email)?;
    validate_password(&payload.password)?;
    validate_len(first_name, "first_name", MAX_NAME_LEN)?;

    let created = user::create_with_password(
        &state.pool,
        username,
        email,
        first_name,
        &payload.password,
        payload.is_staff.unwrap_or(false),
    )
    .await?;
    tracing::info!(
        id = created.id,
        username = %created.username,
        is_staff = created.is_staff,
        "User created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}
