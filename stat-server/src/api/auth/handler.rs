//! Token Auth Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::api::json_body;
use crate::auth::{CurrentUser, authenticate};
use crate::core::ServerState;
use crate::db::repository::user;
use shared::client::{LoginRequest, LoginResponse};
use shared::error::{AppError, AppResult};
use shared::models::User;

/// POST /stat/api/auth/login/
///
/// `username` may also be the account's email address.
pub async fn login(
    State(state): State<ServerState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let req = json_body(body)?;
    let outcome = authenticate(&state, &req.username, &req.password).await?;
    Ok(Json(LoginResponse {
        token: outcome.token,
        user: outcome.user,
    }))
}

/// GET /stat/api/auth/me/
pub async fn me(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<User>> {
    let found = user::find_by_id(&state.pool, current.id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(AppError::not_authenticated)?;
    Ok(Json(found))
}
