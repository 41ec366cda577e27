//! Stat API Handlers

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::api::{item_id, json_body};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::stat::{self, NewStat};
use crate::security_log;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Stat, StatCreate, StatUpdate};

/// Owner of a new stat: the requester unless staff names someone else
fn resolve_owner(user: &CurrentUser, requested: Option<i64>) -> AppResult<i64> {
    match requested {
        None => Ok(user.id),
        Some(id) if id == user.id || user.is_staff => Ok(id),
        Some(id) => {
            security_log!(
                "WARN",
                "foreign_owner_denied",
                user_id = user.id,
                owner_id = id
            );
            Err(AppError::permission_denied(
                "Only staff may record stats for another user",
            ))
        }
    }
}

/// GET /stat/api/stats/
///
/// Newest first.
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Stat>>> {
    Ok(Json(stat::find_all(&state.pool).await?))
}

/// GET /stat/api/stats/{id}/
pub async fn retrieve(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Stat>> {
    let id = item_id(path, ErrorCode::StatNotFound)?;
    let stat = stat::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StatNotFound))?;
    Ok(Json(stat))
}

/// POST /stat/api/stats/
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    body: Result<Json<StatCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Stat>)> {
    let payload = json_body(body)?;
    let owner_id = resolve_owner(&user, payload.owner)?;

    let stat = stat::create(
        &state.pool,
        NewStat {
            amount: payload.amount,
            date: payload.date,
            owner_id,
            title_id: payload.title,
        },
    )
    .await?;
    tracing::info!(id = stat.id, title_id = stat.title_id, owner_id, "Stat recorded");
    Ok((StatusCode::CREATED, Json(stat)))
}

/// PUT/PATCH /stat/api/stats/{id}/
///
/// The owner never changes.
pub async fn update(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<StatUpdate>, JsonRejection>,
) -> AppResult<Json<Stat>> {
    let id = item_id(path, ErrorCode::StatNotFound)?;
    let payload = json_body(body)?;
    Ok(Json(stat::update(&state.pool, id, payload).await?))
}

/// DELETE /stat/api/stats/{id}/
pub async fn delete(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = item_id(path, ErrorCode::StatNotFound)?;
    stat::delete(&state.pool, id).await?;
    tracing::info!(id, "Stat deleted");
    Ok(StatusCode::NO_CONTENT)
}
