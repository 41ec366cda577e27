//! Stat Title API Handlers

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::api::{item_id, json_body};
use crate::core::ServerState;
use crate::db::repository::{stat, stat_title};
use crate::utils::validation::{
    MAX_OVERVIEW_LEN, MAX_TITLE_LEN, validate_optional_text, validate_required_text,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{StatTitle, StatTitleCreate, StatTitleDetail, StatTitleUpdate};

/// Stat title with its stats rendered as `"<date>: <amount>"`
async fn detail(state: &ServerState, stat_title: StatTitle) -> AppResult<StatTitleDetail> {
    let stats = stat::find_by_title(&state.pool, stat_title.id)
        .await?
        .iter()
        .map(ToString::to_string)
        .collect();
    Ok(StatTitleDetail::new(stat_title, stats))
}

/// GET /stat/api/stat_titles/
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<StatTitleDetail>>> {
    let stat_titles = stat_title::find_all(&state.pool).await?;
    let mut result = Vec::with_capacity(stat_titles.len());
    for t in stat_titles {
        result.push(detail(&state, t).await?);
    }
    Ok(Json(result))
}

/// GET /stat/api/stat_titles/{id}/
pub async fn retrieve(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<StatTitleDetail>> {
    let id = item_id(path, ErrorCode::StatTitleNotFound)?;
    let stat_title = stat_title::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StatTitleNotFound))?;
    Ok(Json(detail(&state, stat_title).await?))
}

/// POST /stat/api/stat_titles/
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<StatTitleCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<StatTitleDetail>)> {
    let payload = json_body(body)?;
    validate_required_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.overview, "overview", MAX_OVERVIEW_LEN)?;

    let stat_title = stat_title::create(&state.pool, payload).await?;
    tracing::info!(
        id = stat_title.id,
        department_id = stat_title.department_id,
        "Stat title created"
    );
    Ok((StatusCode::CREATED, Json(detail(&state, stat_title).await?)))
}

/// PUT/PATCH /stat/api/stat_titles/{id}/
pub async fn update(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<StatTitleUpdate>, JsonRejection>,
) -> AppResult<Json<StatTitleDetail>> {
    let id = item_id(path, ErrorCode::StatTitleNotFound)?;
    let payload = json_body(body)?;
    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_TITLE_LEN)?;
    }
    validate_optional_text(&payload.overview, "overview", MAX_OVERVIEW_LEN)?;

    let stat_title = stat_title::update(&state.pool, id, payload).await?;
    Ok(Json(detail(&state, stat_title).await?))
}

/// DELETE /stat/api/stat_titles/{id}/
pub async fn delete(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = item_id(path, ErrorCode::StatTitleNotFound)?;
    stat_title::delete(&state.pool, id).await?;
    tracing::info!(id, "Stat title deleted");
    Ok(StatusCode::NO_CONTENT)
}
