//! Department API Handlers

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
use crate::db::repository::department;
use crate::utils::validation::{
    MAX_OVERVIEW_LEN, MAX_TITLE_LEN, validate_optional_text, validate_required_text, validate_slug,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Department, DepartmentCreate, DepartmentDetail, DepartmentUpdate};

async fn detail(state: &ServerState, department: Department) -> AppResult<DepartmentDetail> {
    let stat_titles = department::stat_title_titles(&state.pool, department.id).await?;
    Ok(DepartmentDetail::new(department, stat_titles))
}

/// GET /stat/api/departments/
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DepartmentDetail>>> {
    let departments = department::find_all(&state.pool).await?;
    let mut result = Vec::with_capacity(departments.len());
    for d in departments {
        result.push(detail(&state, d).await?);
    }
    Ok(Json(result))
}

/// GET /stat/api/departments/{id}/
pub async fn retrieve(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<DepartmentDetail>> {
    let id = item_id(path, ErrorCode::DepartmentNotFound)?;
    let department = department::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DepartmentNotFound))?;
    Ok(Json(detail(&state, department).await?))
}

/// POST /stat/api/departments/
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<DepartmentCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DepartmentDetail>)> {
    let payload = json_body(body)?;
    validate_required_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_slug(&payload.slug)?;
    validate_optional_text(&payload.overview, "overview", MAX_OVERVIEW_LEN)?;

    let department = department::create(&state.pool, payload).await?;
    tracing::info!(
        id = department.id,
        slug = %department.slug,
        company_id = department.company_id,
        "Department created"
    );
    Ok((StatusCode::CREATED, Json(detail(&state, department).await?)))
}

/// PUT/PATCH /stat/api/departments/{id}/
pub async fn update(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<DepartmentUpdate>, JsonRejection>,
) -> AppResult<Json<DepartmentDetail>> {
    let id = item_id(path, ErrorCode::DepartmentNotFound)?;
    let payload = json_body(body)?;
    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_TITLE_LEN)?;
    }
    if let Some(slug) = &payload.slug {
        validate_slug(slug)?;
    }
    validate_optional_text(&payload.overview, "overview", MAX_OVERVIEW_LEN)?;

    let department = department::update(&state.pool, id, payload).await?;
    Ok(Json(detail(&state, department).await?))
}

/// DELETE /stat/api/departments/{id}/
pub async fn delete(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = item_id(path, ErrorCode::DepartmentNotFound)?;
    department::delete(&state.pool, id).await?;
    tracing::info!(id, "Department deleted");
    Ok(StatusCode::NO_CONTENT)
}
