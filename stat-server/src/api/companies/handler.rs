//! Company API Handlers

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
use crate::db::repository::company;
use crate::utils::validation::{MAX_TITLE_LEN, validate_required_text, validate_slug};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Company, CompanyCreate, CompanyDetail, CompanyUpdate};

async fn detail(state: &ServerState, company: Company) -> AppResult<CompanyDetail> {
    let departments = company::department_titles(&state.pool, company.id).await?;
    Ok(CompanyDetail::new(company, departments))
}

/// GET /stat/api/companies/
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<CompanyDetail>>> {
    let companies = company::find_all(&state.pool).await?;
    let mut result = Vec::with_capacity(companies.len());
    for c in companies {
        result.push(detail(&state, c).await?);
    }
    Ok(Json(result))
}

/// GET /stat/api/companies/{id}/
pub async fn retrieve(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<CompanyDetail>> {
    let id = item_id(path, ErrorCode::CompanyNotFound)?;
    let company = company::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CompanyNotFound))?;
    Ok(Json(detail(&state, company).await?))
}

/// POST /stat/api/companies/
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<CompanyCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CompanyDetail>)> {
    let payload = json_body(body)?;
    validate_required_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_slug(&payload.slug)?;

    let company = company::create(&state.pool, payload).await?;
    tracing::info!(id = company.id, slug = %company.slug, "Company created");
    Ok((StatusCode::CREATED, Json(detail(&state, company).await?)))
}

/// PUT/PATCH /stat/api/companies/{id}/
pub async fn update(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<CompanyUpdate>, JsonRejection>,
) -> AppResult<Json<CompanyDetail>> {
    let id = item_id(path, ErrorCode::CompanyNotFound)?;
    let payload = json_body(body)?;
    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_TITLE_LEN)?;
    }
    if let Some(slug) = &payload.slug {
        validate_slug(slug)?;
    }

    let company = company::update(&state.pool, id, payload).await?;
    Ok(Json(detail(&state, company).await?))
}

/// DELETE /stat/api/companies/{id}/
///
/// Departments, stat titles and stats of the company go with it.
pub async fn delete(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = item_id(path, ErrorCode::CompanyNotFound)?;
    company::delete(&state.pool, id).await?;
    tracing::info!(id, "Company deleted");
    Ok(StatusCode::NO_CONTENT)
}
