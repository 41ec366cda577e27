//! Department and stat pages

use std::collections::HashMap;

use axum::{
    Form, Router,
    extract::{Path, State},
    middleware,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{PageError, PageResult, is_form_error, page_context, redirect_found};
use crate::auth::{CurrentUser, require_login, require_staff};
use crate::core::ServerState;
use crate::db::repository::stat::NewStat;
use crate::db::repository::{company, department, stat, stat_title};
use crate::utils::validation::{
    MAX_OVERVIEW_LEN, MAX_TITLE_LEN, parse_amount, parse_date, validate_len, validate_required_text,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Department, Stat, StatTitle, StatTitleCreate, StatUpdate};

/// Page routes
///
/// The segment after `/stat/` is a department slug on the detail page and a
/// numeric id on the form pages.
pub fn router() -> Router<ServerState> {
    let login_pages = Router::new()
        .route("/", get(department_list))
        .route("/stat/company/{key}/", get(company_department_list))
        .route("/stat/{key}/", get(department_detail))
        .route(
            "/stat/{key}/stat_create/",
            get(stat_create_form).post(stat_create),
        )
        .layer(middleware::from_fn(require_login));

    let staff_pages = Router::new()
        .route(
            "/stat/{key}/stat_title_create/",
            get(stat_title_create_form).post(stat_title_create),
        )
        .route("/stat/{key}/stat_edit/", get(stat_edit_form).post(stat_edit))
        .layer(middleware::from_fn(require_staff));

    login_pages.merge(staff_pages)
}

/// Numeric id from a path segment; anything else is `not_found`
fn parse_id(key: &str, not_found: ErrorCode) -> AppResult<i64> {
    key.parse().map_err(|_| AppError::new(not_found))
}

/// Form errors as the list shown above a form
fn form_errors(err: AppError) -> Result<Vec<String>, PageError> {
    if is_form_error(&err) {
        Ok(vec![err.message])
    } else {
        Err(PageError(err))
    }
}

// ── Department list ─────────────────────────────────────────────────

async fn render_department_list(
    state: &ServerState,
    user: &CurrentUser,
    company_id: Option<i64>,
    company: Option<Value>,
) -> PageResult {
    let companies = company::find_all_with_counts(&state.pool).await?;
    let departments = department::find_all_with_counts(&state.pool, company_id).await?;

    let ctx = page_context(
        Some(user),
        "отделы",
        json!({
            "companies": companies,
            "company": company,
            "departments": departments,
        }),
    );
    Ok(state.templates.render("department_list", &ctx)?.into_response())
}

/// GET /
pub async fn department_list(State(state): State<ServerState>, user: CurrentUser) -> PageResult {
    render_department_list(&state, &user, None, None).await
}

/// GET /stat/company/{slug}/
pub async fn company_department_list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(slug): Path<String>,
) -> PageResult {
    let company = company::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CompanyNotFound))?;
    let company_json = json!(company);
    render_department_list(&state, &user, Some(company.id), Some(company_json)).await
}

// ── Department detail ───────────────────────────────────────────────

/// GET /stat/{slug}/
///
/// Every stat title of the department with its stats, oldest first.
pub async fn department_detail(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(slug): Path<String>,
) -> PageResult {
    let department = department::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DepartmentNotFound))?;
    let company = company::find_by_id(&state.pool, department.company_id).await?;
    let stat_titles = stat_title::find_by_department(&state.pool, department.id).await?;

    let mut by_title: HashMap<i64, Vec<Value>> = HashMap::new();
    for s in stat::find_by_department(&state.pool, department.id).await? {
        by_title.entry(s.title_id).or_default().push(stat_json(&s));
    }

    let titles: Vec<Value> = stat_titles
        .into_iter()
        .map(|t| {
            let stats = by_title.remove(&t.id).unwrap_or_default();
            json!({
                "id": t.id,
                "title": t.title,
                "overview": t.overview,
                "stats": stats,
            })
        })
        .collect();

    let ctx = page_context(
        Some(&user),
        &department.title,
        json!({
            "department": department,
            "company": company,
            "stat_titles": titles,
        }),
    );
    Ok(state.templates.render("department_detail", &ctx)?.into_response())
}

fn stat_json(s: &Stat) -> Value {
    json!({
        "id": s.id,
        "date": s.date.format("%Y-%m-%d").to_string(),
        "amount": s.amount.to_string(),
    })
}

// ── Stat title form ─────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct StatTitleForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
}

fn render_stat_title_form(
    state: &ServerState,
    user: &CurrentUser,
    department: &Department,
    form: &StatTitleForm,
    errors: Vec<String>,
) -> PageResult {
    let ctx = page_context(
        Some(user),
        "новый показатель",
        json!({
            "department": department,
            "form": {"title": form.title, "overview": form.overview},
            "errors": errors,
        }),
    );
    Ok(state.templates.render("stat_title_form", &ctx)?.into_response())
}

async fn load_department(state: &ServerState, key: &str) -> AppResult<Department> {
    let id = parse_id(key, ErrorCode::DepartmentNotFound)?;
    department::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DepartmentNotFound))
}

/// GET /stat/{department_id}/stat_title_create/
pub async fn stat_title_create_form(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(key): Path<String>,
) -> PageResult {
    let department = load_department(&state, &key).await?;
    render_stat_title_form(&state, &user, &department, &StatTitleForm::default(), vec![])
}

/// POST /stat/{department_id}/stat_title_create/
pub async fn stat_title_create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(key): Path<String>,
    Form(form): Form<StatTitleForm>,
) -> PageResult {
    let department = load_department(&state, &key).await?;

    let result = async {
        validate_required_text(&form.title, "title", MAX_TITLE_LEN)?;
        validate_len(&form.overview, "overview", MAX_OVERVIEW_LEN)?;
        let created = stat_title::create(
            &state.pool,
            StatTitleCreate {
                title: form.title.trim().to_string(),
                department: department.id,
                overview: Some(form.overview.clone()),
            },
        )
        .await?;
        Ok::<_, AppError>(created)
    }
    .await;

    match result {
        Ok(created) => {
            tracing::info!(id = created.id, department_id = department.id, "Stat title created");
            Ok(redirect_found(&format!("/stat/{}/", department.slug)))
        }
        Err(err) => {
            let errors = form_errors(err)?;
            render_stat_title_form(&state, &user, &department, &form, errors)
        }
    }
}

// ── Stat forms ──────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct StatForm {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub date: String,
}

impl StatForm {
    fn parse(&self) -> AppResult<(rust_decimal::Decimal, chrono::NaiveDate)> {
        Ok((parse_amount(&self.amount)?, parse_date(&self.date)?))
    }
}

fn render_stat_form(
    state: &ServerState,
    user: &CurrentUser,
    stat_title: &str,
    stat_id: Option<i64>,
    form: &StatForm,
    errors: Vec<String>,
) -> PageResult {
    let ctx = page_context(
        Some(user),
        "статистика",
        json!({
            "stat_title": stat_title,
            "stat_id": stat_id,
            "form": {"amount": form.amount, "date": form.date},
            "errors": errors,
        }),
    );
    Ok(state.templates.render("stat_form", &ctx)?.into_response())
}

async fn load_stat_title(state: &ServerState, key: &str) -> AppResult<StatTitle> {
    let id = parse_id(key, ErrorCode::StatTitleNotFound)?;
    stat_title::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StatTitleNotFound))
}

async fn load_stat(state: &ServerState, key: &str) -> AppResult<Stat> {
    let id = parse_id(key, ErrorCode::StatNotFound)?;
    stat::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StatNotFound))
}

/// GET /stat/{stat_title_id}/stat_create/
pub async fn stat_create_form(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(key): Path<String>,
) -> PageResult {
    let stat_title = load_stat_title(&state, &key).await?;
    render_stat_form(&state, &user, &stat_title.title, None, &StatForm::default(), vec![])
}

/// POST /stat/{stat_title_id}/stat_create/
///
/// The stat is recorded under the requesting user.
pub async fn stat_create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(key): Path<String>,
    Form(form): Form<StatForm>,
) -> PageResult {
    let stat_title = load_stat_title(&state, &key).await?;

    let result = async {
        let (amount, date) = form.parse()?;
        let created = stat::create(
            &state.pool,
            NewStat {
                amount,
                date,
                owner_id: user.id,
                title_id: stat_title.id,
            },
        )
        .await?;
        Ok::<_, AppError>(created)
    }
    .await;

    match result {
        Ok(created) => {
            tracing::info!(id = created.id, title_id = stat_title.id, owner_id = user.id, "Stat recorded");
            Ok(redirect_found("/"))
        }
        Err(err) => {
            let errors = form_errors(err)?;
            render_stat_form(&state, &user, &stat_title.title, None, &form, errors)
        }
    }
}

/// GET /stat/{stat_id}/stat_edit/
pub async fn stat_edit_form(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(key): Path<String>,
) -> PageResult {
    let stat = load_stat(&state, &key).await?;
    let title = stat_title::find_by_id(&state.pool, stat.title_id)
        .await?
        .map(|t| t.title)
        .unwrap_or_default();
    let form = StatForm {
        amount: stat.amount.to_string(),
        date: stat.date.format("%Y-%m-%d").to_string(),
    };
    render_stat_form(&state, &user, &title, Some(stat.id), &form, vec![])
}

/// POST /stat/{stat_id}/stat_edit/
///
/// Only amount and date change; the owner stays.
pub async fn stat_edit(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(key): Path<String>,
    Form(form): Form<StatForm>,
) -> PageResult {
    let existing = load_stat(&state, &key).await?;

    let result = async {
        let (amount, date) = form.parse()?;
        let updated = stat::update(
            &state.pool,
            existing.id,
            StatUpdate {
                amount: Some(amount),
                date: Some(date),
                title: None,
            },
        )
        .await?;
        Ok::<_, AppError>(updated)
    }
    .await;

    match result {
        Ok(updated) => {
            tracing::info!(id = updated.id, editor_id = user.id, "Stat edited");
            Ok(redirect_found("/"))
        }
        Err(err) => {
            let errors = form_errors(err)?;
            let title = stat_title::find_by_id(&state.pool, existing.title_id)
                .await?
                .map(|t| t.title)
                .unwrap_or_default();
            render_stat_form(&state, &user, &title, Some(existing.id), &form, errors)
        }
    }
}
