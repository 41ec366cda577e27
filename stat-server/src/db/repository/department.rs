//! Department Repository

use super::{RepoError, RepoResult, company, unique_violation};
use shared::error::ErrorCode;
use shared::models::{Department, DepartmentCreate, DepartmentSummary, DepartmentUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, title, slug, overview, company_id";

fn not_found(id: i64) -> RepoError {
    RepoError::Business(ErrorCode::DepartmentNotFound, format!("Department {id} not found"))
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Department>> {
    let departments = sqlx::query_as::<_, Department>(&format!(
        "SELECT {COLUMNS} FROM departments ORDER BY title, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(departments)
}

/// Departments with their stat title counts, optionally limited to one company
pub async fn find_all_with_counts(
    pool: &SqlitePool,
    company_id: Option<i64>,
) -> RepoResult<Vec<DepartmentSummary>> {
    let departments = sqlx::query_as::<_, DepartmentSummary>(
        "SELECT d.id, d.title, d.slug, d.overview, d.company_id, COUNT(t.id) AS total_stat_titles \
         FROM departments d LEFT JOIN stat_titles t ON t.department_id = d.id \
         WHERE ?1 IS NULL OR d.company_id = ?1 \
         GROUP BY d.id ORDER BY d.title, d.id",
    )
    .bind(company_id)
    .fetch_all(pool)
    .await?;
    Ok(departments)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Department>> {
    let department = sqlx::query_as::<_, Department>(&format!(
        "SELECT {COLUMNS} FROM departments WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(department)
}

pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> RepoResult<Option<Department>> {
    let department = sqlx::query_as::<_, Department>(&format!(
        "SELECT {COLUMNS} FROM departments WHERE slug = ? LIMIT 1"
    ))
    .bind(slug)
    .fetch_optional(pool)
    .await?;
    Ok(department)
}

/// Titles of a department's stat titles, ordered by title
pub async fn stat_title_titles(pool: &SqlitePool, department_id: i64) -> RepoResult<Vec<String>> {
    let titles = sqlx::query_scalar::<_, String>(
        "SELECT title FROM stat_titles WHERE department_id = ? ORDER BY title, id",
    )
    .bind(department_id)
    .fetch_all(pool)
    .await?;
    Ok(titles)
}

pub async fn create(pool: &SqlitePool, data: DepartmentCreate) -> RepoResult<Department> {
    company::ensure_exists(pool, data.company).await?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO departments (title, slug, overview, company_id) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.title)
    .bind(&data.slug)
    .bind(data.overview.unwrap_or_default())
    .bind(data.company)
    .fetch_one(pool)
    .await
    .map_err(|e| unique_violation(e, "departments.slug", ErrorCode::SlugAlreadyExists))?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create department".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: DepartmentUpdate) -> RepoResult<Department> {
    if find_by_id(pool, id).await?.is_none() {
        return Err(not_found(id));
    }
    if let Some(company_id) = data.company {
        company::ensure_exists(pool, company_id).await?;
    }

    sqlx::query(
        "UPDATE departments SET title = COALESCE(?1, title), slug = COALESCE(?2, slug), \
         overview = COALESCE(?3, overview), company_id = COALESCE(?4, company_id) WHERE id = ?5",
    )
    .bind(data.title)
    .bind(data.slug)
    .bind(data.overview)
    .bind(data.company)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| unique_violation(e, "departments.slug", ErrorCode::SlugAlreadyExists))?;

    find_by_id(pool, id).await?.ok_or_else(|| not_found(id))
}

/// Delete a department; stat titles and stats go with it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM departments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(not_found(id));
    }
    Ok(())
}

/// Fail with `DepartmentNotFound` unless the department exists
pub async fn ensure_exists(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    match find_by_id(pool, id).await? {
        Some(_) => Ok(()),
        None => Err(not_found(id)),
    }
}
