//! Company Repository

use super::{RepoError, RepoResult, unique_violation};
use shared::error::ErrorCode;
use shared::models::{Company, CompanyCreate, CompanySummary, CompanyUpdate};
use sqlx::SqlitePool;

fn not_found(id: i64) -> RepoError {
    RepoError::Business(ErrorCode::CompanyNotFound, format!("Company {id} not found"))
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Company>> {
    let companies =
        sqlx::query_as::<_, Company>("SELECT id, title, slug FROM companies ORDER BY title, id")
            .fetch_all(pool)
            .await?;
    Ok(companies)
}

/// All companies with their department counts
pub async fn find_all_with_counts(pool: &SqlitePool) -> RepoResult<Vec<CompanySummary>> {
    let companies = sqlx::query_as::<_, CompanySummary>(
        "SELECT c.id, c.title, c.slug, COUNT(d.id) AS total_departments \
         FROM companies c LEFT JOIN departments d ON d.company_id = c.id \
         GROUP BY c.id ORDER BY c.title, c.id",
    )
    .fetch_all(pool)
    .await?;
    Ok(companies)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Company>> {
    let company = sqlx::query_as::<_, Company>("SELECT id, title, slug FROM companies WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(company)
}

pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> RepoResult<Option<Company>> {
    let company =
        sqlx::query_as::<_, Company>("SELECT id, title, slug FROM companies WHERE slug = ? LIMIT 1")
            .bind(slug)
            .fetch_optional(pool)
            .await?;
    Ok(company)
}

/// Titles of a company's departments, ordered by title
pub async fn department_titles(pool: &SqlitePool, company_id: i64) -> RepoResult<Vec<String>> {
    let titles = sqlx::query_scalar::<_, String>(
        "SELECT title FROM departments WHERE company_id = ? ORDER BY title, id",
    )
    .bind(company_id)
    .fetch_all(pool)
    .await?;
    Ok(titles)
}

pub async fn create(pool: &SqlitePool, data: CompanyCreate) -> RepoResult<Company> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO companies (title, slug) VALUES (?, ?) RETURNING id",
    )
    .bind(&data.title)
    .bind(&data.slug)
    .fetch_one(pool)
    .await
    .map_err(|e| unique_violation(e, "companies.slug", ErrorCode::SlugAlreadyExists))?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create company".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CompanyUpdate) -> RepoResult<Company> {
    let rows = sqlx::query(
        "UPDATE companies SET title = COALESCE(?1, title), slug = COALESCE(?2, slug) WHERE id = ?3",
    )
    .bind(data.title)
    .bind(data.slug)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| unique_violation(e, "companies.slug", ErrorCode::SlugAlreadyExists))?;

    if rows.rows_affected() == 0 {
        return Err(not_found(id));
    }
    find_by_id(pool, id).await?.ok_or_else(|| not_found(id))
}

/// Delete a company; departments, stat titles and stats go with it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM companies WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(not_found(id));
    }
    Ok(())
}

/// Fail with `CompanyNotFound` unless the company exists
pub async fn ensure_exists(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    match find_by_id(pool, id).await? {
        Some(_) => Ok(()),
        None => Err(not_found(id)),
    }
}
