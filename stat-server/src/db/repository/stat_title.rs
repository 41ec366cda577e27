//! Stat Title Repository

use super::{RepoError, RepoResult, department};
use shared::error::ErrorCode;
use shared::models::{StatTitle, StatTitleCreate, StatTitleUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, title, overview, department_id";

fn not_found(id: i64) -> RepoError {
    RepoError::Business(ErrorCode::StatTitleNotFound, format!("Stat title {id} not found"))
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<StatTitle>> {
    let titles = sqlx::query_as::<_, StatTitle>(&format!(
        "SELECT {COLUMNS} FROM stat_titles ORDER BY title, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(titles)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<StatTitle>> {
    let title = sqlx::query_as::<_, StatTitle>(&format!(
        "SELECT {COLUMNS} FROM stat_titles WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(title)
}

pub async fn find_by_department(
    pool: &SqlitePool,
    department_id: i64,
) -> RepoResult<Vec<StatTitle>> {
    let titles = sqlx::query_as::<_, StatTitle>(&format!(
        "SELECT {COLUMNS} FROM stat_titles WHERE department_id = ? ORDER BY title, id"
    ))
    .bind(department_id)
    .fetch_all(pool)
    .await?;
    Ok(titles)
}

pub async fn create(pool: &SqlitePool, data: StatTitleCreate) -> RepoResult<StatTitle> {
    department::ensure_exists(pool, data.department).await?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO stat_titles (title, overview, department_id) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(&data.title)
    .bind(data.overview.unwrap_or_default())
    .bind(data.department)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create stat title".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: StatTitleUpdate) -> RepoResult<StatTitle> {
    if find_by_id(pool, id).await?.is_none() {
        return Err(not_found(id));
    }
    if let Some(department_id) = data.department {
        department::ensure_exists(pool, department_id).await?;
    }

    sqlx::query(
        "UPDATE stat_titles SET title = COALESCE(?1, title), overview = COALESCE(?2, overview), \
         department_id = COALESCE(?3, department_id) WHERE id = ?4",
    )
    .bind(data.title)
    .bind(data.overview)
    .bind(data.department)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id).await?.ok_or_else(|| not_found(id))
}

/// Delete a stat title together with its stats
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM stat_titles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(not_found(id));
    }
    Ok(())
}

/// Fail with `StatTitleNotFound` unless the stat title exists
pub async fn ensure_exists(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    match find_by_id(pool, id).await? {
        Some(_) => Ok(()),
        None => Err(not_found(id)),
    }
}
