//! Stat Repository
//!
//! Amounts are stored as decimal text and parsed back into `Decimal`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::{RepoError, RepoResult, stat_title, user};
use shared::error::ErrorCode;
use shared::models::{Stat, StatUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, amount, date, owner_id, title_id";

/// Raw `stats` row
#[derive(sqlx::FromRow)]
struct StatRow {
    id: i64,
    amount: String,
    date: NaiveDate,
    owner_id: i64,
    title_id: i64,
}

impl TryFrom<StatRow> for Stat {
    type Error = RepoError;

    fn try_from(row: StatRow) -> Result<Self, Self::Error> {
        let amount = Decimal::from_str(&row.amount).map_err(|e| {
            RepoError::Database(format!("Stat {} has a corrupt amount {:?}: {e}", row.id, row.amount))
        })?;
        Ok(Stat {
            id: row.id,
            amount,
            date: row.date,
            owner_id: row.owner_id,
            title_id: row.title_id,
        })
    }
}

fn into_stats(rows: Vec<StatRow>) -> RepoResult<Vec<Stat>> {
    rows.into_iter().map(Stat::try_from).collect()
}

fn not_found(id: i64) -> RepoError {
    RepoError::Business(ErrorCode::StatNotFound, format!("Stat {id} not found"))
}

/// Values for a new stat, owner already resolved
#[derive(Debug, Clone)]
pub struct NewStat {
    pub amount: Decimal,
    pub date: NaiveDate,
    pub owner_id: i64,
    pub title_id: i64,
}

/// All stats, newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Stat>> {
    let rows = sqlx::query_as::<_, StatRow>(&format!(
        "SELECT {COLUMNS} FROM stats ORDER BY date DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;
    into_stats(rows)
}

/// All stats, oldest first (chart input)
pub async fn find_all_chronological(pool: &SqlitePool) -> RepoResult<Vec<Stat>> {
    let rows = sqlx::query_as::<_, StatRow>(&format!(
        "SELECT {COLUMNS} FROM stats ORDER BY date, id"
    ))
    .fetch_all(pool)
    .await?;
    into_stats(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Stat>> {
    let row = sqlx::query_as::<_, StatRow>(&format!("SELECT {COLUMNS} FROM stats WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(Stat::try_from).transpose()
}

/// Stats of one stat title, oldest first
pub async fn find_by_title(pool: &SqlitePool, title_id: i64) -> RepoResult<Vec<Stat>> {
    let rows = sqlx::query_as::<_, StatRow>(&format!(
        "SELECT {COLUMNS} FROM stats WHERE title_id = ? ORDER BY date, id"
    ))
    .bind(title_id)
    .fetch_all(pool)
    .await?;
    into_stats(rows)
}

/// Stats of every stat title in a department, oldest first
pub async fn find_by_department(pool: &SqlitePool, department_id: i64) -> RepoResult<Vec<Stat>> {
    let rows = sqlx::query_as::<_, StatRow>(
        "SELECT s.id, s.amount, s.date, s.owner_id, s.title_id \
         FROM stats s JOIN stat_titles t ON t.id = s.title_id \
         WHERE t.department_id = ? ORDER BY s.date, s.id",
    )
    .bind(department_id)
    .fetch_all(pool)
    .await?;
    into_stats(rows)
}

pub async fn create(pool: &SqlitePool, data: NewStat) -> RepoResult<Stat> {
    stat_title::ensure_exists(pool, data.title_id).await?;
    user::ensure_exists(pool, data.owner_id).await?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO stats (amount, date, owner_id, title_id) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(data.amount.to_string())
    .bind(data.date)
    .bind(data.owner_id)
    .bind(data.title_id)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create stat".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: StatUpdate) -> RepoResult<Stat> {
    if find_by_id(pool, id).await?.is_none() {
        return Err(not_found(id));
    }
    if let Some(title_id) = data.title {
        stat_title::ensure_exists(pool, title_id).await?;
    }

    sqlx::query(
        "UPDATE stats SET amount = COALESCE(?1, amount), date = COALESCE(?2, date), \
         title_id = COALESCE(?3, title_id) WHERE id = ?4",
    )
    .bind(data.amount.map(|a| a.to_string()))
    .bind(data.date)
    .bind(data.title)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id).await?.ok_or_else(|| not_found(id))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM stats WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(not_found(id));
    }
    Ok(())
}
