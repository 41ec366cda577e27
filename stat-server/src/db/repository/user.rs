//! User Repository
//!
//! Users and their profiles are always written together in one transaction.

use super::{RepoError, RepoResult, unique_violation};
use crate::auth::hash_password;
use shared::error::ErrorCode;
use shared::models::{Profile, User, UserUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, username, first_name, email, is_staff, is_active";

/// Row used for authentication; the hash stays inside the server
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub email: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub password_hash: String,
}

impl From<UserCredentials> for User {
    fn from(row: UserCredentials) -> Self {
        User {
            id: row.id,
            username: row.username,
            first_name: row.first_name,
            email: row.email,
            is_staff: row.is_staff,
            is_active: row.is_active,
        }
    }
}

fn not_found(id: i64) -> RepoError {
    RepoError::Business(ErrorCode::UserNotFound, format!("User {id} not found"))
}

fn map_unique(err: sqlx::Error) -> RepoError {
    match unique_violation(err, "users.username", ErrorCode::UsernameAlreadyExists) {
        RepoError::Duplicate(msg) if msg.contains("users.email") => RepoError::Business(
            ErrorCode::EmailAlreadyExists,
            ErrorCode::EmailAlreadyExists.message().to_string(),
        ),
        other => other,
    }
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM users ORDER BY username"
    ))
    .fetch_all(pool)
    .await?;
    Ok(users)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Look up login credentials by username or email
pub async fn find_credentials(
    pool: &SqlitePool,
    login: &str,
) -> RepoResult<Option<UserCredentials>> {
    let user = sqlx::query_as::<_, UserCredentials>(&format!(
        "SELECT {COLUMNS}, password_hash FROM users WHERE username = ?1 OR email = ?1 \
         ORDER BY username = ?1 DESC LIMIT 1"
    ))
    .bind(login)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn find_profile(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<Profile>> {
    let profile = sqlx::query_as::<_, Profile>(
        "SELECT id, user_id, updated_at FROM user_profiles WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(profile)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Create a user and its profile
pub async fn create_with_password(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    first_name: &str,
    password: &str,
    is_staff: bool,
) -> RepoResult<User> {
    let password_hash = hash_password(password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;
    let now = now_millis();

    let mut tx = pool.begin().await?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (username, email, first_name, password_hash, is_staff, is_active, created_at) \
         VALUES (?, ?, ?, ?, ?, 1, ?) RETURNING id",
    )
    .bind(username)
    .bind(email)
    .bind(first_name)
    .bind(&password_hash)
    .bind(is_staff)
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(map_unique)?;

    sqlx::query("INSERT INTO user_profiles (user_id, updated_at) VALUES (?, ?)")
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

/// Update a user and touch its profile
///
/// A missing profile is recreated so every user keeps exactly one.
pub async fn update(pool: &SqlitePool, id: i64, data: UserUpdate) -> RepoResult<User> {
    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE users SET username = COALESCE(?1, username), first_name = COALESCE(?2, first_name), \
         email = COALESCE(?3, email) WHERE id = ?4",
    )
    .bind(data.username)
    .bind(data.first_name)
    .bind(data.email)
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(map_unique)?;

    if rows.rows_affected() == 0 {
        return Err(not_found(id));
    }

    sqlx::query(
        "INSERT INTO user_profiles (user_id, updated_at) VALUES (?1, ?2) \
         ON CONFLICT(user_id) DO UPDATE SET updated_at = excluded.updated_at",
    )
    .bind(id)
    .bind(now_millis())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    find_by_id(pool, id).await?.ok_or_else(|| not_found(id))
}

/// Fail with `UserNotFound` unless the user exists
pub async fn ensure_exists(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    match find_by_id(pool, id).await? {
        Some(_) => Ok(()),
        None => Err(not_found(id)),
    }
}
