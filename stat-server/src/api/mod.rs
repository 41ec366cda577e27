//! JSON API under `/stat/api/`
//!
//! # Structure
//!
//! - [`companies`] - company CRUD
//! - [`departments`] - department CRUD
//! - [`stat_titles`] - stat title CRUD
//! - [`stats`] - stat CRUD
//! - [`users`] - user management (staff)
//! - [`auth`] - token login and current user
//! - [`data`] - chart data
//!
//! Every route group is wrapped in [`require_access`](crate::auth::require_access)
//! for its resource and operation.

pub mod auth;
pub mod companies;
pub mod data;
pub mod departments;
pub mod stat_titles;
pub mod stats;
pub mod users;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::rejection::{JsonRejection, PathRejection};

use crate::core::ServerState;
use shared::error::{AppError, AppResult, ErrorCode};

/// All API routes
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(companies::router())
        .merge(departments::router())
        .merge(stat_titles::router())
        .merge(stats::router())
        .merge(users::router())
        .merge(auth::router())
        .merge(data::router())
}

/// Unwrap a JSON body, turning malformed or incomplete input into a 400
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(AppError::validation(rejection.body_text())),
    }
}

/// Numeric id from an item path; anything else is the resource's `not_found`
pub(crate) fn item_id(path: Result<Path<i64>, PathRejection>, not_found: ErrorCode) -> AppResult<i64> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Unparsable item id");
            Err(AppError::new(not_found))
        }
    }
}
