//! Token Auth API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Auth router
///
/// Login is public; `me` needs a resolved user.
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/stat/api/auth/login/", post(handler::login))
        .route("/stat/api/auth/me/", get(handler::me))
}
