//! Chart Data API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{Operation, Resource, require_access};
use crate::core::ServerState;

/// Chart data router; reading charts is reading stats
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/stat/api/data/", get(handler::chart_data))
        .layer(middleware::from_fn(require_access(
            Resource::Stat,
            Operation::List,
        )))
}
