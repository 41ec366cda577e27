//! User API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{Operation, Resource, require_access};
use crate::core::ServerState;

const COLLECTION: &str = "/stat/api/users/";

/// User router (staff only)
pub fn router() -> Router<ServerState> {
    let list_routes = Router::new()
        .route(COLLECTION, get(handler::list))
        .layer(middleware::from_fn(require_access(
            Resource::User,
            Operation::List,
        )));

    let create_routes = Router::new()
        .route(COLLECTION, axum::routing::post(handler::create))
        .layer(middleware::from_fn(require_access(
            Resource::User,
            Operation::Create,
        )));

    list_routes.merge(create_routes)
}
