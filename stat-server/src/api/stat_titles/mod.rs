//! Stat title API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::auth::{Operation, Resource, require_access};
use crate::core::ServerState;

const COLLECTION: &str = "/stat/api/stat_titles/";
const ITEM: &str = "/stat/api/stat_titles/{id}/";

/// Stat title router
pub fn router() -> Router<ServerState> {
    let list_routes = Router::new()
        .route(COLLECTION, get(handler::list))
        .layer(middleware::from_fn(require_access(
            Resource::StatTitle,
            Operation::List,
        )));

    let retrieve_routes = Router::new()
        .route(ITEM, get(handler::retrieve))
        .layer(middleware::from_fn(require_access(
            Resource::StatTitle,
            Operation::Retrieve,
        )));

    let create_routes = Router::new()
        .route(COLLECTION, post(handler::create))
        .layer(middleware::from_fn(require_access(
            Resource::StatTitle,
            Operation::Create,
        )));

    let update_routes = Router::new()
        .route(ITEM, put(handler::update).patch(handler::update))
        .layer(middleware::from_fn(require_access(
            Resource::StatTitle,
            Operation::Update,
        )));

    let delete_routes = Router::new()
        .route(ITEM, delete(handler::delete))
        .layer(middleware::from_fn(require_access(
            Resource::StatTitle,
            Operation::Delete,
        )));

    list_routes
        .merge(retrieve_routes)
        .merge(create_routes)
        .merge(update_routes)
        .merge(delete_routes)
}
