//! Company API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::auth::{Operation, Resource, require_access};
use crate::core::ServerState;

const COLLECTION: &str = "/stat/api/companies/";
const ITEM: &str = "/stat/api/companies/{id}/";

/// Company router
pub fn router() -> Router<ServerState> {
    let list_routes = Router::new()
        .route(COLLECTION, get(handler::list))
        .layer(middleware::from_fn(require_access(
            Resource::Company,
            Operation::List,
        )));

    let retrieve_routes = Router::new()
        .route(ITEM, get(handler::retrieve))
        .layer(middleware::from_fn(require_access(
            Resource::Company,
            Operation::Retrieve,
        )));

    let create_routes = Router::new()
        .route(COLLECTION, post(handler::create))
        .layer(middleware::from_fn(require_access(
            Resource::Company,
            Operation::Create,
        )));

    let update_routes = Router::new()
        .route(ITEM, put(handler::update).patch(handler::update))
        .layer(middleware::from_fn(require_access(
            Resource::Company,
            Operation::Update,
        )));

    let delete_routes = Router::new()
        .route(ITEM, delete(handler::delete))
        .layer(middleware::from_fn(require_access(
            Resource::Company,
            Operation::Delete,
        )));

    list_routes
        .merge(retrieve_routes)
        .merge(create_routes)
        .merge(update_routes)
        .merge(delete_routes)
}
