//! Router assembly

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;
use crate::{api, auth, middleware, web};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id generator (UUID v4)
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// All routes, no global middleware
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // JSON API under /stat/api/
        .merge(api::router())
        // HTML pages
        .merge(web::router())
}

/// Fully configured application
///
/// Used by the HTTP server and by the in-process integration tests.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        // Request logging sees the resolved user
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Resolve the current user before anything else runs
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth::resolve_user,
        ))
}
