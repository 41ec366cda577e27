//! Authentication middleware
//!
//! Axum middleware for user resolution and policy enforcement.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::policy::{self, Operation, Resource};
use crate::auth::session::{SESSION_COOKIE, read_cookie};
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;
use crate::web::{PageError, login_redirect};
use shared::error::{AppError, ErrorCode};

/// Prefix of the JSON API
pub const API_PREFIX: &str = "/stat/api/";

/// User resolution middleware
///
/// Looks for a token in `Authorization: Bearer <token>` first, then in the
/// session cookie, and inserts the resolved [`CurrentUser`] into the request
/// extensions. Requests without a token continue anonymously.
///
/// The token only names the account: every request re-reads it, so a
/// disabled or deleted account loses access at once and the staff flag
/// follows the database.
///
/// | Situation | API route | HTML route |
/// |-----------|-----------|------------|
/// | no token | anonymous | anonymous |
/// | bad Bearer token | 401 | anonymous |
/// | disabled account | 401 | anonymous |
/// | bad cookie | anonymous | anonymous |
pub async fn resolve_user(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let is_api = req.uri().path().starts_with(API_PREFIX);
    let jwt_service = state.get_jwt_service();

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    if let Some(header) = auth_header {
        let claimed = JwtService::extract_from_header(header)
            .ok_or(JwtError::InvalidToken("Invalid authorization header".to_string()))
            .and_then(|token| jwt_service.validate_token(token))
            .and_then(CurrentUser::try_from)
            .map_err(|e| match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            });

        let resolved = match claimed {
            Ok(claimed) => load_account(&state, claimed).await,
            Err(err) => Err(err),
        };

        match resolved {
            Ok(user) => {
                req.extensions_mut().insert(user);
            }
            Err(err) => {
                security_log!(
                    "WARN",
                    "auth_failed",
                    error = err.message.clone(),
                    uri = format!("{:?}", req.uri())
                );
                if is_api {
                    return Err(err);
                }
            }
        }
        return Ok(next.run(req).await);
    }

    let from_cookie = read_cookie(req.headers(), SESSION_COOKIE).map(|token| {
        jwt_service
            .validate_token(token)
            .and_then(CurrentUser::try_from)
    });

    match from_cookie {
        Some(Ok(claimed)) => match load_account(&state, claimed).await {
            Ok(user) => {
                req.extensions_mut().insert(user);
            }
            Err(err) => {
                tracing::debug!(error = %err, "Ignoring session of unusable account");
            }
        },
        Some(Err(e)) => {
            tracing::debug!(error = %e, "Ignoring invalid session cookie");
        }
        None => {}
    }

    Ok(next.run(req).await)
}

/// Current state of the account a token names
async fn load_account(state: &ServerState, claimed: CurrentUser) -> Result<CurrentUser, AppError> {
    match user::find_by_id(&state.pool, claimed.id).await? {
        Some(found) if found.is_active => Ok(CurrentUser {
            id: found.id,
            username: found.username,
            is_staff: found.is_staff,
        }),
        Some(_) => Err(AppError::new(ErrorCode::AccountDisabled)),
        None => Err(AppError::invalid_token("Account no longer exists")),
    }
}

/// Policy middleware for one resource operation
///
/// # Usage
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/stat/api/companies/", get(handler::list))
///     .layer(middleware::from_fn(require_access(Resource::Company, Operation::List)));
/// ```
///
/// # Errors
///
/// Anonymous callers get 401, callers without the required role get 403.
pub fn require_access(
    resource: Resource,
    op: Operation,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req.extensions().get::<CurrentUser>();
            if let Err(err) = policy::authorize(user, resource, op) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.map(|u| u.id),
                    resource = resource.name(),
                    operation = op.name()
                );
                return Err(err);
            }

            Ok(next.run(req).await)
        })
    }
}

/// Page guard: anonymous visitors are redirected to the login page
pub async fn require_login(req: Request, next: Next) -> Response {
    if req.extensions().get::<CurrentUser>().is_none() {
        return login_redirect(req.uri());
    }
    next.run(req).await
}

/// Page guard: staff only; anonymous visitors are redirected to login,
/// other users get a 403 page
pub async fn require_staff(req: Request, next: Next) -> Response {
    match req.extensions().get::<CurrentUser>() {
        None => login_redirect(req.uri()),
        Some(user) if !user.is_staff => {
            security_log!(
                "WARN",
                "staff_required",
                user_id = user.id,
                uri = req.uri().path().to_string()
            );
            PageError(AppError::staff_required()).into_response()
        }
        Some(_) => next.run(req).await,
    }
}
