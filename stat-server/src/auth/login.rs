//! Credential check shared by the API login and the login page

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::User;

use crate::auth::verify_password;
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;

/// A successful login: the issued token and the user it belongs to
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

/// Check a username-or-email and password and issue a token
///
/// Unknown logins and wrong passwords fail with the same error so the
/// response does not reveal which accounts exist.
pub async fn authenticate(state: &ServerState, login: &str, password: &str) -> AppResult<LoginOutcome> {
    let login = login.trim();
    if login.is_empty() {
        return Err(AppError::required("username"));
    }
    if password.is_empty() {
        return Err(AppError::required("password"));
    }

    let Some(credentials) = user::find_credentials(&state.pool, login).await? else {
        security_log!("WARN", "login_failed", login = login.to_string(), reason = "unknown_user");
        return Err(AppError::invalid_credentials());
    };

    if !verify_password(password, &credentials.password_hash) {
        security_log!("WARN", "login_failed", login = login.to_string(), reason = "bad_password");
        return Err(AppError::invalid_credentials());
    }

    if !credentials.is_active {
        security_log!("WARN", "login_failed", login = login.to_string(), reason = "inactive");
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let token = state
        .get_jwt_service()
        .generate_token(credentials.id, &credentials.username, credentials.is_staff)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(
        user_id = credentials.id,
        username = %credentials.username,
        is_staff = credentials.is_staff,
        "User logged in"
    );

    Ok(LoginOutcome {
        token,
        user: credentials.into(),
    })
}
