//! HTML pages
//!
//! # Structure
//!
//! - [`pages`] - department list and detail, stat and stat title forms
//! - [`accounts`] - login, logout, profile and profile edit
//!
//! Pages are rendered with handlebars from templates compiled into the
//! binary. Failures render an error page with the status of the
//! underlying [`AppError`].

pub mod accounts;
pub mod pages;

use axum::Router;
use axum::http::{StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use handlebars::{Handlebars, TemplateError};
use serde::Serialize;
use serde_json::{Value, json};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::RepoError;
use shared::error::{AppError, AppResult};

/// Login page path
pub const LOGIN_PATH: &str = "/auth/login/";

const PARTIALS: [(&str, &str); 2] = [
    ("header", include_str!("templates/header.hbs")),
    ("footer", include_str!("templates/footer.hbs")),
];

const PAGES: [(&str, &str); 8] = [
    ("department_list", include_str!("templates/department_list.hbs")),
    ("department_detail", include_str!("templates/department_detail.hbs")),
    ("stat_title_form", include_str!("templates/stat_title_form.hbs")),
    ("stat_form", include_str!("templates/stat_form.hbs")),
    ("login", include_str!("templates/login.hbs")),
    ("logged_out", include_str!("templates/logged_out.hbs")),
    ("profile", include_str!("templates/profile.hbs")),
    ("profile_edit", include_str!("templates/profile_edit.hbs")),
];

/// Compiled page templates
pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    /// Compile every embedded template
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        for (name, source) in PARTIALS {
            registry.register_partial(name, source)?;
        }
        for (name, source) in PAGES {
            registry.register_template_string(name, source)?;
        }
        Ok(Self { registry })
    }

    /// Render a page to HTML
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> AppResult<Html<String>> {
        self.registry.render(name, data).map(Html).map_err(|e| {
            tracing::error!(template = name, error = %e, "Template rendering failed");
            AppError::template(format!("Failed to render {name}"))
        })
    }
}

/// Navigation context shared by every page
pub(crate) fn page_context(user: Option<&CurrentUser>, page_title: &str, page: Value) -> Value {
    json!({
        "page_title": page_title,
        "nav": {
            "user": user.map(|u| json!({"username": u.username, "is_staff": u.is_staff})),
        },
        "page": page,
    })
}

/// Error rendered as an HTML page
#[derive(Debug)]
pub struct PageError(pub AppError);

/// Result type of page handlers
pub type PageResult = Result<Response, PageError>;

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError(err)
    }
}

impl From<RepoError> for PageError {
    fn from(err: RepoError) -> Self {
        PageError(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.http_status();
        if status.is_server_error() {
            tracing::error!(code = %self.0.code, message = %self.0.message, "Page failed");
        }
        let body = format!(
            "<!DOCTYPE html>\n<html lang=\"ru\">\n<head><meta charset=\"utf-8\"><title>ошибка {code}</title></head>\n\
             <body>\n<h1>{code}</h1>\n<p>{message}</p>\n<p><a href=\"/\">на главную</a></p>\n</body>\n</html>\n",
            code = status.as_u16(),
            message = handlebars::html_escape(&self.0.message),
        );
        (status, Html(body)).into_response()
    }
}

/// 302 Found to `location`
pub fn redirect_found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// 302 to the login page, remembering the requested path
pub fn login_redirect(uri: &Uri) -> Response {
    let next = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let encoded: String = url::form_urlencoded::byte_serialize(next.as_bytes()).collect();
    redirect_found(&format!("{LOGIN_PATH}?next={encoded}"))
}

/// Validation and conflict errors are shown on the form; anything else
/// becomes an error page
pub(crate) fn is_form_error(err: &AppError) -> bool {
    matches!(
        err.http_status(),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT
    )
}

/// All page routes
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(pages::router())
        .merge(accounts::router())
}
