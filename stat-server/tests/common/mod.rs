//! In-process test harness: full router over a fresh in-memory database

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use shared::models::User;
use stat_server::db::repository::user;
use stat_server::{ServerState, build_app};
use tower::ServiceExt;

pub struct TestApp {
    pub state: ServerState,
    router: Router,
}

/// A created account and a token for it
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let state = ServerState::for_testing().await.unwrap();
        let router = build_app(&state).with_state(state.clone());
        Self { state, router }
    }

    pub async fn create_user(&self, username: &str, is_staff: bool) -> TestUser {
        let user = user::create_with_password(
            &self.state.pool,
            username,
            &format!("{username}@example.com"),
            "",
            "password123",
            is_staff,
        )
        .await
        .unwrap();
        let token = self
            .state
            .get_jwt_service()
            .generate_token(user.id, &user.username, user.is_staff)
            .unwrap();
        TestUser { user, token }
    }

    pub async fn staff(&self) -> TestUser {
        self.create_user("boss", true).await
    }

    pub async fn regular(&self) -> TestUser {
        self.create_user("clerk", false).await
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// JSON API call; returns status and parsed body (`Null` when empty)
    pub async fn api(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.send(request).await;
        let status = response.status();
        (status, json_body(response).await)
    }

    /// Page request with the session cookie
    pub async fn page(&self, method: Method, uri: &str, token: Option<&str>, form: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("stat_session={token}"));
        }
        let request = match form {
            Some(form) => builder
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.state.pool)
            .await
            .unwrap()
    }
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let text = body_text(response).await;
    if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap()
    }
}

pub fn location(response: &Response<Body>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}
