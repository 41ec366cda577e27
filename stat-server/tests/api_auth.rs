mod common;

use common::TestApp;
use http::{Method, StatusCode};
use serde_json::json;
use shared::models::UserUpdate;
use stat_server::db::repository::user;

async fn login(app: &TestApp, username: &str, password: &str) -> (StatusCode, serde_json::Value) {
    app.api(
        Method::POST,
        "/stat/api/auth/login/",
        None,
        Some(json!({"username": username, "password": password})),
    )
    .await
}

#[tokio::test]
async fn test_login_by_username_and_email() {
    let app = TestApp::new().await;
    let clerk = app.regular().await;

    for name in ["clerk", "clerk@example.com"] {
        let (status, body) = login(&app, name, "password123").await;
        assert_eq!(status, StatusCode::OK, "{name}");
        assert_eq!(body["user"]["id"], clerk.user.id);
        assert_eq!(body["user"]["is_staff"], false);

        let token = body["token"].as_str().unwrap();
        let (status, me) = app.api(Method::GET, "/stat/api/auth/me/", Some(token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["username"], "clerk");
    }
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    app.regular().await;

    let (status, body) = login(&app, "clerk", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    let (status, body) = login(&app, "nobody", "password123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);
}

#[tokio::test]
async fn test_login_requires_fields() {
    let app = TestApp::new().await;

    let (status, body) = login(&app, "", "password123").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7);

    let (status, _) = app
        .api(Method::POST, "/stat/api/auth/login/", None, Some(json!({"username": "clerk"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_requires_authentication() {
    let app = TestApp::new().await;
    let (status, body) = app.api(Method::GET, "/stat/api/auth/me/", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);
}

#[tokio::test]
async fn test_token_follows_renamed_account() {
    let app = TestApp::new().await;
    let clerk = app.regular().await;

    user::update(
        &app.state.pool,
        clerk.user.id,
        UserUpdate {
            username: Some("clerk2".into()),
            first_name: None,
            email: None,
        },
    )
    .await
    .unwrap();

    let (status, me) = app.api(Method::GET, "/stat/api/auth/me/", Some(&clerk.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "clerk2");

    let (status, _) = login(&app, "clerk2", "password123").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_disabled_account_loses_existing_token() {
    let app = TestApp::new().await;
    let clerk = app.regular().await;

    sqlx::query("UPDATE users SET is_active = 0 WHERE id = ?")
        .bind(clerk.user.id)
        .execute(&app.state.pool)
        .await
        .unwrap();

    let (status, body) = app
        .api(Method::GET, "/stat/api/companies/", Some(&clerk.token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1007);

    let (status, body) = login(&app, "clerk", "password123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1007);
}

#[tokio::test]
async fn test_deleted_account_token_is_invalid() {
    let app = TestApp::new().await;
    let clerk = app.regular().await;

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(clerk.user.id)
        .execute(&app.state.pool)
        .await
        .unwrap();

    let (status, body) = app.api(Method::GET, "/stat/api/stats/", Some(&clerk.token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004);
}

#[tokio::test]
async fn test_staff_flag_read_from_account() {
    let app = TestApp::new().await;
    let boss = app.staff().await;

    sqlx::query("UPDATE users SET is_staff = 0 WHERE id = ?")
        .bind(boss.user.id)
        .execute(&app.state.pool)
        .await
        .unwrap();

    let (status, body) = app
        .api(
            Method::POST,
            "/stat/api/companies/",
            Some(&boss.token),
            Some(json!({"title": "Acme", "slug": "acme"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2002);
    assert_eq!(app.count("companies").await, 0);
}
