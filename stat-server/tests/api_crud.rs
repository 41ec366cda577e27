mod common;

use common::{TestApp, TestUser};
use http::{Method, StatusCode};
use serde_json::{Value, json};

async fn post(app: &TestApp, staff: &TestUser, uri: &str, body: Value) -> Value {
    let (status, created) = app.api(Method::POST, uri, Some(&staff.token), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{uri}: {created}");
    created
}

/// Company -> Department -> StatTitle; returns the stat title id
async fn hierarchy(app: &TestApp, staff: &TestUser) -> (i64, i64, i64) {
    let company = post(app, staff, "/stat/api/companies/", json!({"title": "Acme", "slug": "acme"})).await;
    let department = post(
        app,
        staff,
        "/stat/api/departments/",
        json!({"title": "Sales", "slug": "sales", "company": company["id"], "overview": "Sales floor"}),
    )
    .await;
    let stat_title = post(
        app,
        staff,
        "/stat/api/stat_titles/",
        json!({"title": "Hoof sales", "department": department["id"]}),
    )
    .await;
    (
        company["id"].as_i64().unwrap(),
        department["id"].as_i64().unwrap(),
        stat_title["id"].as_i64().unwrap(),
    )
}

#[tokio::test]
async fn test_nested_titles_in_representations() {
    let app = TestApp::new().await;
    let staff = app.staff().await;
    let (company_id, department_id, stat_title_id) = hierarchy(&app, &staff).await;
    post(
        &app,
        &staff,
        "/stat/api/stats/",
        json!({"amount": 2.5, "date": "2020-04-20", "title": stat_title_id}),
    )
    .await;

    let (_, company) = app
        .api(Method::GET, &format!("/stat/api/companies/{company_id}/"), Some(&staff.token), None)
        .await;
    assert_eq!(company["departments"], json!(["Sales"]));

    let (_, department) = app
        .api(Method::GET, &format!("/stat/api/departments/{department_id}/"), Some(&staff.token), None)
        .await;
    assert_eq!(department["company"], company_id);
    assert_eq!(department["overview"], "Sales floor");
    assert_eq!(department["stat_titles"], json!(["Hoof sales"]));

    let (_, stat_title) = app
        .api(Method::GET, &format!("/stat/api/stat_titles/{stat_title_id}/"), Some(&staff.token), None)
        .await;
    assert_eq!(stat_title["department"], department_id);
    assert_eq!(stat_title["stats"], json!(["2020-04-20: 2.5"]));
}

#[tokio::test]
async fn test_chart_data_round_trip() {
    let app = TestApp::new().await;
    let staff = app.staff().await;
    let (_, _, stat_title_id) = hierarchy(&app, &staff).await;

    for (amount, date) in [(3, "2020-04-21"), (2, "2020-04-20")] {
        post(
            &app,
            &staff,
            "/stat/api/stats/",
            json!({"amount": amount, "date": date, "title": stat_title_id}),
        )
        .await;
    }

    let (status, data) = app.api(Method::GET, "/stat/api/data/", Some(&staff.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        data,
        json!({"stats_dict": {
            stat_title_id.to_string(): {
                "default": [2.0, 3.0],
                "labels": ["2020-04-20", "2020-04-21"]
            }
        }})
    );
}

#[tokio::test]
async fn test_chart_data_empty_store() {
    let app = TestApp::new().await;
    let user = app.regular().await;
    let (status, data) = app.api(Method::GET, "/stat/api/data/", Some(&user.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data, json!({"stats_dict": {}}));
}

#[tokio::test]
async fn test_missing_field_is_bad_request() {
    let app = TestApp::new().await;
    let staff = app.staff().await;

    let (status, body) = app
        .api(Method::POST, "/stat/api/companies/", Some(&staff.token), Some(json!({"title": "No slug"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
    assert_eq!(app.count("companies").await, 0);

    let (status, _) = app
        .api(Method::POST, "/stat/api/companies/", Some(&staff.token), Some(json!({"title": "", "slug": "x"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .api(Method::POST, "/stat/api/companies/", Some(&staff.token), Some(json!({"title": "Bad", "slug": "a b"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3005);
    assert_eq!(app.count("companies").await, 0);
}

#[tokio::test]
async fn test_invalid_stat_values_are_rejected() {
    let app = TestApp::new().await;
    let staff = app.staff().await;
    let (_, _, stat_title_id) = hierarchy(&app, &staff).await;

    for body in [
        json!({"amount": "lots", "date": "2020-01-01", "title": stat_title_id}),
        json!({"amount": 1, "date": "2020-02-30", "title": stat_title_id}),
        json!({"date": "2020-01-01", "title": stat_title_id}),
    ] {
        let (status, _) = app
            .api(Method::POST, "/stat/api/stats/", Some(&staff.token), Some(body))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
    assert_eq!(app.count("stats").await, 0);
}

#[tokio::test]
async fn test_duplicate_slug_conflicts() {
    let app = TestApp::new().await;
    let staff = app.staff().await;
    post(&app, &staff, "/stat/api/companies/", json!({"title": "Acme", "slug": "acme"})).await;

    let (status, body) = app
        .api(
            Method::POST,
            "/stat/api/companies/",
            Some(&staff.token),
            Some(json!({"title": "Acme again", "slug": "acme"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 3004);
    assert_eq!(app.count("companies").await, 1);
}

#[tokio::test]
async fn test_unknown_references_are_not_found() {
    let app = TestApp::new().await;
    let staff = app.staff().await;

    let (status, body) = app
        .api(
            Method::POST,
            "/stat/api/departments/",
            Some(&staff.token),
            Some(json!({"title": "Orphan", "slug": "orphan", "company": 42})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3001);

    let (status, _) = app
        .api(Method::GET, "/stat/api/stats/42/", Some(&staff.token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .api(Method::DELETE, "/stat/api/companies/42/", Some(&staff.token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let app = TestApp::new().await;
    let staff = app.staff().await;
    let (_, department_id, _) = hierarchy(&app, &staff).await;

    let (status, updated) = app
        .api(
            Method::PUT,
            &format!("/stat/api/departments/{department_id}/"),
            Some(&staff.token),
            Some(json!({"title": "Retail"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Retail");
    assert_eq!(updated["slug"], "sales");
    assert_eq!(updated["overview"], "Sales floor");
}

#[tokio::test]
async fn test_company_delete_cascades() {
    let app = TestApp::new().await;
    let staff = app.staff().await;
    let (company_id, _, stat_title_id) = hierarchy(&app, &staff).await;
    post(
        &app,
        &staff,
        "/stat/api/stats/",
        json!({"amount": 1, "date": "2021-01-01", "title": stat_title_id}),
    )
    .await;

    let (status, body) = app
        .api(Method::DELETE, &format!("/stat/api/companies/{company_id}/"), Some(&staff.token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    for table in ["companies", "departments", "stat_titles", "stats"] {
        assert_eq!(app.count(table).await, 0, "{table}");
    }
    assert_eq!(app.count("users").await, 1);
}

#[tokio::test]
async fn test_department_delete_cascades() {
    let app = TestApp::new().await;
    let staff = app.staff().await;
    let (company_id, department_id, stat_title_id) = hierarchy(&app, &staff).await;

    let (status, _) = app
        .api(Method::DELETE, &format!("/stat/api/departments/{department_id}/"), Some(&staff.token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .api(Method::GET, &format!("/stat/api/stat_titles/{stat_title_id}/"), Some(&staff.token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, stat_titles) = app.api(Method::GET, "/stat/api/stat_titles/", Some(&staff.token), None).await;
    assert_eq!(stat_titles, json!([]));

    let (_, company) = app
        .api(Method::GET, &format!("/stat/api/companies/{company_id}/"), Some(&staff.token), None)
        .await;
    assert_eq!(company["departments"], json!([]));
}

#[tokio::test]
async fn test_stats_listed_newest_first() {
    let app = TestApp::new().await;
    let staff = app.staff().await;
    let (_, _, stat_title_id) = hierarchy(&app, &staff).await;
    for date in ["2020-01-01", "2020-03-01", "2020-02-01"] {
        post(
            &app,
            &staff,
            "/stat/api/stats/",
            json!({"amount": 1, "date": date, "title": stat_title_id}),
        )
        .await;
    }

    let (_, stats) = app.api(Method::GET, "/stat/api/stats/", Some(&staff.token), None).await;
    let dates: Vec<&str> = stats
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2020-03-01", "2020-02-01", "2020-01-01"]);
}

#[tokio::test]
async fn test_staff_creates_user_with_profile() {
    let app = TestApp::new().await;
    let staff = app.staff().await;

    let (status, created) = app
        .api(
            Method::POST,
            "/stat/api/users/",
            Some(&staff.token),
            Some(json!({"username": "vera", "email": "vera@example.com", "password": "longenough"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["is_staff"], false);
    assert!(created.get("password").is_none());
    assert_eq!(app.count("user_profiles").await, 2);

    let (status, body) = app
        .api(
            Method::POST,
            "/stat/api/users/",
            Some(&staff.token),
            Some(json!({"username": "vera", "email": "other@example.com", "password": "longenough"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 5002);

    let (status, body) = app
        .api(
            Method::POST,
            "/stat/api/users/",
            Some(&staff.token),
            Some(json!({"username": "short", "email": "short@example.com", "password": "123"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5005);
    assert_eq!(app.count("users").await, 2);
}

#[tokio::test]
async fn test_non_numeric_ids_are_not_found() {
    let app = TestApp::new().await;
    let staff = app.staff().await;

    for (uri, code) in [
        ("/stat/api/stats/abc/", 4001),
        ("/stat/api/companies/abc/", 3001),
        ("/stat/api/departments/1.5/", 3002),
        ("/stat/api/stat_titles/-x-/", 3003),
    ] {
        let (status, body) = app.api(Method::GET, uri, Some(&staff.token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["code"], code, "{uri}");
    }

    let (status, body) = app
        .api(Method::PATCH, "/stat/api/stats/abc/", Some(&staff.token), Some(json!({"amount": 1})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);

    let (status, _) = app
        .api(Method::DELETE, "/stat/api/companies/abc/", Some(&staff.token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_fields_trimmed_before_validation() {
    let app = TestApp::new().await;
    let staff = app.staff().await;

    let (status, created) = app
        .api(
            Method::POST,
            "/stat/api/users/",
            Some(&staff.token),
            Some(json!({
                "username": " vera ",
                "email": "vera@example.co ",
                "first_name": " Vera ",
                "password": "longenough"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["username"], "vera");
    assert_eq!(created["email"], "vera@example.co");
    assert_eq!(created["first_name"], "Vera");
}
