use super::*;
use crate::db::DbService;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{
    Company, CompanyCreate, CompanyUpdate, Department, DepartmentCreate, StatTitle,
    StatTitleCreate, StatUpdate, User, UserUpdate,
};
use sqlx::SqlitePool;
use std::str::FromStr;

async fn pool() -> SqlitePool {
    DbService::in_memory().await.unwrap().pool
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

struct Fixture {
    company: Company,
    department: Department,
    stat_title: StatTitle,
    owner: User,
}

async fn fixture(pool: &SqlitePool) -> Fixture {
    let company = company::create(
        pool,
        CompanyCreate {
            title: "Рога и копыта".into(),
            slug: "Roga-i-Kopyta".into(),
        },
    )
    .await
    .unwrap();
    let department = department::create(
        pool,
        DepartmentCreate {
            title: "Sales".into(),
            slug: "sales".into(),
            company: company.id,
            overview: None,
        },
    )
    .await
    .unwrap();
    let stat_title = stat_title::create(
        pool,
        StatTitleCreate {
            title: "Hoof sales".into(),
            department: department.id,
            overview: Some("Units per day".into()),
        },
    )
    .await
    .unwrap();
    let owner = user::create_with_password(pool, "anna", "anna@example.com", "Anna", "password1", false)
        .await
        .unwrap();

    Fixture {
        company,
        department,
        stat_title,
        owner,
    }
}

fn new_stat(f: &Fixture, amount: &str, day: &str) -> stat::NewStat {
    stat::NewStat {
        amount: Decimal::from_str(amount).unwrap(),
        date: date(day),
        owner_id: f.owner.id,
        title_id: f.stat_title.id,
    }
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_company_crud_and_slug_lookup() {
    let pool = pool().await;
    let f = fixture(&pool).await;

    let found = company::find_by_slug(&pool, "Roga-i-Kopyta").await.unwrap().unwrap();
    assert_eq!(found, f.company);
    assert!(company::find_by_slug(&pool, "roga-i-kopyta").await.unwrap().is_none());

    let updated = company::update(
        &pool,
        f.company.id,
        CompanyUpdate {
            title: Some("Horns".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.title, "Horns");
    assert_eq!(updated.slug, "Roga-i-Kopyta");

    let titles = company::department_titles(&pool, f.company.id).await.unwrap();
    assert_eq!(titles, vec!["Sales".to_string()]);
}

#[tokio::test]
async fn test_duplicate_slug_is_rejected() {
    let pool = pool().await;
    let f = fixture(&pool).await;

    let err = company::create(
        &pool,
        CompanyCreate {
            title: "Copy".into(),
            slug: f.company.slug.clone(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::SlugAlreadyExists, _)));

    let err = department::create(
        &pool,
        DepartmentCreate {
            title: "Copy".into(),
            slug: "sales".into(),
            company: f.company.id,
            overview: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::SlugAlreadyExists, _)));
    assert_eq!(count(&pool, "companies").await, 1);
    assert_eq!(count(&pool, "departments").await, 1);
}

#[tokio::test]
async fn test_unknown_parent_is_not_found() {
    let pool = pool().await;
    let f = fixture(&pool).await;

    let err = department::create(
        &pool,
        DepartmentCreate {
            title: "Orphan".into(),
            slug: "orphan".into(),
            company: 999,
            overview: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::CompanyNotFound, _)));

    let err = stat_title::create(
        &pool,
        StatTitleCreate {
            title: "Orphan".into(),
            department: 999,
            overview: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::DepartmentNotFound, _)));

    let mut data = new_stat(&f, "1", "2020-01-01");
    data.owner_id = 999;
    let err = stat::create(&pool, data).await.unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::UserNotFound, _)));
    assert_eq!(count(&pool, "stats").await, 0);
}

#[tokio::test]
async fn test_counts_are_annotated() {
    let pool = pool().await;
    let f = fixture(&pool).await;
    company::create(
        &pool,
        CompanyCreate {
            title: "Empty".into(),
            slug: "empty".into(),
        },
    )
    .await
    .unwrap();

    let companies = company::find_all_with_counts(&pool).await.unwrap();
    assert_eq!(companies.len(), 2);
    assert_eq!(companies[0].title, "Empty");
    assert_eq!(companies[0].total_departments, 0);
    assert_eq!(companies[1].total_departments, 1);

    let departments = department::find_all_with_counts(&pool, Some(f.company.id))
        .await
        .unwrap();
    assert_eq!(departments.len(), 1);
    assert_eq!(departments[0].total_stat_titles, 1);

    let none = department::find_all_with_counts(&pool, Some(f.company.id + 1))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_stat_amount_keeps_precision() {
    let pool = pool().await;
    let f = fixture(&pool).await;

    let created = stat::create(&pool, new_stat(&f, "1234.56", "2020-04-20")).await.unwrap();
    let loaded = stat::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(loaded.amount, Decimal::from_str("1234.56").unwrap());
    assert_eq!(loaded.to_string(), "2020-04-20: 1234.56");
    assert_eq!(loaded.owner_id, f.owner.id);
}

#[tokio::test]
async fn test_stat_listing_order() {
    let pool = pool().await;
    let f = fixture(&pool).await;

    let a = stat::create(&pool, new_stat(&f, "1", "2020-02-01")).await.unwrap();
    let b = stat::create(&pool, new_stat(&f, "2", "2020-01-01")).await.unwrap();
    let c = stat::create(&pool, new_stat(&f, "3", "2020-02-01")).await.unwrap();

    let newest_first: Vec<i64> = stat::find_all(&pool).await.unwrap().iter().map(|s| s.id).collect();
    assert_eq!(newest_first, vec![c.id, a.id, b.id]);

    let oldest_first: Vec<i64> = stat::find_all_chronological(&pool)
        .await
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(oldest_first, vec![b.id, a.id, c.id]);

    let by_department = stat::find_by_department(&pool, f.department.id).await.unwrap();
    assert_eq!(by_department.len(), 3);
}

#[tokio::test]
async fn test_stat_update_is_partial() {
    let pool = pool().await;
    let f = fixture(&pool).await;
    let created = stat::create(&pool, new_stat(&f, "5", "2020-03-03")).await.unwrap();

    let updated = stat::update(
        &pool,
        created.id,
        StatUpdate {
            amount: Some(Decimal::from(7)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.amount, Decimal::from(7));
    assert_eq!(updated.date, created.date);
    assert_eq!(updated.owner_id, created.owner_id);

    let err = stat::update(&pool, 999, StatUpdate::default()).await.unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::StatNotFound, _)));
}

#[tokio::test]
async fn test_delete_cascades() {
    let pool = pool().await;
    let f = fixture(&pool).await;
    stat::create(&pool, new_stat(&f, "1", "2020-01-01")).await.unwrap();
    stat::create(&pool, new_stat(&f, "2", "2020-01-02")).await.unwrap();

    stat_title::delete(&pool, f.stat_title.id).await.unwrap();
    assert_eq!(count(&pool, "stats").await, 0);
    assert!(department::find_by_id(&pool, f.department.id).await.unwrap().is_some());

    company::delete(&pool, f.company.id).await.unwrap();
    assert_eq!(count(&pool, "departments").await, 0);
    assert_eq!(count(&pool, "stat_titles").await, 0);

    let err = company::delete(&pool, f.company.id).await.unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::CompanyNotFound, _)));
}

#[tokio::test]
async fn test_user_creation_creates_one_profile() {
    let pool = pool().await;
    let f = fixture(&pool).await;

    let profile = user::find_profile(&pool, f.owner.id).await.unwrap().unwrap();
    assert_eq!(profile.user_id, f.owner.id);
    assert_eq!(count(&pool, "user_profiles").await, 1);
    assert_eq!(user::count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_user_update_touches_profile() {
    let pool = pool().await;
    let f = fixture(&pool).await;
    let before = user::find_profile(&pool, f.owner.id).await.unwrap().unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let updated = user::update(
        &pool,
        f.owner.id,
        UserUpdate {
            first_name: Some("Anya".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.first_name, "Anya");
    assert_eq!(updated.username, "anna");

    let after = user::find_profile(&pool, f.owner.id).await.unwrap().unwrap();
    assert_eq!(after.id, before.id);
    assert!(after.updated_at > before.updated_at);
    assert_eq!(count(&pool, "user_profiles").await, 1);
}

#[tokio::test]
async fn test_user_uniqueness() {
    let pool = pool().await;
    fixture(&pool).await;

    let err = user::create_with_password(&pool, "anna", "other@example.com", "", "password1", false)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::UsernameAlreadyExists, _)));

    let err = user::create_with_password(&pool, "boris", "anna@example.com", "", "password1", false)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Business(ErrorCode::EmailAlreadyExists, _)));

    assert_eq!(count(&pool, "users").await, 1);
    assert_eq!(count(&pool, "user_profiles").await, 1);
}

#[tokio::test]
async fn test_credentials_by_username_or_email() {
    let pool = pool().await;
    let f = fixture(&pool).await;

    let by_name = user::find_credentials(&pool, "anna").await.unwrap().unwrap();
    let by_email = user::find_credentials(&pool, "anna@example.com").await.unwrap().unwrap();
    assert_eq!(by_name.id, f.owner.id);
    assert_eq!(by_email.id, f.owner.id);
    assert!(crate::auth::verify_password("password1", &by_name.password_hash));
    assert!(user::find_credentials(&pool, "nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_missing_parent_at_write_time_is_not_found() {
    let pool = pool().await;
    let f = fixture(&pool).await;

    // the write itself hits the foreign key, as when a parent vanishes after the existence check
    let err: RepoError = sqlx::query(
        "INSERT INTO stats (amount, date, owner_id, title_id) VALUES ('1', '2020-01-01', ?1, 9999)",
    )
    .bind(f.owner.id)
    .execute(&pool)
    .await
    .unwrap_err()
    .into();
    assert!(matches!(err, RepoError::NotFound(_)), "{err:?}");

    let app_err: AppError = err.into();
    assert_eq!(app_err.code, ErrorCode::NotFound);
    assert_eq!(app_err.http_status(), http::StatusCode::NOT_FOUND);
    assert_eq!(count(&pool, "stats").await, 0);
}
