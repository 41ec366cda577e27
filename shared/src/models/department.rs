//! Department Model

use serde::{Deserialize, Serialize};

/// Department entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Department {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub overview: String,
    #[serde(rename = "company")]
    pub company_id: i64,
}

/// Department as returned by the API, with the titles of its stat titles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentDetail {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub overview: String,
    #[serde(rename = "company")]
    pub company_id: i64,
    pub stat_titles: Vec<String>,
}

impl DepartmentDetail {
    pub fn new(department: Department, stat_titles: Vec<String>) -> Self {
        Self {
            id: department.id,
            title: department.title,
            slug: department.slug,
            overview: department.overview,
            company_id: department.company_id,
            stat_titles,
        }
    }
}

/// Department annotated with its stat title count (department list page)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DepartmentSummary {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub overview: String,
    #[serde(rename = "company")]
    pub company_id: i64,
    pub total_stat_titles: i64,
}

/// Create department payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentCreate {
    pub title: String,
    pub slug: String,
    pub company: i64,
    pub overview: Option<String>,
}

/// Update department payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartmentUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub overview: Option<String>,
    pub company: Option<i64>,
}
