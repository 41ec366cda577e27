//! Company Model

use serde::{Deserialize, Serialize};

/// Company entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Company {
    pub id: i64,
    pub title: String,
    pub slug: String,
}

/// Company as returned by the API, with the titles of its departments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyDetail {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub departments: Vec<String>,
}

impl CompanyDetail {
    pub fn new(company: Company, departments: Vec<String>) -> Self {
        Self {
            id: company.id,
            title: company.title,
            slug: company.slug,
            departments,
        }
    }
}

/// Company annotated with its department count (department list page)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CompanySummary {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub total_departments: i64,
}

/// Create company payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyCreate {
    pub title: String,
    pub slug: String,
}

/// Update company payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
}
