//! Stat Title Model
//!
//! A named metric of a department, e.g. "hoof sales".

use serde::{Deserialize, Serialize};

/// Stat title entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StatTitle {
    pub id: i64,
    pub title: String,
    pub overview: String,
    #[serde(rename = "department")]
    pub department_id: i64,
}

/// Stat title as returned by the API, with its stats rendered as `"<date>: <amount>"`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatTitleDetail {
    pub id: i64,
    pub title: String,
    pub overview: String,
    #[serde(rename = "department")]
    pub department_id: i64,
    pub stats: Vec<String>,
}

impl StatTitleDetail {
    pub fn new(stat_title: StatTitle, stats: Vec<String>) -> Self {
        Self {
            id: stat_title.id,
            title: stat_title.title,
            overview: stat_title.overview,
            department_id: stat_title.department_id,
            stats,
        }
    }
}

/// Create stat title payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatTitleCreate {
    pub title: String,
    pub department: i64,
    pub overview: Option<String>,
}

/// Update stat title payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatTitleUpdate {
    pub title: Option<String>,
    pub overview: Option<String>,
    pub department: Option<i64>,
}
