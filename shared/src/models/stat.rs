//! Stat Model
//!
//! One recorded data point of a stat title. Amounts are exact decimals in
//! storage and plain JSON numbers on the wire.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stat entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(rename = "owner")]
    pub owner_id: i64,
    #[serde(rename = "title")]
    pub title_id: i64,
}

impl fmt::Display for Stat {
    /// `"<date>: <amount>"`, the form nested under a stat title
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.date.format("%Y-%m-%d"), self.amount)
    }
}

/// Create stat payload
///
/// `owner` defaults to the requesting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatCreate {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub title: i64,
    #[serde(default)]
    pub owner: Option<i64>,
}

/// Update stat payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatUpdate {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub title: Option<i64>,
}
