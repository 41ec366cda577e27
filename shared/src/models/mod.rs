//! Data models
//!
//! Shared between stat-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).
//!
//! Foreign keys are stored as `<parent>_id` columns and travel over the wire
//! under the parent's bare name (`"company": 3`).

pub mod company;
pub mod department;
pub mod stat;
pub mod stat_title;
pub mod user;

// Re-exports
pub use company::*;
pub use department::*;
pub use stat::*;
pub use stat_title::*;
pub use user::*;
