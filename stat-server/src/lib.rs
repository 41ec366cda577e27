//! Stat Server - company statistics service
//!
//! # Architecture
//!
//! - **Hierarchy store** (`db`): SQLite through sqlx, one repository module per entity
//! - **Chart aggregation** (`chart`): stats reshaped into per-title time series
//! - **Auth** (`auth`): JWT + Argon2, static permission policy, request guards
//! - **JSON API** (`api`): REST endpoints under `/stat/api/`
//! - **HTML pages** (`web`): handlebars-rendered department and account pages
//!
//! # Module layout
//!
//! ```text
//! stat-server/src/
//! ├── core/          # config, state, server, errors
//! ├── auth/          # JWT, passwords, policy, middleware
//! ├── db/            # pool, migrations, repositories
//! ├── chart.rs       # chart data aggregation
//! ├── api/           # REST routes and handlers
//! ├── web/           # HTML routes, forms, templates
//! ├── middleware/    # request logging
//! ├── routes.rs      # router assembly
//! └── utils/         # logger, validation
//! ```

pub mod api;
pub mod auth;
pub mod chart;
pub mod core;
pub mod db;
pub mod middleware;
pub mod routes;
pub mod utils;
pub mod web;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerError, ServerState};
pub use routes::build_app;
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger setup
pub use utils::logger::init_logger_with_file;

// Security logging macro - supports tracing field syntax
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
