use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::DbService;
use crate::web::Templates;

/// Server state - shared by every request
///
/// Cloned per request; all fields are cheap handles.
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Arc<Config> | configuration (immutable) |
/// | pool | SqlitePool | database pool |
/// | jwt_service | Arc<JwtService> | token service |
/// | templates | Arc<Templates> | compiled HTML templates |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub templates: Arc<Templates>,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool, templates: Templates) -> Self {
        let jwt_service = JwtService::with_config(config.jwt.clone());
        Self {
            config: Arc::new(config),
            pool,
            jwt_service: Arc::new(jwt_service),
            templates: Arc::new(templates),
        }
    }

    /// Open (and migrate) the database, compile templates
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = if config.database_url.contains(":memory:") {
            DbService::in_memory().await?
        } else {
            DbService::new(&config.database_url).await?
        };
        let templates = Templates::new()?;
        Ok(Self::new(config.clone(), db.pool, templates))
    }

    /// State over a fresh in-memory database
    pub async fn for_testing() -> Result<Self> {
        Self::initialize(&Config::for_testing()).await
    }

    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}
