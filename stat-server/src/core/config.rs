use crate::auth::JwtConfig;
use crate::core::ServerError;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_URL | sqlite:stat.db | SQLite database |
/// | HTTP_HOST | 0.0.0.0 | bind address |
/// | HTTP_PORT | 8000 | HTTP port |
/// | ENVIRONMENT | development | development / staging / production |
/// | JWT_SECRET | generated in development | token signing key (>= 32 chars) |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
/// | JWT_ISSUER / JWT_AUDIENCE | stat-server / stat-clients | token claims |
/// | LOG_LEVEL | info | log level |
/// | LOG_DIR | unset | enables daily log files |
/// | ADMIN_USERNAME / ADMIN_EMAIL / ADMIN_PASSWORD | unset | staff account seeded into an empty database |
///
/// # Example
///
/// ```ignore
/// DATABASE_URL=sqlite:/data/stat.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub http_host: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub jwt: JwtConfig,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// Staff account created when the user table is empty
    pub admin: Option<AdminSeed>,
}

/// Initial staff account credentials
#[derive(Clone)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Result<Self, ServerError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let jwt = JwtConfig::from_env(environment == "development")
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let admin = match (
            std::env::var("ADMIN_USERNAME"),
            std::env::var("ADMIN_EMAIL"),
            std::env::var("ADMIN_PASSWORD"),
        ) {
            (Ok(username), Ok(email), Ok(password)) => Some(AdminSeed {
                username,
                email,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:stat.db".into()),
            http_host: std::env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            environment,
            jwt,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            admin,
        })
    }

    /// In-memory database and a fixed signing key
    ///
    /// Used by tests and in-process tooling.
    pub fn for_testing() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            http_host: "127.0.0.1".into(),
            http_port: 0,
            environment: "test".into(),
            jwt: JwtConfig::with_secret("test-secret-key-that-is-long-enough-for-hs256"),
            log_level: "debug".into(),
            log_dir: None,
            admin: None,
        }
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}
