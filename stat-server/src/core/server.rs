//! Server Implementation
//!
//! HTTP server startup and shutdown

use tokio::net::TcpListener;

use crate::core::{Config, Result, ServerState};
use crate::db::repository::user;
use crate::routes::build_app;

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    /// Serve until Ctrl-C
    pub async fn run(&self) -> Result<()> {
        let state = self.state.clone();

        seed_admin(&state).await?;

        let app = build_app(&state).with_state(state);

        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        tracing::info!(
            addr = %listener.local_addr()?,
            environment = %self.config.environment,
            "Stat server listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutting down...");
}

/// Create the configured staff account when no user exists yet
pub async fn seed_admin(state: &ServerState) -> Result<()> {
    let Some(admin) = &state.config.admin else {
        return Ok(());
    };
    if user::count(&state.pool).await? > 0 {
        return Ok(());
    }

    let created = user::create_with_password(
        &state.pool,
        &admin.username,
        &admin.email,
        "",
        &admin.password,
        true,
    )
    .await?;
    tracing::info!(user_id = created.id, username = %created.username, "Seeded staff account");
    Ok(())
}
