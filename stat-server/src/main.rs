use stat_server::{Config, Server, ServerError, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // 1. Environment (.env is optional)
    let _ = dotenvy::dotenv();

    // 2. Configuration and logging
    let config = Config::from_env()?;
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Stat server starting...");

    // 3. Database, migrations, templates
    let state = ServerState::initialize(&config).await?;

    // 4. Serve until Ctrl-C
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!(error = %e, "Server error");
        return Err(e);
    }

    Ok(())
}
