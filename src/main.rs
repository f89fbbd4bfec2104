use anyhow::{Context, Result};
use tracing::info;

use farmstead_api::{config, i18n, monitoring, routes, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Load configuration from environment
    let config = config::Config::from_env()?;

    // Initialize logging for the configured execution context
    monitoring::init(config.runtime_mode);

    info!("Starting farmstead API ({:?} runtime)", config.runtime_mode);

    // Configuration errors are fatal here, never degraded per request
    i18n::verify_catalogs().context("message catalogs incomplete")?;
    let route_map = routes::init().context("malformed route table")?;
    info!(
        "Account routes registered ({} entries)",
        route_map.entries().len()
    );

    let app = server::router();
    let listener = tokio::net::TcpListener::bind((config.bind.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.bind, config.port))?;
    info!("Listening on {}:{}", config.bind, config.port);

    axum::serve(listener, app).await?;
    Ok(())
}
