use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cropcare::config::{Cli, Config};
use cropcare::routes;
use cropcare::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    tracing::info!("Data directory: {}", Config::data_dir(&cli).display());
    let config = Config::load(&cli)?;

    tracing::info!(
        backend = %config.backend.base_url,
        analyzer = ?config.upload.analyzer,
        "Backend configured"
    );

    let state = AppState::new(config.clone())?;
    let app = routes::router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
