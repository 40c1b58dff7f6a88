use sea_orm::Database;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use avatar_catalog::{create_api_router, setup_schema, AppConfig, BotApiClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;
    info!(?config, "Configuration loaded");

    let db = Database::connect(&config.database_url).await?;
    setup_schema(&db).await?;

    let bot = BotApiClient::new(
        config.bot_api_url.as_str(),
        config.bot_token.as_str(),
        config.upstream_timeout,
    )?;

    let app = create_api_router(Arc::new(db), bot);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(address = %listener.local_addr()?, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
