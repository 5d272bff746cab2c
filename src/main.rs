use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plane_notify::config::AppConfig;
use plane_notify::matrix::MatrixClient;
use plane_notify::server::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plane_notify=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting plane-notify");

    let config = AppConfig::load()?;
    info!("Configuration loaded");

    let sender = MatrixClient::new(config.homeserver_url.clone(), config.access_token.clone());

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let state = AppState {
        config: Arc::new(config),
        sender: Arc::new(sender),
    };

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
