use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;
use yesgem_studio_server::{config::Config, create_app, handlers::AppState, store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let stores = store::create_stores(&config).await?;
    let state = AppState::new(config.clone(), stores)?;
    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, backend = %config.store_backend, "yesgem studio server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
