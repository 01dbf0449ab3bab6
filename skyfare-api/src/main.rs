use anyhow::Context;
use skyfare_api::{app, worker, AppState};
use skyfare_store::Config;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyfare_api=debug,skyfare_store=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!(
        "Starting Skyfare API on port {} (deal batch {}, session ttl {}s)",
        config.server.port,
        config.deals.batch_size,
        config.sessions.ttl_seconds
    );

    let state = AppState::new(&config);

    tokio::spawn(worker::start_session_sweeper(
        state.sessions.clone(),
        Duration::from_secs(config.sessions.sweep_interval_seconds),
    ));

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
