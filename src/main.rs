use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::info;

use expenses_api::config::Settings;
use expenses_api::handlers;
use expenses_api::repository::RecordRepository;
use expenses_api::services::{Registry, SystemClock};
use expenses_api::state::AppState;
use expenses_api::store::MemoryContainer;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,expenses_api=debug".to_string()),
        )
        .with_target(true)
        .init();

    info!("🚀 Starting Expenses API...");

    let settings = Settings::load()?;
    info!("✅ Configuration loaded");

    let expenses_container = Arc::new(MemoryContainer::new(
        settings.store.expenses_container.clone(),
    ));
    let incomes_container = Arc::new(MemoryContainer::new(
        settings.store.incomes_container.clone(),
    ));
    info!(
        database = %settings.store.database,
        "✅ Store containers ready"
    );

    let clock = Arc::new(SystemClock);
    let shutdown = CancellationToken::new();

    let state = AppState {
        expenses: Arc::new(Registry::new(
            RecordRepository::new(expenses_container),
            clock.clone(),
        )),
        incomes: Arc::new(Registry::new(
            RecordRepository::new(incomes_container),
            clock,
        )),
        shutdown: shutdown.clone(),
    };

    let app = handlers::router(state);

    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));
    info!("🎯 Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    Ok(())
}

async fn shutdown_signal(token: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received, cancelling in-flight operations");
    }
    token.cancel();
}
