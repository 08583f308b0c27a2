//! Civica gateway server
//!
//! Run with: cargo run -p civica-web

use civica_config::Config;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Civica gateway...");

    let state = civica_web::state::AppState::new(config)?;
    let addr = state.config.server.bind_addr();
    info!("Agent service: {}", state.agent.base_url());

    // Startup probe, failures are only logged
    let probe = state.agent.clone();
    tokio::spawn(async move {
        match probe.health_check().await {
            Ok(true) => info!("Agent service is reachable"),
            Ok(false) => warn!("Agent service answered /health with an error status"),
            Err(e) => warn!("Agent service unreachable: {}", e),
        }
    });

    let app = civica_web::router::build_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
