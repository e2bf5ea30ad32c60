//! Formtrack Server - Binary Entry Point
//!
//! Reads configuration from the environment, wires the event log into the
//! Axum router and serves until interrupted.

use std::net::SocketAddr;
use std::sync::Arc;

use formtrack::api::http::{create_router, AppState};
use formtrack::store::{EventLog, EventLogConfig};
use formtrack::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();
    let log = EventLog::with_config(EventLogConfig::new(&config.data_dir));
    let state = Arc::new(AppState::new(log));

    let app = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        %addr,
        data_dir = %config.data_dir.display(),
        "tracking server running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
