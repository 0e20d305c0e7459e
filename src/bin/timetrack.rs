//! Time-tracking HTTP service.
//!
//! Loads `.env` when present, reads configuration from the environment,
//! initialises logging, wires storage and serves the API until `SIGINT` or
//! `SIGTERM`.

use timetrack::{api, app, config::AppConfig, telemetry};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let env_file = dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    telemetry::init(&config.logging)?;
    if env_file.is_none() {
        info!("no .env file found, using process environment");
    }

    let state = app::build_state(&config).await?;
    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!(%address, storage = ?config.storage_mode, "listening");

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
    info!("shutdown signal received");
}
