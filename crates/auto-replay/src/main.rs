//! Auto-Replay: desktop macro recorder and player with an auto-clicker and
//! auto-hotkey, controlled over a local HTTP request/response surface.

mod config;
mod error;
mod server;
mod wire;

pub(crate) use {
    error::{AppError, Result as AppResult},
    server::AppState,
};

use crate::config::Config;

use std::{process::ExitCode, sync::Arc};

use auto_replay_core::{DesktopDriver, SessionController};
use axum::Router;
use tokio::{net::TcpListener, sync::watch};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Application entry point.
#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("auto_replay=debug,auto_replay_core=debug")),
        )
        .init();

    if let Err(e) = run().await {
        error!(error = ?e, "Auto-Replay failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run() -> AppResult<()> {
    let config = Config::load()?;

    let driver = Arc::new(DesktopDriver::new()?);
    let session = Arc::new(SessionController::new(driver));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let app = server::router(AppState {
        session: Arc::clone(&session),
        shutdown_tx,
    });

    let addr = config.server.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Control surface listening");

    serve_until_shutdown(listener, app, session, shutdown_rx).await?;
    info!("Auto-Replay shut down successfully");

    Ok(())
}

/// Serve the control surface until a shutdown trigger fires, then tear the
/// session down.
///
/// Teardown runs on every exit path, a failed serve included: the process
/// must never exit with a key still held or the input hook installed.
async fn serve_until_shutdown(
    listener: TcpListener,
    app: Router,
    session: Arc<SessionController>,
    shutdown_rx: watch::Receiver<bool>,
) -> AppResult<()> {
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_rx))
        .await;

    session.shutdown_all().await;
    served?;

    Ok(())
}

/// Resolves when any shutdown trigger fires: Ctrl-C or a shutdown request
/// on the control surface.
async fn shutdown_signal(mut shutdown_rx: watch::Receiver<bool>) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => info!("Ctrl-C received, shutting down"),
            Err(e) => error!(error = %e, "Failed to listen for Ctrl-C, shutting down"),
        },
        // Err means the sender dropped, which is shutdown all the same.
        _ = shutdown_rx.changed() => {}
    }
}
