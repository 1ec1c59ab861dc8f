use warden_config::Config;
use warden_core::{ReconciliationLoop, ServerController, ShutdownCoordinator};
use warden_server::{AppState, ServerError, build_router, logger};

use std::error::Error;
use std::sync::Arc;

use log::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Local development convenience; a missing .env is fine
    dotenvy::dotenv().ok();

    // Load configuration (WARDEN_CONFIG_DIR/config.toml + env overrides)
    let config = Config::load()?;
    config.validate()?;

    let config_dir = Config::config_dir()?;
    let log_file_path = config.logging.file_path(&config_dir);
    if let Some(ref path) = log_file_path
        && let Some(parent) = path.parent()
    {
        std::fs::create_dir_all(parent)?;
    }

    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting warden-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    if config.api.allowed_operators.is_empty() {
        warn!("api.allowed_operators is empty; every operator command will be rejected");
    }

    let controller = Arc::new(ServerController::from_config(
        &config,
        config.applied_version_path()?,
    )?);
    info!("Applied version: {}", controller.applied_version());

    let shutdown = ShutdownCoordinator::new();

    let reconciliation = ReconciliationLoop::new(
        Arc::clone(&controller),
        config.server.reconciliation_interval(),
    );
    let reconciliation_handle = tokio::spawn(reconciliation.run(shutdown.subscribe_guard()));

    let app_state = AppState {
        controller,
        api_config: config.api.clone(),
        shutdown: shutdown.clone(),
    };
    let app = build_router(app_state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("Command API listening on {}", listener.local_addr()?);

    // Ctrl+C triggers the same path as POST /admin/shutdown
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C");
                signal_shutdown.shutdown();
            }
            Err(e) => error!("Failed to listen for Ctrl+C: {e}"),
        }
    });

    let mut serve_guard = shutdown.subscribe_guard();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            serve_guard.wait().await;
            info!("Command API stopped accepting requests");
        })
        .await?;

    // The loop finishes its current tick before exiting
    if let Err(e) = reconciliation_handle.await {
        error!("Reconciliation task ended abnormally: {e}");
    }

    info!("warden-server shut down");
    Ok(())
}
