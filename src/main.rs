//! Inventory API server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventory_api::{
    create_router, spawn_cleanup_task, spawn_limiter_sweep_task, AppState, Config, ItemStore,
    MemoryStore, PgStore,
};

/// Main entry point for the inventory server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the record store (Postgres, or in-memory without `DATABASE_URL`)
/// 4. Seed the sample catalog into an empty store if enabled
/// 5. Start the cache cleanup and limiter sweep tasks
/// 6. Serve HTTP until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inventory_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Inventory API");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, rate={}/s burst={}, cache_max_entries={}, cache_ttl={}s",
        config.server_port,
        config.rate_limit_requests,
        config.rate_limit_burst,
        config.cache_max_entries,
        config.cache_ttl
    );

    let store: Arc<dyn ItemStore> = match &config.database_url {
        Some(url) => Arc::new(
            PgStore::connect(url, config.db_max_connections)
                .await
                .context("failed to connect to database")?,
        ),
        None => {
            warn!("DATABASE_URL not set, using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::from_config(&config, store);

    if config.seed_on_startup {
        // A failed seed leaves the service usable
        match state.service.seed().await {
            Ok(0) => info!("Store already populated, skipping seed"),
            Ok(n) => info!("Seeded {} sample items", n),
            Err(e) => warn!(error = %e, "Failed to seed store"),
        }
    }

    let tasks = vec![
        spawn_cleanup_task(state.service.clone(), config.cleanup_interval),
        spawn_limiter_sweep_task(state.service.clone(), config.rate_limit_sweep_interval),
    ];
    info!("Background tasks started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    info!("Server listening on http://{}", addr);

    // ConnectInfo supplies the peer address used as the rate-limit key
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(tasks))
    .await
    .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for Ctrl+C or SIGTERM, then aborts the background tasks.
async fn shutdown_signal(tasks: Vec<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    for task in &tasks {
        task.abort();
    }
    warn!("Background tasks aborted");
}
