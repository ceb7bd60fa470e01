//! Server setup and initialization
//!
//! Wires the ports into the service context, starts the background scheduler
//! and serves the HTTP API until shutdown.

use std::sync::Arc;

use axum::Router;
use ladder_common::{AppConfig, AppError};
use ladder_db::{create_pool, run_migrations, PgAccountRepository, PgPlayerCacheRepository, PgPool};
use ladder_remote::RemoteStatsClient;
use ladder_service::{Scheduler, ServiceContext, ServiceContextBuilder, SyncPipeline};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );

    api.merge(health_routes()).with_state(state)
}

/// Connect to PostgreSQL and apply migrations when a directory is configured
pub async fn connect_database(config: &AppConfig) -> Result<PgPool, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = ladder_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if let Some(dir) = &config.database.migrations_dir {
        info!(dir = %dir, "Running database migrations");
        run_migrations(&pool, dir)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
    }

    Ok(pool)
}

/// Build the service context over Postgres and the remote stats API
pub fn create_service_context(config: &AppConfig, pool: &PgPool) -> Result<ServiceContext, AppError> {
    let stats_source = RemoteStatsClient::new(&config.remote)
        .map_err(|e| AppError::Config(e.to_string()))?;

    ServiceContextBuilder::new()
        .cache_repo(Arc::new(PgPlayerCacheRepository::new(pool.clone())))
        .account_repo(Arc::new(PgAccountRepository::new(pool.clone())))
        .stats_source(Arc::new(stats_source))
        .sync_config(&config.sync)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let pool = connect_database(&config).await?;
    let ctx = create_service_context(&config, &pool)?;
    Ok(AppState::new(SyncPipeline::new(ctx), pool, config))
}

/// Serve the HTTP API until `shutdown` fires
pub async fn run_server(
    app: Router,
    listener: TcpListener,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(AppError::internal)?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await
        .map_err(AppError::internal)
}

/// Run the scheduler and the HTTP server until Ctrl-C
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let initial_delay = config.sync.initial_delay();

    let state = create_app_state(config).await?;
    let pipeline = state.pipeline().clone();
    let app = create_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    let (shutdown_tx, _) = broadcast::channel(1);
    let scheduler = Scheduler::new(pipeline, initial_delay).spawn(shutdown_tx.subscribe());

    let signal_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        info!("Shutdown signal received");
        let _ = signal_tx.send(());
    });

    let served = run_server(app, listener, shutdown_tx.subscribe()).await;

    // Server may have exited on its own; make sure the scheduler stops too
    let _ = shutdown_tx.send(());
    if let Err(e) = scheduler.await {
        warn!(error = %e, "Sync scheduler task ended abnormally");
    }

    served
}
