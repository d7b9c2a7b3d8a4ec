//! HTTP server initialization and runtime setup.
//!
//! Handles storage setup, service wiring, and the Axum server lifecycle.

use crate::application::services::ShortLinkService;
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::ShortLinkRepository;
use crate::infrastructure::persistence::{
    self, InMemoryShortLinkRepository, SqliteShortLinkRepository,
};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::key_deriver::Md5KeyDeriver;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (SQLite pool with migrations, or in-memory)
/// - Short link service
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config).await?;

    let service = ShortLinkService::new(
        repository,
        Arc::new(Md5KeyDeriver::new(config.key_length)),
        config.base_url.clone(),
        config.max_collision_attempts,
    );

    let state = AppState::new(Arc::new(service));
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Creates the configured storage backend.
async fn build_repository(config: &Config) -> Result<Arc<dyn ShortLinkRepository>> {
    match config.storage_backend {
        StorageBackend::Sqlite => {
            let pool = persistence::connect(
                &config.database_url,
                config.db_max_connections,
                Duration::from_secs(config.db_connect_timeout),
            )
            .await
            .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            persistence::run_migrations(&pool)
                .await
                .context("Failed to migrate")?;

            Ok(Arc::new(SqliteShortLinkRepository::new(Arc::new(pool))))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; short links will not survive a restart");
            Ok(Arc::new(InMemoryShortLinkRepository::new()))
        }
    }
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
