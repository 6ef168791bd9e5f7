//! Server runtime.
//!
//! Wires configuration, logging, the selected repository backend and the
//! REST API together, and shuts the listener down gracefully on SIGINT/SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::application::identity::UserService;
use crate::config::{AppConfig, StorageBackend};
use crate::domain::UserRepositoryInterface;
use crate::infrastructure::{init_and_migrate, InMemoryUserRepository, UserRepository};
use crate::interfaces::http::create_api_router;
use crate::interfaces::http::modules::users::SharedUserService;
use crate::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing already initialised: {}", e);
    }
}

/// Build the repository selected by `storage.backend`, running migrations
/// for SQLite.
pub async fn build_user_repository(
    config: &AppConfig,
) -> Result<Arc<dyn UserRepositoryInterface>, sea_orm::DbErr> {
    match config.storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on shutdown");
            Ok(Arc::new(InMemoryUserRepository::new()))
        }
        StorageBackend::Sqlite => {
            let db = init_and_migrate(&config.storage.database()).await?;
            Ok(Arc::new(UserRepository::new(db)))
        }
    }
}

pub async fn build_user_service(config: &AppConfig) -> Result<SharedUserService, sea_orm::DbErr> {
    let repo = build_user_repository(config).await?;
    Ok(Arc::new(UserService::new(repo)))
}

/// Serve the REST API until a shutdown signal arrives.
pub async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting user service...");

    let user_service = build_user_service(&config).await?;
    let router = create_api_router(user_service);

    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    let server_shutdown = shutdown.clone();
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        server_shutdown.wait().await;
        info!("REST API server received shutdown signal");
    });
    let mut server_task = tokio::spawn(async move { server.await });

    tokio::select! {
        result = &mut server_task => {
            return match result {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => {
                    error!("REST API server error: {}", e);
                    Err(e.into())
                }
                Err(e) => {
                    error!("REST API server task panicked: {}", e);
                    Err(e.into())
                }
            };
        }
        _ = shutdown.wait() => {}
    }

    let timeout = config.server.shutdown_timeout;
    info!("Starting graceful shutdown (timeout: {}s)...", timeout);
    match tokio::time::timeout(Duration::from_secs(timeout), server_task).await {
        Ok(_) => info!("Graceful shutdown completed"),
        Err(_) => warn!("Graceful shutdown timed out after {}s", timeout),
    }

    info!("User service shutdown complete");
    Ok(())
}
