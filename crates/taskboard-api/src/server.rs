//! Server assembly: storage selection, routing and the serve loop

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use taskboard_config::{AppConfig, ServerConfig, StorageBackend, StorageConfig};
use taskboard_domain::TaskRepository;
use taskboard_persistence::{InMemoryTaskRepository, PersistenceError};

use crate::{routes, state::AppState};

/// Errors raised while starting or running the server
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured backend is not compiled in
    #[error("Storage initialization failed: {0}")]
    Storage(String),

    /// The task store could not be opened
    #[error("Storage initialization failed: {0}")]
    Persistence(#[from] PersistenceError),

    /// The listener could not be bound
    #[error("Failed to bind {address}: {source}")]
    Bind {
        /// Address that was requested
        address: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The serve loop failed
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Open the task store selected by `storage`
pub async fn build_repository(
    storage: &StorageConfig,
) -> Result<Arc<dyn TaskRepository>, ServerError> {
    match storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory task store");
            Ok(Arc::new(InMemoryTaskRepository::new()))
        }
        StorageBackend::Surreal => surreal_repository(storage).await,
    }
}

#[cfg(feature = "surrealdb-backend")]
async fn surreal_repository(
    storage: &StorageConfig,
) -> Result<Arc<dyn TaskRepository>, ServerError> {
    use taskboard_persistence::{SurrealConnection, SurrealTarget, SurrealTaskRepository};

    let target = match (&storage.url, &storage.username, &storage.password) {
        (Some(url), Some(username), Some(password)) if storage.is_remote() => SurrealTarget::Remote {
            url: url.clone(),
            username: username.clone(),
            password: password.clone(),
        },
        _ => SurrealTarget::Embedded,
    };

    info!("Using SurrealDB task store");
    let connection = SurrealConnection::open(target, &storage.namespace, &storage.database).await?;
    Ok(Arc::new(SurrealTaskRepository::new(connection).await?))
}

#[cfg(not(feature = "surrealdb-backend"))]
async fn surreal_repository(
    _storage: &StorageConfig,
) -> Result<Arc<dyn TaskRepository>, ServerError> {
    Err(ServerError::Storage(
        "SurrealDB storage requires the `surrealdb-backend` feature".to_string(),
    ))
}

/// HTTP server for the task API
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Server over an existing state
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Open the configured store and build the server
    pub async fn from_config(config: &AppConfig) -> Result<Self, ServerError> {
        let repository = build_repository(&config.storage).await?;
        let state = AppState::new(repository, config.storage.backend.as_str());
        Ok(Self::new(config.server.clone(), state))
    }

    /// Shared application state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Router with every route, layer and the state attached
    pub fn router(&self) -> Router {
        routes::app(self.state.clone(), &self.config.api_prefix)
    }

    /// Bind the configured address and serve until Ctrl-C
    pub async fn run(self) -> Result<(), ServerError> {
        let address = self.config.bind_address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| ServerError::Bind { address, source })?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on `listener` until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(
            "Taskboard API listening on {} (tasks under {})",
            listener.local_addr()?,
            self.config.api_prefix
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
