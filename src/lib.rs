pub mod api;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod store;
pub mod telemetry;

// Export API types
pub use api::handlers;
pub use api::routes;

pub use error::{FormError, FormResult};
pub use logic::{Created, Mutator, RequestValidator, Resolver, Updated};

// Export all model types
pub use model::*;

// Export store types
pub use store::{ConditionalStore, FormStore, InMemoryStore, PostgresStore, Store};

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::{AppConfig, StorageBackend};

/// Connect the configured backend and serve until the listener fails.
pub async fn run_server(config: &AppConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.server_address()).await?;
    log::info!("form service listening on http://{}", listener.local_addr()?);

    match config.storage.backend {
        StorageBackend::Postgres => {
            let database_url = config.database_url()?;
            let store =
                PostgresStore::new(&database_url, config.storage.max_connections).await?;
            store.migrate().await?;
            log::info!("PostgreSQL store ready");
            serve(listener, Arc::new(store), config).await
        }
        StorageBackend::Memory => {
            log::warn!("using in-memory form store; forms are lost on restart");
            serve(listener, Arc::new(InMemoryStore::new()), config).await
        }
    }
}

/// Serve the form API for `store` on an already bound listener.
pub async fn serve<S: Store + 'static>(
    listener: TcpListener,
    store: Arc<S>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let app = routes::build_app(store, config.server.max_body_bytes);
    axum::serve(listener, app).await?;
    Ok(())
}
