pub mod api;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use logic::{AggregateAssembler, AggregateMerger, ItemOperations, MergedUser, UserOperations};
pub use model::*;
pub use store::{InMemoryStore, PostgresStore, Store};

use std::sync::Arc;
use tower_http::timeout::TimeoutLayer;

use crate::config::AppConfig;

/// Router with state and request timeout applied, ready to serve
pub fn build_app<S: Store + 'static>(store: Arc<S>, config: &AppConfig) -> axum::Router {
    crate::api::routes::create_router::<S>()
        .with_state(store)
        .layer(TimeoutLayer::new(config.request_timeout()))
}

/// Connect the configured backend and serve until the listener fails
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    if config.database.in_memory {
        log::info!("Using in-memory storage; data is lost on exit");
        return serve(Arc::new(InMemoryStore::new()), &config).await;
    }

    log::info!("Connecting to PostgreSQL...");
    let options = config.database_options()?;
    let postgres_store = PostgresStore::new(options).await?;
    postgres_store.ping().await?;
    log::info!("Connected!");

    serve(Arc::new(postgres_store), &config).await
}

async fn serve<S: Store + 'static>(store: Arc<S>, config: &AppConfig) -> anyhow::Result<()> {
    use tokio::net::TcpListener;

    let app = build_app(store, config);
    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("User/item server running on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
