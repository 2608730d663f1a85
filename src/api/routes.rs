use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers;
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Users and their items
        .route(
            "/users",
            get(handlers::list_users::<S>).post(handlers::create_user::<S>),
        )
        .route(
            "/users/:id",
            get(handlers::get_user::<S>)
                .patch(handlers::update_user::<S>)
                .delete(handlers::delete_user::<S>),
        )
        // Standalone items
        .route("/items", post(handlers::create_item::<S>))
        .route(
            "/items/:id",
            get(handlers::get_item::<S>).patch(handlers::update_item::<S>),
        )
}
