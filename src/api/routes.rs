use axum::{
    extract::DefaultBodyLimit,
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
        // Form definitions
        .route("/v1/form/create", post(handlers::create_form::<S>))
        .route("/v1/form/update", post(handlers::update_form::<S>))
        .route("/v1/form/read", post(handlers::read_form::<S>))
}

/// Router with state applied, ready to serve.
///
/// Oversized bodies surface as a `JsonRejection` inside the handlers, so they
/// get the same error envelope as any other malformed request.
pub fn build_app<S: Store + 'static>(store: Arc<S>, max_body_bytes: usize) -> Router {
    create_router::<S>()
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(store)
}
