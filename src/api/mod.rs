//! API module
//!
//! HTTP endpoints, request/response types and middleware.

pub mod dto;
pub mod extract;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{CreditHandler, CustomerHandler};
use crate::repository::{CreditRepository, CustomerRepository, InMemoryStore};

pub use routes::create_router;

/// Shared state handed to every endpoint
#[derive(Clone)]
pub struct AppState {
    pub credits: CreditHandler,
    pub customers: CustomerHandler,
}

impl AppState {
    pub fn new(customers: Arc<dyn CustomerRepository>, credits: Arc<dyn CreditRepository>) -> Self {
        Self {
            credits: CreditHandler::new(customers.clone(), credits),
            customers: CustomerHandler::new(customers),
        }
    }

    /// State backed by a single in-memory store
    pub fn in_memory(store: InMemoryStore) -> Self {
        Self::new(Arc::new(store.clone()), Arc::new(store))
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let api_router = create_router().layer(axum::middleware::from_fn(
        middleware::logging_middleware,
    ));

    Router::new()
        // Health check
        .route("/health", get(health_check))
        .nest("/api", api_router)
        // Outermost first: assign the request id before anything logs it
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
