//! roster-web library
//!
//! List, create and search persons and the groups they belong to.

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod handler;
pub mod logging;
pub mod models;
pub mod repository;

pub use crate::error::{ApiError, ApiResult};
pub use crate::handler::{Outcome, PersonHandler};

use crate::logging::TracingFailureLog;
use crate::repository::SqlitePersonRepository;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Request handler for person operations
    pub handler: PersonHandler,
}

impl AppState {
    /// Create application state around an already wired handler
    pub fn new(handler: PersonHandler) -> Self {
        Self { handler }
    }

    /// Wire the SQLite repository and tracing failure log onto `db`
    pub fn from_pool(db: SqlitePool) -> Self {
        let repository = Arc::new(SqlitePersonRepository::new(db));
        let handler = PersonHandler::new(repository, Arc::new(TracingFailureLog));
        Self::new(handler)
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::redirect_to_list))
        .route("/person", get(api::list_persons))
        .route(
            "/person/create",
            get(api::show_create_form).post(api::submit_create),
        )
        .route("/person/search", post(api::search_persons))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
