//! HTTP layer - axum routes, request parsing and response shaping.
//!
//! Handlers are thin: they read query parameters, run validators in a fixed
//! order, call into `core`, and wrap the result in the JSON body the endpoint
//! promises. Errors become responses through `response`.

/// Budget status endpoint
pub mod budget_status;
/// Contribution endpoints
pub mod contributions;
/// Contributor endpoints
pub mod contributors;
/// Expense endpoints
pub mod expenses;
/// Caller identity extraction
pub mod identity;
/// Response bodies and error-to-status mapping
pub mod response;

use crate::core::clock::{Clock, SystemClock};
use axum::{Json, Router, routing::get};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state available to every handler.
pub struct AppState {
    /// Database connection pool for all persistence
    pub database: DatabaseConnection,
    /// Source of the current date for validation bounds and defaults
    pub clock: Arc<dyn Clock>,
    /// Identity recorded on expenses when the request carries none
    pub default_added_by: Option<String>,
}

impl AppState {
    /// Creates state backed by the system clock.
    #[must_use]
    pub fn new(database: DatabaseConnection, default_added_by: Option<String>) -> Self {
        Self {
            database,
            clock: Arc::new(SystemClock),
            default_added_by,
        }
    }

    /// Replaces the clock, typically with a fixed one in tests.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Today's date according to the configured clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Builds the full application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(contributors::router())
        .merge(contributions::router())
        .merge(expenses::router())
        .merge(budget_status::router())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
