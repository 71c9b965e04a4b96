//! # partsdesk-server
//!
//! JSON API for the PartsDesk browser client.
//!
//! ## Module Organization
//!
//! - [`config`] - Environment-driven `ServerConfig`
//! - [`state`] - `AppState`: the store handle and its services
//! - [`routes`] - One module per resource under `/api`
//! - [`error`] - `ApiError` and its HTTP mapping
//!
//! The binary (`main.rs`) only loads config, opens the store and serves
//! [`app`]; tests drive the same router in-process.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{ConfigError, ServerConfig, StoreBackend};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::AppState;

/// Builds the full router with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
