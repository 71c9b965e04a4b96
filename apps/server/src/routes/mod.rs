//! # HTTP Routes
//!
//! ## Route Organization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         /api Routes                                     │
//! │                                                                         │
//! │  items.rs      /items, /items/low-stock, /items/{id}                    │
//! │  ledger.rs     /sales, /sales/all, /purchases, /purchases/all           │
//! │  reports.rs    /financial-summary, /sales/monthly                       │
//! │  shipments.rs  /shipments, /shipments/{id}                              │
//! │  auth.rs       /login, /change-password                                 │
//! │  mod.rs        /health                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers stamp records with the server's local wall clock.

pub mod auth;
pub mod items;
pub mod ledger;
pub mod reports;
pub mod shipments;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::state::AppState;

/// Every `/api` route.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .merge(items::router())
        .merge(ledger::router())
        .merge(reports::router())
        .merge(shipments::router())
        .merge(auth::router())
}

/// `{id, message}` for anything that creates a record.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: i64,
    pub message: &'static str,
}

/// `{message}` for updates and deletes.
#[derive(Debug, Serialize)]
pub struct Done {
    pub message: &'static str,
}

impl Created {
    pub fn new(id: i64, message: &'static str) -> Json<Self> {
        Json(Created { id, message })
    }
}

impl Done {
    pub fn new(message: &'static str) -> Json<Self> {
        Json(Done { message })
    }
}

pub(crate) fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<Health>) {
    if state.store.health_check().await {
        (StatusCode::OK, Json(Health { status: "ok" }))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(Health {
                status: "unavailable",
            }),
        )
    }
}
