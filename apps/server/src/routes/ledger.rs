//! # Ledger Routes
//!
//! Sales take stock out, purchases put it back. Both are all-or-nothing:
//! the response carries the new record's id only after every quantity
//! update has committed.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::debug;

use super::{now, Created};
use crate::error::ApiResult;
use crate::state::AppState;
use partsdesk_core::{Purchase, PurchaseRequest, Sale, SaleRequest};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/sales", post(record_sale))
        .route("/api/sales/all", get(list_sales))
        .route("/api/purchases", post(record_purchase))
        .route("/api/purchases/all", get(list_purchases))
}

async fn record_sale(
    State(state): State<AppState>,
    Json(request): Json<SaleRequest>,
) -> ApiResult<Json<Created>> {
    debug!(lines = request.items.len(), total = %request.total, "Sale requested");

    let id = state.ledger.record_sale(&request, now()).await?;
    Ok(Created::new(id, "Sale recorded"))
}

async fn record_purchase(
    State(state): State<AppState>,
    Json(request): Json<PurchaseRequest>,
) -> ApiResult<Json<Created>> {
    debug!(lines = request.items.len(), total = %request.total, "Purchase requested");

    let id = state.ledger.record_purchase(&request, now()).await?;
    Ok(Created::new(id, "Purchase recorded"))
}

async fn list_sales(State(state): State<AppState>) -> ApiResult<Json<Vec<Sale>>> {
    Ok(Json(state.ledger.sales().await?))
}

async fn list_purchases(State(state): State<AppState>) -> ApiResult<Json<Vec<Purchase>>> {
    Ok(Json(state.ledger.purchases().await?))
}
