//! Dashboard figures. Recomputed from the ledger on every request.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use super::now;
use crate::error::ApiResult;
use crate::state::AppState;
use partsdesk_core::{FinancialSummary, MonthlySeries};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/financial-summary", get(summary))
        .route("/api/sales/monthly", get(monthly))
}

async fn summary(State(state): State<AppState>) -> ApiResult<Json<FinancialSummary>> {
    Ok(Json(state.aggregator.summary(now()).await?))
}

/// Six month buckets, oldest first, ending with the current month.
async fn monthly(State(state): State<AppState>) -> ApiResult<Json<MonthlySeries>> {
    Ok(Json(state.aggregator.monthly_series(now()).await?))
}
