//! Shipment routes. A client-sent `total` is dropped on deserialization;
//! the stored total is always `itemPrice + myFee`.

use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};

use super::{now, Created, Done};
use crate::error::ApiResult;
use crate::state::AppState;
use partsdesk_core::{Shipment, ShipmentDraft};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/shipments", get(list).post(create))
        .route("/api/shipments/{id}", put(update).delete(remove))
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Shipment>>> {
    Ok(Json(state.shipments.list().await?))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<ShipmentDraft>,
) -> ApiResult<Json<Created>> {
    let id = state.shipments.create(&draft, now()).await?;
    Ok(Created::new(id, "Shipment added"))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<ShipmentDraft>,
) -> ApiResult<Json<Done>> {
    state.shipments.update(id, &draft).await?;
    Ok(Done::new("Shipment updated"))
}

async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Done>> {
    state.shipments.delete(id).await?;
    Ok(Done::new("Shipment deleted"))
}
