//! Item catalog routes.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use super::{Created, Done};
use crate::error::ApiResult;
use crate::state::AppState;
use partsdesk_core::{Item, ItemDraft, ItemId};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/items", get(list).post(create))
        .route("/api/items/low-stock", get(low_stock))
        .route("/api/items/{id}", get(fetch).put(update).delete(remove))
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Item>>> {
    Ok(Json(state.catalog.list().await?))
}

/// Items at or below their reorder threshold.
async fn low_stock(State(state): State<AppState>) -> ApiResult<Json<Vec<Item>>> {
    Ok(Json(state.catalog.low_stock().await?))
}

async fn fetch(State(state): State<AppState>, Path(id): Path<ItemId>) -> ApiResult<Json<Item>> {
    Ok(Json(state.catalog.get(id).await?))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<ItemDraft>,
) -> ApiResult<Json<Created>> {
    let id = state.catalog.create(&draft).await?;
    Ok(Created::new(id, "Item added"))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
    Json(draft): Json<ItemDraft>,
) -> ApiResult<Json<Done>> {
    state.catalog.update(id, &draft).await?;
    Ok(Done::new("Item updated"))
}

async fn remove(State(state): State<AppState>, Path(id): Path<ItemId>) -> ApiResult<Json<Done>> {
    state.catalog.delete(id).await?;
    Ok(Done::new("Item deleted"))
}
