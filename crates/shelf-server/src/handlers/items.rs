//! Item handlers

use crate::error::ApiResult;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use shelf_core::{Item, ItemPatch, NewItem};

#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    items: Vec<Item>,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    item: Item,
}

pub async fn list(State(state): State<AppState>) -> Json<ItemListResponse> {
    let items = state.items.list_items().await;
    Json(ItemListResponse { items })
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewItem>,
) -> (StatusCode, Json<ItemResponse>) {
    let item = state.items.create_item(req).await;
    (StatusCode::CREATED, Json(ItemResponse { item }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ItemResponse>> {
    let item = state.items.get_item(id).await?;
    Ok(Json(ItemResponse { item }))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<ItemPatch>,
) -> ApiResult<Json<ItemResponse>> {
    let item = state.items.update_item(id, patch).await?;
    Ok(Json(ItemResponse { item }))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ItemResponse>> {
    let item = state.items.delete_item(id).await?;
    Ok(Json(ItemResponse { item }))
}
