//! Stock API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::stock;
use crate::utils::validation::validate_amount;
use crate::utils::{AppError, AppResult};
use shared::models::{StockAdd, StockItem, StockItemCreate, StockItemDetail, StockItemUpdate};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub restaurant_id: Option<i64>,
}

/// GET /api/stock - 获取库存列表 (可按门店过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<StockItemDetail>>> {
    let items = stock::find_all(&state.pool, query.restaurant_id).await?;
    Ok(Json(items))
}

/// GET /api/stock/:id - 获取单个库存项
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<StockItemDetail>> {
    let item = stock::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Stock item {}", id)))?;
    Ok(Json(item))
}

/// POST /api/stock - 新建库存项 ((原料, 门店) 唯一)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StockItemCreate>,
) -> AppResult<Json<StockItem>> {
    validate_amount(payload.quantity, "quantity")?;

    let item = stock::create(&state.pool, payload).await?;
    Ok(Json(item))
}

/// PUT /api/stock/:id - 盘点修正 (覆盖数量)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StockItemUpdate>,
) -> AppResult<Json<StockItem>> {
    validate_amount(payload.quantity, "quantity")?;

    let item = stock::set_quantity(&state.pool, id, payload.quantity).await?;
    Ok(Json(item))
}

/// POST /api/stock/:id/add - 收货 (数量累加)
pub async fn add_stock(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StockAdd>,
) -> AppResult<Json<StockItem>> {
    validate_amount(payload.amount, "amount")?;

    let item = stock::add_quantity(&state.pool, id, payload.amount).await?;

    tracing::info!(stock_item_id = id, amount = payload.amount, "Stock received");

    Ok(Json(item))
}

/// DELETE /api/stock/:id - 删除库存项
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = stock::delete(&state.pool, id).await?;
    Ok(Json(result))
}
