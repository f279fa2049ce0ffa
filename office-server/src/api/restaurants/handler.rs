//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::restaurant;
use crate::db::repository::restaurant::RestaurantWithCounts;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate};

/// GET /api/restaurants - 获取门店列表 (含员工数和库存行数)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<RestaurantWithCounts>>> {
    let restaurants = restaurant::find_all_with_counts(&state.pool).await?;
    Ok(Json(restaurants))
}

/// GET /api/restaurants/:id - 获取单个门店
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Restaurant>> {
    let restaurant = restaurant::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {}", id)))?;
    Ok(Json(restaurant))
}

/// POST /api/restaurants - 创建门店
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RestaurantCreate>,
) -> AppResult<Json<Restaurant>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_required_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let restaurant = restaurant::create(&state.pool, payload).await?;
    Ok(Json(restaurant))
}

/// PUT /api/restaurants/:id - 更新门店
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RestaurantUpdate>,
) -> AppResult<Json<Restaurant>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let restaurant = restaurant::update(&state.pool, id, payload).await?;
    Ok(Json(restaurant))
}

/// DELETE /api/restaurants/:id - 删除门店 (有订单时拒绝)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = restaurant::delete(&state.pool, id).await?;
    Ok(Json(result))
}
