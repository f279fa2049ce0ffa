//! Ingredient API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::ingredient;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Ingredient, IngredientCreate, IngredientUpdate};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

/// GET /api/ingredients - 获取原料列表 (可按名称/单位搜索)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Ingredient>>> {
    let ingredients = ingredient::find_all(&state.pool, query.search.as_deref()).await?;
    Ok(Json(ingredients))
}

/// GET /api/ingredients/:id - 获取单个原料
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Ingredient>> {
    let ingredient = ingredient::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Ingredient {}", id)))?;
    Ok(Json(ingredient))
}

/// POST /api/ingredients - 创建原料
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<IngredientCreate>,
) -> AppResult<Json<Ingredient>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.unit, "unit", MAX_SHORT_TEXT_LEN)?;

    let ingredient = ingredient::create(&state.pool, payload).await?;
    Ok(Json(ingredient))
}

/// PUT /api/ingredients/:id - 更新原料
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<IngredientUpdate>,
) -> AppResult<Json<Ingredient>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.unit, "unit", MAX_SHORT_TEXT_LEN)?;

    let ingredient = ingredient::update(&state.pool, id, payload).await?;
    Ok(Json(ingredient))
}

/// DELETE /api/ingredients/:id - 删除原料 (库存和配方级联删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = ingredient::delete(&state.pool, id).await?;
    Ok(Json(result))
}
