//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::{menu_item, recipe};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_amount, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{
    MenuItem, MenuItemCreate, MenuItemUpdate, RecipeLineDetail, RecipeLineInput,
};

/// Menu item with derived margin fields for the back-office screens
#[derive(Debug, Serialize)]
pub struct MenuItemView {
    #[serde(flatten)]
    pub item: MenuItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_margin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_amount: Option<f64>,
}

impl From<MenuItem> for MenuItemView {
    fn from(item: MenuItem) -> Self {
        Self {
            profit_margin: item.profit_margin(),
            profit_amount: item.profit_amount(),
            item,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category_id: Option<i64>,
    #[serde(default)]
    pub only_available: bool,
}

/// GET /api/menu-items - 获取菜品列表 (可按分类/可售过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<MenuItemView>>> {
    let items =
        menu_item::find_all(&state.pool, query.category_id, query.only_available).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// GET /api/menu-items/:id - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItemView>> {
    let item = menu_item::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {}", id)))?;
    Ok(Json(item.into()))
}

/// POST /api/menu-items - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItemView>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_amount(payload.price, "price")?;
    if let Some(cost) = payload.cost_price {
        validate_amount(cost, "cost_price")?;
    }

    let item = menu_item::create(&state.pool, payload).await?;
    Ok(Json(item.into()))
}

/// PUT /api/menu-items/:id - 更新菜品
///
/// Price changes never touch existing orders: lines keep `price_at_moment`.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItemView>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if let Some(price) = payload.price {
        validate_amount(price, "price")?;
    }
    if let Some(cost) = payload.cost_price {
        validate_amount(cost, "cost_price")?;
    }

    let item = menu_item::update(&state.pool, id, payload).await?;
    Ok(Json(item.into()))
}

/// DELETE /api/menu-items/:id - 删除菜品 (被订单引用时拒绝)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = menu_item::delete(&state.pool, id).await?;
    Ok(Json(result))
}

/// GET /api/menu-items/:id/recipe - 获取配方
pub async fn get_recipe(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<RecipeLineDetail>>> {
    if menu_item::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::not_found(format!("Menu item {}", id)));
    }
    let lines = recipe::find_by_menu_item(&state.pool, id).await?;
    Ok(Json(lines))
}

/// PUT /api/menu-items/:id/recipe - 整体替换配方
pub async fn replace_recipe(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(lines): Json<Vec<RecipeLineInput>>,
) -> AppResult<Json<Vec<RecipeLineDetail>>> {
    for line in &lines {
        validate_optional_text(&line.note, "note", MAX_NOTE_LEN)?;
    }

    let lines = recipe::replace_for_menu_item(&state.pool, id, &lines).await?;
    Ok(Json(lines))
}
