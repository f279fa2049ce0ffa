//! Stock Repository
//!
//! On-hand quantities per (ingredient, restaurant). Order deduction bypasses
//! this module and runs its own transaction (see `inventory::deduction`).

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{StockItem, StockItemCreate, StockItemDetail};
use shared::money::round_stock;
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, ingredient_id, restaurant_id, quantity, last_updated";

const DETAIL_QUERY: &str = "SELECT s.id, s.ingredient_id, i.name AS ingredient_name, i.unit, s.restaurant_id, r.name AS restaurant_name, s.quantity, s.last_updated \
     FROM stock_item s \
     JOIN ingredient i ON i.id = s.ingredient_id \
     JOIN restaurant r ON r.id = s.restaurant_id";

pub async fn find_all(
    pool: &SqlitePool,
    restaurant_id: Option<i64>,
) -> RepoResult<Vec<StockItemDetail>> {
    let items = match restaurant_id {
        Some(rid) => {
            sqlx::query_as::<_, StockItemDetail>(&format!(
                "{DETAIL_QUERY} WHERE s.restaurant_id = ? ORDER BY i.name"
            ))
            .bind(rid)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, StockItemDetail>(&format!(
                "{DETAIL_QUERY} ORDER BY r.name, i.name"
            ))
            .fetch_all(pool)
            .await?
        }
    };
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<StockItem>> {
    let item =
        sqlx::query_as::<_, StockItem>(&format!("SELECT {COLUMNS} FROM stock_item WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(item)
}

pub async fn find_detail_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<StockItemDetail>> {
    let item = sqlx::query_as::<_, StockItemDetail>(&format!("{DETAIL_QUERY} WHERE s.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

pub async fn find_by_pair(
    pool: &SqlitePool,
    ingredient_id: i64,
    restaurant_id: i64,
) -> RepoResult<Option<StockItem>> {
    let item = sqlx::query_as::<_, StockItem>(&format!(
        "SELECT {COLUMNS} FROM stock_item WHERE ingredient_id = ? AND restaurant_id = ?"
    ))
    .bind(ingredient_id)
    .bind(restaurant_id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

/// Stock rows under the threshold, for the low-stock report
pub async fn find_low_stock(
    pool: &SqlitePool,
    threshold: f64,
    restaurant_id: Option<i64>,
) -> RepoResult<Vec<StockItemDetail>> {
    let items = match restaurant_id {
        Some(rid) => {
            sqlx::query_as::<_, StockItemDetail>(&format!(
                "{DETAIL_QUERY} WHERE s.quantity < ? AND s.restaurant_id = ? ORDER BY s.quantity"
            ))
            .bind(threshold)
            .bind(rid)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, StockItemDetail>(&format!(
                "{DETAIL_QUERY} WHERE s.quantity < ? ORDER BY s.quantity"
            ))
            .bind(threshold)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(items)
}

pub async fn create(pool: &SqlitePool, data: StockItemCreate) -> RepoResult<StockItem> {
    if super::ingredient::find_by_id(pool, data.ingredient_id)
        .await?
        .is_none()
    {
        return Err(RepoError::Business(
            ErrorCode::IngredientNotFound,
            format!("Ingredient {} not found", data.ingredient_id),
        ));
    }
    if super::restaurant::find_by_id(pool, data.restaurant_id)
        .await?
        .is_none()
    {
        return Err(RepoError::Business(
            ErrorCode::RestaurantNotFound,
            format!("Restaurant {} not found", data.restaurant_id),
        ));
    }
    if find_by_pair(pool, data.ingredient_id, data.restaurant_id)
        .await?
        .is_some()
    {
        return Err(RepoError::Business(
            ErrorCode::StockItemExists,
            "Stock item already exists for this ingredient and restaurant".into(),
        ));
    }

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO stock_item (id, ingredient_id, restaurant_id, quantity, last_updated) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(data.ingredient_id)
    .bind(data.restaurant_id)
    .bind(round_stock(data.quantity))
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create stock item".into()))
}

/// Overwrite the on-hand quantity (stocktake correction)
pub async fn set_quantity(pool: &SqlitePool, id: i64, quantity: f64) -> RepoResult<StockItem> {
    let rows = sqlx::query("UPDATE stock_item SET quantity = ?, last_updated = ? WHERE id = ?")
        .bind(round_stock(quantity))
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Stock item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Stock item {id} not found")))
}

/// Receive a delivery: add to the current quantity in one atomic update
pub async fn add_quantity(pool: &SqlitePool, id: i64, amount: f64) -> RepoResult<StockItem> {
    let rows = sqlx::query(
        "UPDATE stock_item SET quantity = ROUND(quantity + ?, 3), last_updated = ? WHERE id = ?",
    )
    .bind(round_stock(amount))
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Stock item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Stock item {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM stock_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Stock item {id} not found")));
    }
    Ok(true)
}
