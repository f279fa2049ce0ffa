//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, category_id, name, description, price, cost_price, is_available, preparation_minutes, sort_order, created_at, updated_at";

async fn ensure_category(pool: &SqlitePool, category_id: i64) -> RepoResult<()> {
    if super::category::find_by_id(pool, category_id)
        .await?
        .is_none()
    {
        return Err(RepoError::Business(
            ErrorCode::CategoryNotFound,
            format!("Category {category_id} not found"),
        ));
    }
    Ok(())
}

/// List menu items, optionally narrowed to one category or to available ones
pub async fn find_all(
    pool: &SqlitePool,
    category_id: Option<i64>,
    only_available: bool,
) -> RepoResult<Vec<MenuItem>> {
    let mut sql = format!("SELECT {COLUMNS} FROM menu_item");
    let mut clauses: Vec<&str> = Vec::new();
    if category_id.is_some() {
        clauses.push("category_id = ?");
    }
    if only_available {
        clauses.push("is_available = 1");
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY category_id, sort_order, name");

    let mut query = sqlx::query_as::<_, MenuItem>(&sql);
    if let Some(cid) = category_id {
        query = query.bind(cid);
    }
    let items = query.fetch_all(pool).await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let item =
        sqlx::query_as::<_, MenuItem>(&format!("SELECT {COLUMNS} FROM menu_item WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(item)
}

pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    ensure_category(pool, data.category_id).await?;

    let id = snowflake_id();
    let now = now_millis();

    sqlx::query(
        "INSERT INTO menu_item (id, category_id, name, description, price, cost_price, is_available, preparation_minutes, sort_order, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(data.category_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.cost_price)
    .bind(data.is_available.unwrap_or(true))
    .bind(data.preparation_minutes.unwrap_or(15))
    .bind(data.sort_order.unwrap_or(0))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
    if let Some(category_id) = data.category_id {
        ensure_category(pool, category_id).await?;
    }

    let rows = sqlx::query(
        "UPDATE menu_item SET category_id = COALESCE(?1, category_id), name = COALESCE(?2, name), description = COALESCE(?3, description), price = COALESCE(?4, price), cost_price = COALESCE(?5, cost_price), is_available = COALESCE(?6, is_available), preparation_minutes = COALESCE(?7, preparation_minutes), sort_order = COALESCE(?8, sort_order), updated_at = ?9 WHERE id = ?10",
    )
    .bind(data.category_id)
    .bind(data.name)
    .bind(data.description)
    .bind(data.price)
    .bind(data.cost_price)
    .bind(data.is_available)
    .bind(data.preparation_minutes)
    .bind(data.sort_order)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

/// Delete a menu item. Rejected while order lines reference it — historical
/// orders keep their frozen prices and names.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))?;

    let order_lines: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM order_item WHERE menu_item_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
    if order_lines > 0 {
        return Err(RepoError::Business(
            ErrorCode::MenuItemInOrders,
            format!(
                "Cannot delete menu item '{}' referenced by {} order line(s); mark it unavailable instead",
                existing.name, order_lines
            ),
        ));
    }

    // recipe lines cascade
    sqlx::query("DELETE FROM menu_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(true)
}
