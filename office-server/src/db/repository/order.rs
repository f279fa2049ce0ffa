//! Order Repository
//!
//! Orders and their lines. Every line mutation recomputes the owning
//! order's total inside the same transaction, so the invariant
//! `total_price == Σ price_at_moment × quantity` holds at commit points.

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{
    MenuItem, Order, OrderCreate, OrderDetail, OrderItemAdd, OrderItemDetail, OrderStatus,
};
use shared::money::order_total;
use shared::util::{now_millis, snowflake_id};
use sqlx::{Sqlite, SqlitePool, Transaction};

const COLUMNS: &str = "id, restaurant_id, created_by, status, table_number, total_price, receipt_number, ingredients_processed, created_at, updated_at";

/// Maximum quantity per order line
const MAX_LINE_QUANTITY: i64 = 999;

fn validate_quantity(quantity: i64) -> RepoResult<()> {
    if quantity <= 0 {
        return Err(RepoError::Validation(format!(
            "Quantity must be positive, got {quantity}"
        )));
    }
    if quantity > MAX_LINE_QUANTITY {
        return Err(RepoError::Validation(format!(
            "Quantity exceeds maximum allowed ({MAX_LINE_QUANTITY}), got {quantity}"
        )));
    }
    Ok(())
}

fn ensure_editable(order: &Order) -> RepoResult<()> {
    if order.status.is_terminal() {
        return Err(RepoError::Business(
            ErrorCode::OrderNotEditable,
            format!(
                "Order {} is {} and can no longer be edited",
                order.id,
                order.status.as_str()
            ),
        ));
    }
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order =
        sqlx::query_as::<_, Order>(&format!("SELECT {COLUMNS} FROM customer_order WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(order)
}

fn require(order: Option<Order>, id: i64) -> RepoResult<Order> {
    order.ok_or_else(|| {
        RepoError::Business(ErrorCode::OrderNotFound, format!("Order {id} not found"))
    })
}

/// List orders newest first, with optional status/restaurant filters
pub async fn find_all(
    pool: &SqlitePool,
    status: Option<OrderStatus>,
    restaurant_id: Option<i64>,
    limit: i32,
    offset: i32,
) -> RepoResult<Vec<Order>> {
    let mut sql = format!("SELECT {COLUMNS} FROM customer_order");
    let mut clauses: Vec<&str> = Vec::new();
    if status.is_some() {
        clauses.push("status = ?");
    }
    if restaurant_id.is_some() {
        clauses.push("restaurant_id = ?");
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY created_at DESC LIMIT ? OFFSET ?");

    let mut query = sqlx::query_as::<_, Order>(&sql);
    if let Some(status) = status {
        query = query.bind(status);
    }
    if let Some(rid) = restaurant_id {
        query = query.bind(rid);
    }
    let orders = query.bind(limit).bind(offset).fetch_all(pool).await?;
    Ok(orders)
}

/// Order lines joined with menu item names
pub async fn find_items(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItemDetail>> {
    let items = sqlx::query_as::<_, OrderItemDetail>(
        "SELECT oi.id, oi.order_id, oi.menu_item_id, m.name AS menu_item_name, oi.quantity, oi.price_at_moment, ROUND(oi.price_at_moment * oi.quantity, 2) AS line_total \
         FROM order_item oi \
         JOIN menu_item m ON m.id = oi.menu_item_id \
         WHERE oi.order_id = ? \
         ORDER BY m.name",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Order with restaurant name and lines
pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<OrderDetail> {
    let order = require(find_by_id(pool, id).await?, id)?;
    let restaurant_name: String =
        sqlx::query_scalar("SELECT name FROM restaurant WHERE id = ?")
            .bind(order.restaurant_id)
            .fetch_optional(pool)
            .await?
            .unwrap_or_default();
    let items = find_items(pool, id).await?;
    Ok(OrderDetail {
        order,
        restaurant_name,
        items,
    })
}

pub async fn create(
    pool: &SqlitePool,
    data: OrderCreate,
    created_by: Option<i64>,
) -> RepoResult<Order> {
    let restaurant = super::restaurant::find_by_id(pool, data.restaurant_id)
        .await?
        .ok_or_else(|| {
            RepoError::Business(
                ErrorCode::RestaurantNotFound,
                format!("Restaurant {} not found", data.restaurant_id),
            )
        })?;
    if !restaurant.is_active {
        return Err(RepoError::Validation(format!(
            "Restaurant '{}' is disabled",
            restaurant.name
        )));
    }

    if let Some(table) = data.table_number
        && table <= 0
    {
        return Err(RepoError::Validation(format!(
            "Table number must be positive, got {table}"
        )));
    }

    let id = snowflake_id();
    let now = now_millis();
    // Unique by construction: the id is unique and the date is informational
    let receipt_number = format!(
        "R-{}-{}",
        chrono::Utc::now().format("%Y%m%d"),
        id
    );

    sqlx::query(
        "INSERT INTO customer_order (id, restaurant_id, created_by, status, table_number, total_price, receipt_number, ingredients_processed, created_at, updated_at) \
         VALUES (?, ?, ?, 'PENDING', ?, 0, ?, 0, ?, ?)",
    )
    .bind(id)
    .bind(data.restaurant_id)
    .bind(created_by)
    .bind(data.table_number)
    .bind(&receipt_number)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    require(find_by_id(pool, id).await?, id)
}

/// Recompute the order total from its lines, inside the caller's transaction
async fn recompute_total(
    tx: &mut Transaction<'_, Sqlite>,
    order_id: i64,
    now: i64,
) -> RepoResult<()> {
    let lines: Vec<(f64, i64)> =
        sqlx::query_as("SELECT price_at_moment, quantity FROM order_item WHERE order_id = ?")
            .bind(order_id)
            .fetch_all(&mut **tx)
            .await?;

    let total = order_total(lines);

    sqlx::query("UPDATE customer_order SET total_price = ?, updated_at = ? WHERE id = ?")
        .bind(total)
        .bind(now)
        .bind(order_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Add a menu item to an order.
///
/// An existing line for the same menu item gains the quantity; a new line
/// freezes the menu item's current price into `price_at_moment`.
pub async fn add_item(pool: &SqlitePool, order_id: i64, data: OrderItemAdd) -> RepoResult<Order> {
    validate_quantity(data.quantity)?;

    let order = require(find_by_id(pool, order_id).await?, order_id)?;
    ensure_editable(&order)?;

    let menu_item: Option<MenuItem> = super::menu_item::find_by_id(pool, data.menu_item_id).await?;
    let menu_item = menu_item.ok_or_else(|| {
        RepoError::Business(
            ErrorCode::MenuItemNotFound,
            format!("Menu item {} not found", data.menu_item_id),
        )
    })?;
    if !menu_item.is_available {
        return Err(RepoError::Business(
            ErrorCode::MenuItemUnavailable,
            format!("Menu item '{}' is not available", menu_item.name),
        ));
    }

    let now = now_millis();
    let mut tx = pool.begin().await?;

    // Price freeze happens on first insert; conflicts keep the frozen price
    sqlx::query(
        "INSERT INTO order_item (id, order_id, menu_item_id, quantity, price_at_moment) VALUES (?, ?, ?, ?, ?) \
         ON CONFLICT(order_id, menu_item_id) DO UPDATE SET quantity = quantity + excluded.quantity",
    )
    .bind(snowflake_id())
    .bind(order_id)
    .bind(data.menu_item_id)
    .bind(data.quantity)
    .bind(menu_item.price)
    .execute(&mut *tx)
    .await?;

    recompute_total(&mut tx, order_id, now).await?;
    tx.commit().await?;

    require(find_by_id(pool, order_id).await?, order_id)
}

/// Change the quantity of an order line
pub async fn update_item_quantity(
    pool: &SqlitePool,
    order_id: i64,
    item_id: i64,
    quantity: i64,
) -> RepoResult<Order> {
    validate_quantity(quantity)?;

    let order = require(find_by_id(pool, order_id).await?, order_id)?;
    ensure_editable(&order)?;

    let now = now_millis();
    let mut tx = pool.begin().await?;

    let rows = sqlx::query("UPDATE order_item SET quantity = ? WHERE id = ? AND order_id = ?")
        .bind(quantity)
        .bind(item_id)
        .bind(order_id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Business(
            ErrorCode::OrderItemNotFound,
            format!("Order item {item_id} not found"),
        ));
    }

    recompute_total(&mut tx, order_id, now).await?;
    tx.commit().await?;

    require(find_by_id(pool, order_id).await?, order_id)
}

/// Remove a line from an order
pub async fn remove_item(pool: &SqlitePool, order_id: i64, item_id: i64) -> RepoResult<Order> {
    let order = require(find_by_id(pool, order_id).await?, order_id)?;
    ensure_editable(&order)?;

    let now = now_millis();
    let mut tx = pool.begin().await?;

    let rows = sqlx::query("DELETE FROM order_item WHERE id = ? AND order_id = ?")
        .bind(item_id)
        .bind(order_id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Business(
            ErrorCode::OrderItemNotFound,
            format!("Order item {item_id} not found"),
        ));
    }

    recompute_total(&mut tx, order_id, now).await?;
    tx.commit().await?;

    require(find_by_id(pool, order_id).await?, order_id)
}

/// Transition an order to a new status.
///
/// Terminal orders reject all transitions. The ingredient-deduction side
/// effect of entering IN_PROGRESS is driven by the caller
/// (`inventory::deduction`), not here.
pub async fn update_status(
    pool: &SqlitePool,
    order_id: i64,
    new_status: OrderStatus,
) -> RepoResult<Order> {
    let order = require(find_by_id(pool, order_id).await?, order_id)?;

    if order.status == new_status {
        return Ok(order);
    }

    if order.status.is_terminal() {
        let code = match order.status {
            OrderStatus::Completed => ErrorCode::OrderAlreadyCompleted,
            _ => ErrorCode::OrderAlreadyCancelled,
        };
        return Err(RepoError::Business(
            code,
            format!(
                "Order {} is {} and cannot change status",
                order_id,
                order.status.as_str()
            ),
        ));
    }

    sqlx::query("UPDATE customer_order SET status = ?, updated_at = ? WHERE id = ?")
        .bind(new_status)
        .bind(now_millis())
        .bind(order_id)
        .execute(pool)
        .await?;

    require(find_by_id(pool, order_id).await?, order_id)
}
