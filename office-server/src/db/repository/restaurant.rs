//! Restaurant Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, address, phone, is_active, created_at, updated_at";

/// Restaurant with headcount and stock-line counts for the list screens
#[derive(Debug, serde::Serialize)]
pub struct RestaurantWithCounts {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub employee_count: i64,
    pub stock_item_count: i64,
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Restaurant>> {
    let restaurants = sqlx::query_as::<_, Restaurant>(&format!(
        "SELECT {COLUMNS} FROM restaurant ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(restaurants)
}

pub async fn find_all_with_counts(pool: &SqlitePool) -> RepoResult<Vec<RestaurantWithCounts>> {
    let rows: Vec<(i64, String, String, String, bool, i64, i64, i64, i64)> = sqlx::query_as(
        "SELECT r.id, r.name, r.address, r.phone, r.is_active, r.created_at, r.updated_at, \
         (SELECT COUNT(*) FROM employee e WHERE e.restaurant_id = r.id) AS employee_count, \
         (SELECT COUNT(*) FROM stock_item s WHERE s.restaurant_id = r.id) AS stock_item_count \
         FROM restaurant r ORDER BY r.name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(
            |(
                id,
                name,
                address,
                phone,
                is_active,
                created_at,
                updated_at,
                employee_count,
                stock_item_count,
            )| RestaurantWithCounts {
                restaurant: Restaurant {
                    id,
                    name,
                    address,
                    phone,
                    is_active,
                    created_at,
                    updated_at,
                },
                employee_count,
                stock_item_count,
            },
        )
        .collect())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Restaurant>> {
    let restaurant = sqlx::query_as::<_, Restaurant>(&format!(
        "SELECT {COLUMNS} FROM restaurant WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(restaurant)
}

pub async fn create(pool: &SqlitePool, data: RestaurantCreate) -> RepoResult<Restaurant> {
    let id = snowflake_id();
    let now = now_millis();

    sqlx::query(
        "INSERT INTO restaurant (id, name, address, phone, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create restaurant".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: RestaurantUpdate) -> RepoResult<Restaurant> {
    let rows = sqlx::query(
        "UPDATE restaurant SET name = COALESCE(?1, name), address = COALESCE(?2, address), phone = COALESCE(?3, phone), is_active = COALESCE(?4, is_active), updated_at = ?5 WHERE id = ?6",
    )
    .bind(data.name)
    .bind(data.address)
    .bind(data.phone)
    .bind(data.is_active)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))?;

    // Orders are history; a branch with orders can only be deactivated
    let orders: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM customer_order WHERE restaurant_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
    if orders > 0 {
        return Err(RepoError::Business(
            ErrorCode::RestaurantHasOrders,
            format!(
                "Restaurant '{}' has {} order(s); deactivate it instead",
                existing.name, orders
            ),
        ));
    }

    // stock rows cascade, employee assignments are nulled by the FK
    sqlx::query("DELETE FROM restaurant WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(true)
}
