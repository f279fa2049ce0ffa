//! Ingredient deduction for orders
//!
//! For each order line, each recipe line of its menu item costs
//! `recipe.quantity × line.quantity` of the ingredient from the order's
//! restaurant. The whole run executes inside one transaction:
//!
//! - deduction happens at most once per order — the `ingredients_processed`
//!   flag is flipped with a compare-and-set UPDATE before any stock changes
//! - stock subtraction uses `UPDATE ... WHERE quantity >= needed`, so two
//!   concurrent orders cannot both pass a stale sufficiency check
//! - shortfalls and missing stock rows become warnings, never rollbacks;
//!   partial deduction with warnings is a successful run
//! - any database error aborts the transaction; no stock row is left
//!   half-updated and the flag stays unset

use crate::db::repository::{RepoError, RepoResult, order};
use shared::error::ErrorCode;
use shared::models::DeductionOutcome;
use shared::money::needed_quantity;
use shared::util::now_millis;
use sqlx::SqlitePool;

/// One (order line × recipe line) deduction step
#[derive(Debug, sqlx::FromRow)]
struct IngredientNeed {
    ingredient_id: i64,
    ingredient_name: String,
    unit: String,
    per_serving: f64,
    servings: i64,
}

/// Run ingredient deduction for an order.
///
/// Returns `success: false` with no stock effect when the order was already
/// processed. A missing order is an error, not an outcome.
pub async fn process_order(pool: &SqlitePool, order_id: i64) -> RepoResult<DeductionOutcome> {
    let order = order::find_by_id(pool, order_id).await?.ok_or_else(|| {
        RepoError::Business(ErrorCode::OrderNotFound, format!("Order {order_id} not found"))
    })?;

    let now = now_millis();
    let mut tx = pool.begin().await?;

    // Idempotence gate: first writer flips the flag, everyone else sees 0 rows
    let flagged = sqlx::query(
        "UPDATE customer_order SET ingredients_processed = 1, updated_at = ? WHERE id = ? AND ingredients_processed = 0",
    )
    .bind(now)
    .bind(order_id)
    .execute(&mut *tx)
    .await?;

    if flagged.rows_affected() == 0 {
        // Nothing was written; dropping the transaction is a no-op rollback
        return Ok(DeductionOutcome {
            success: false,
            message: "Ingredients have already been processed for this order".to_string(),
            warnings: Vec::new(),
        });
    }

    let needs = sqlx::query_as::<_, IngredientNeed>(
        "SELECT rc.ingredient_id, i.name AS ingredient_name, i.unit, rc.quantity AS per_serving, oi.quantity AS servings \
         FROM order_item oi \
         JOIN recipe rc ON rc.menu_item_id = oi.menu_item_id \
         JOIN ingredient i ON i.id = rc.ingredient_id \
         WHERE oi.order_id = ? \
         ORDER BY i.name",
    )
    .bind(order_id)
    .fetch_all(&mut *tx)
    .await?;

    let mut warnings = Vec::new();

    for need in &needs {
        let needed = needed_quantity(need.per_serving, need.servings);
        if needed <= 0.0 {
            continue;
        }

        // Compare-and-swap: only subtracts when enough stock is on hand
        let deducted = sqlx::query(
            "UPDATE stock_item SET quantity = ROUND(quantity - ?1, 3), last_updated = ?2 \
             WHERE ingredient_id = ?3 AND restaurant_id = ?4 AND quantity >= ?1",
        )
        .bind(needed)
        .bind(now)
        .bind(need.ingredient_id)
        .bind(order.restaurant_id)
        .execute(&mut *tx)
        .await?;

        if deducted.rows_affected() > 0 {
            continue;
        }

        // Not enough stock, or no stock row at all
        let on_hand: Option<f64> = sqlx::query_scalar(
            "SELECT quantity FROM stock_item WHERE ingredient_id = ? AND restaurant_id = ?",
        )
        .bind(need.ingredient_id)
        .bind(order.restaurant_id)
        .fetch_optional(&mut *tx)
        .await?;

        match on_hand {
            Some(available) => {
                sqlx::query(
                    "UPDATE stock_item SET quantity = 0, last_updated = ? WHERE ingredient_id = ? AND restaurant_id = ?",
                )
                .bind(now)
                .bind(need.ingredient_id)
                .bind(order.restaurant_id)
                .execute(&mut *tx)
                .await?;
                warnings.push(format!(
                    "Insufficient stock for '{}': needed {} {}, had {} — stock zeroed",
                    need.ingredient_name, needed, need.unit, available
                ));
            }
            None => {
                warnings.push(format!(
                    "No stock record for ingredient '{}' at this restaurant",
                    need.ingredient_name
                ));
            }
        }
    }

    tx.commit().await?;

    let message = if warnings.is_empty() {
        "Ingredients deducted from stock".to_string()
    } else {
        format!(
            "Ingredients deducted with {} warning(s)",
            warnings.len()
        )
    };

    tracing::info!(
        order_id,
        steps = needs.len(),
        warnings = warnings.len(),
        "Ingredient deduction completed"
    );

    Ok(DeductionOutcome {
        success: true,
        message,
        warnings,
    })
}
