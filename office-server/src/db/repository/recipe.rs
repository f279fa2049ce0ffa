//! Recipe Repository
//!
//! A menu item's recipe is edited as a whole: the full line set is replaced
//! in one transaction so a half-saved recipe is never observable.

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{RecipeLineDetail, RecipeLineInput};
use shared::money::round_stock;
use shared::util::snowflake_id;
use sqlx::SqlitePool;
use std::collections::HashSet;

pub async fn find_by_menu_item(
    pool: &SqlitePool,
    menu_item_id: i64,
) -> RepoResult<Vec<RecipeLineDetail>> {
    let lines = sqlx::query_as::<_, RecipeLineDetail>(
        "SELECT rc.id, rc.menu_item_id, rc.ingredient_id, i.name AS ingredient_name, i.unit, rc.quantity, rc.note \
         FROM recipe rc \
         JOIN ingredient i ON i.id = rc.ingredient_id \
         WHERE rc.menu_item_id = ? \
         ORDER BY i.name",
    )
    .bind(menu_item_id)
    .fetch_all(pool)
    .await?;
    Ok(lines)
}

/// Replace the recipe of a menu item with the given lines
pub async fn replace_for_menu_item(
    pool: &SqlitePool,
    menu_item_id: i64,
    lines: &[RecipeLineInput],
) -> RepoResult<Vec<RecipeLineDetail>> {
    if super::menu_item::find_by_id(pool, menu_item_id)
        .await?
        .is_none()
    {
        return Err(RepoError::Business(
            ErrorCode::MenuItemNotFound,
            format!("Menu item {menu_item_id} not found"),
        ));
    }

    let mut seen = HashSet::new();
    for line in lines {
        if !seen.insert(line.ingredient_id) {
            return Err(RepoError::Business(
                ErrorCode::RecipeDuplicateIngredient,
                format!("Ingredient {} appears more than once", line.ingredient_id),
            ));
        }
        if !line.quantity.is_finite() || line.quantity <= 0.0 {
            return Err(RepoError::Validation(format!(
                "Recipe quantity must be positive, got {}",
                line.quantity
            )));
        }
        if super::ingredient::find_by_id(pool, line.ingredient_id)
            .await?
            .is_none()
        {
            return Err(RepoError::Business(
                ErrorCode::IngredientNotFound,
                format!("Ingredient {} not found", line.ingredient_id),
            ));
        }
    }

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM recipe WHERE menu_item_id = ?")
        .bind(menu_item_id)
        .execute(&mut *tx)
        .await?;

    for line in lines {
        sqlx::query(
            "INSERT INTO recipe (id, menu_item_id, ingredient_id, quantity, note) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(snowflake_id())
        .bind(menu_item_id)
        .bind(line.ingredient_id)
        .bind(round_stock(line.quantity))
        .bind(&line.note)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_by_menu_item(pool, menu_item_id).await
}
