//! Ingredient Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Ingredient, IngredientCreate, IngredientUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, unit, created_at, updated_at";

/// List ingredients, optionally filtered by a name/unit substring
pub async fn find_all(pool: &SqlitePool, search: Option<&str>) -> RepoResult<Vec<Ingredient>> {
    let ingredients = match search {
        Some(term) => {
            let pattern = format!("%{}%", term.replace('%', "\\%").replace('_', "\\_"));
            sqlx::query_as::<_, Ingredient>(&format!(
                "SELECT {COLUMNS} FROM ingredient WHERE name LIKE ?1 ESCAPE '\\' OR unit LIKE ?1 ESCAPE '\\' ORDER BY name"
            ))
            .bind(pattern)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Ingredient>(&format!(
                "SELECT {COLUMNS} FROM ingredient ORDER BY name"
            ))
            .fetch_all(pool)
            .await?
        }
    };
    Ok(ingredients)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Ingredient>> {
    let ingredient =
        sqlx::query_as::<_, Ingredient>(&format!("SELECT {COLUMNS} FROM ingredient WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(ingredient)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Ingredient>> {
    let ingredient = sqlx::query_as::<_, Ingredient>(&format!(
        "SELECT {COLUMNS} FROM ingredient WHERE name = ? LIMIT 1"
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(ingredient)
}

pub async fn create(pool: &SqlitePool, data: IngredientCreate) -> RepoResult<Ingredient> {
    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Business(
            ErrorCode::IngredientNameExists,
            format!("Ingredient '{}' already exists", data.name),
        ));
    }

    let id = snowflake_id();
    let now = now_millis();

    sqlx::query("INSERT INTO ingredient (id, name, unit, created_at, updated_at) VALUES (?, ?, ?, ?, ?)")
        .bind(id)
        .bind(&data.name)
        .bind(&data.unit)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create ingredient".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: IngredientUpdate) -> RepoResult<Ingredient> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Ingredient {id} not found")))?;

    if let Some(ref new_name) = data.name
        && new_name != &existing.name
        && find_by_name(pool, new_name).await?.is_some()
    {
        return Err(RepoError::Business(
            ErrorCode::IngredientNameExists,
            format!("Ingredient '{}' already exists", new_name),
        ));
    }

    sqlx::query(
        "UPDATE ingredient SET name = COALESCE(?1, name), unit = COALESCE(?2, unit), updated_at = ?3 WHERE id = ?4",
    )
    .bind(data.name)
    .bind(data.unit)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Ingredient {id} not found")))
}

/// Hard delete; stock rows and recipe lines cascade with it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM ingredient WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Ingredient {id} not found")));
    }
    Ok(true)
}
