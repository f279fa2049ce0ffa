//! Role Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Role, RoleCreate, RoleUpdate};
use shared::util::snowflake_id;
use sqlx::SqlitePool;

use crate::auth::permissions::is_valid_permission;

const COLUMNS: &str = "id, name, display_name, permissions, is_system, is_active";

fn validate_permissions(permissions: &[String]) -> RepoResult<()> {
    for p in permissions {
        if !is_valid_permission(p) {
            return Err(RepoError::Validation(format!("Unknown permission: {p}")));
        }
    }
    Ok(())
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Role>> {
    let roles = sqlx::query_as::<_, Role>(&format!(
        "SELECT {COLUMNS} FROM role WHERE is_active = 1 ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(roles)
}

pub async fn find_all_with_inactive(pool: &SqlitePool) -> RepoResult<Vec<Role>> {
    let roles = sqlx::query_as::<_, Role>(&format!("SELECT {COLUMNS} FROM role ORDER BY name"))
        .fetch_all(pool)
        .await?;
    Ok(roles)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Role>> {
    let role = sqlx::query_as::<_, Role>(&format!("SELECT {COLUMNS} FROM role WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(role)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Role>> {
    let role = sqlx::query_as::<_, Role>(&format!(
        "SELECT {COLUMNS} FROM role WHERE name = ? LIMIT 1"
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(role)
}

pub async fn create(pool: &SqlitePool, data: RoleCreate) -> RepoResult<Role> {
    validate_permissions(&data.permissions)?;

    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Business(
            ErrorCode::RoleNameExists,
            format!("Role '{}' already exists", data.name),
        ));
    }

    let id = snowflake_id();
    let display_name = data.display_name.unwrap_or_else(|| data.name.clone());
    let permissions_json =
        serde_json::to_string(&data.permissions).unwrap_or_else(|_| "[]".to_string());

    sqlx::query(
        "INSERT INTO role (id, name, display_name, permissions, is_system, is_active) VALUES (?, ?, ?, ?, 0, 1)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&display_name)
    .bind(&permissions_json)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create role".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: RoleUpdate) -> RepoResult<Role> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Role {id} not found")))?;

    if existing.is_system {
        return Err(RepoError::Business(
            ErrorCode::RoleIsSystem,
            "Cannot modify system role".into(),
        ));
    }

    if let Some(ref new_name) = data.name
        && new_name != &existing.name
        && find_by_name(pool, new_name).await?.is_some()
    {
        return Err(RepoError::Business(
            ErrorCode::RoleNameExists,
            format!("Role '{}' already exists", new_name),
        ));
    }

    if let Some(ref permissions) = data.permissions {
        validate_permissions(permissions)?;
    }

    let permissions_json = data
        .permissions
        .as_ref()
        .map(|p| serde_json::to_string(p).unwrap_or_else(|_| "[]".to_string()));

    let rows = sqlx::query(
        "UPDATE role SET name = COALESCE(?1, name), display_name = COALESCE(?2, display_name), permissions = COALESCE(?3, permissions), is_active = COALESCE(?4, is_active) WHERE id = ?5",
    )
    .bind(data.name)
    .bind(data.display_name)
    .bind(permissions_json)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Role {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Role {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Role {id} not found")))?;

    if existing.is_system {
        return Err(RepoError::Business(
            ErrorCode::RoleIsSystem,
            "Cannot delete system role".into(),
        ));
    }

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user WHERE role_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if users > 0 {
        return Err(RepoError::Business(
            ErrorCode::RoleInUse,
            format!("Role '{}' is assigned to {} user(s)", existing.name, users),
        ));
    }

    sqlx::query("DELETE FROM role WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(true)
}
