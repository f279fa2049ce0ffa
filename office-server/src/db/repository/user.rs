//! User Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{User, UserCreate, UserUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

use crate::auth::password::hash_password;

const COLUMNS: &str = "id, email, username, first_name, last_name, password_hash, role_id, is_system, is_active, created_at, updated_at";

const MIN_PASSWORD_LEN: usize = 8;

fn validate_password(password: &str) -> RepoResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(RepoError::Business(
            ErrorCode::PasswordTooShort,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}

fn hash_or_err(password: &str) -> RepoResult<String> {
    hash_password(password)
        .map_err(|e| RepoError::Database(format!("Password hashing failed: {e}")))
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM user ORDER BY email"
    ))
    .fetch_all(pool)
    .await?;
    Ok(users)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM user WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM user WHERE email = ? COLLATE NOCASE LIMIT 1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Number of active users holding the admin role
pub async fn count_active_admins(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM user u JOIN role r ON u.role_id = r.id WHERE r.name = 'admin' AND u.is_active = 1",
    )
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, data: UserCreate) -> RepoResult<User> {
    validate_password(&data.password)?;

    if find_by_email(pool, &data.email).await?.is_some() {
        return Err(RepoError::Business(
            ErrorCode::UserEmailExists,
            format!("User '{}' already exists", data.email),
        ));
    }

    let role = super::role::find_by_id(pool, data.role_id)
        .await?
        .ok_or_else(|| {
            RepoError::Business(
                ErrorCode::RoleNotFound,
                format!("Role {} not found", data.role_id),
            )
        })?;
    if !role.is_active {
        return Err(RepoError::Validation(format!(
            "Role '{}' is disabled",
            role.name
        )));
    }

    let id = snowflake_id();
    let now = now_millis();
    let password_hash = hash_or_err(&data.password)?;

    sqlx::query(
        "INSERT INTO user (id, email, username, first_name, last_name, password_hash, role_id, is_system, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, 0, 1, ?, ?)",
    )
    .bind(id)
    .bind(&data.email)
    .bind(&data.username)
    .bind(data.first_name.unwrap_or_default())
    .bind(data.last_name.unwrap_or_default())
    .bind(&password_hash)
    .bind(data.role_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: UserUpdate) -> RepoResult<User> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))?;

    if existing.is_system {
        return Err(RepoError::Business(
            ErrorCode::UserIsSystem,
            "Cannot modify system user".into(),
        ));
    }

    if let Some(ref new_email) = data.email
        && !new_email.eq_ignore_ascii_case(&existing.email)
        && find_by_email(pool, new_email).await?.is_some()
    {
        return Err(RepoError::Business(
            ErrorCode::UserEmailExists,
            format!("User '{}' already exists", new_email),
        ));
    }

    if let Some(role_id) = data.role_id
        && super::role::find_by_id(pool, role_id).await?.is_none()
    {
        return Err(RepoError::Business(
            ErrorCode::RoleNotFound,
            format!("Role {role_id} not found"),
        ));
    }

    // Demoting or deactivating must not remove the last active admin
    let is_admin = super::role::find_by_id(pool, existing.role_id)
        .await?
        .map(|r| r.name == "admin")
        .unwrap_or(false);
    let loses_admin = data.role_id.is_some_and(|r| r != existing.role_id)
        || data.is_active == Some(false);
    if is_admin && existing.is_active && loses_admin && count_active_admins(pool).await? <= 1 {
        return Err(RepoError::Business(
            ErrorCode::LastAdmin,
            "Cannot remove the last active administrator".into(),
        ));
    }

    let password_hash = match data.password {
        Some(ref password) => {
            validate_password(password)?;
            Some(hash_or_err(password)?)
        }
        None => None,
    };

    let rows = sqlx::query(
        "UPDATE user SET email = COALESCE(?1, email), username = COALESCE(?2, username), first_name = COALESCE(?3, first_name), last_name = COALESCE(?4, last_name), password_hash = COALESCE(?5, password_hash), role_id = COALESCE(?6, role_id), is_active = COALESCE(?7, is_active), updated_at = ?8 WHERE id = ?9",
    )
    .bind(data.email)
    .bind(data.username)
    .bind(data.first_name)
    .bind(data.last_name)
    .bind(password_hash)
    .bind(data.role_id)
    .bind(data.is_active)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

/// Change a user's password after verifying the current one
pub async fn change_password(
    pool: &SqlitePool,
    id: i64,
    current_password: &str,
    new_password: &str,
) -> RepoResult<()> {
    let user = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))?;

    let valid = crate::auth::password::verify_password(current_password, &user.password_hash)
        .map_err(|e| RepoError::Database(format!("Password verification failed: {e}")))?;
    if !valid {
        return Err(RepoError::Business(
            ErrorCode::InvalidCredentials,
            "Current password is incorrect".into(),
        ));
    }

    validate_password(new_password)?;
    let password_hash = hash_or_err(new_password)?;

    sqlx::query("UPDATE user SET password_hash = ?, updated_at = ? WHERE id = ?")
        .bind(&password_hash)
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete a user account. `acting_user_id` guards against self-deletion.
pub async fn delete(pool: &SqlitePool, id: i64, acting_user_id: i64) -> RepoResult<bool> {
    if id == acting_user_id {
        return Err(RepoError::Business(
            ErrorCode::UserCannotDeleteSelf,
            "Cannot delete own account".into(),
        ));
    }

    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))?;

    if existing.is_system {
        return Err(RepoError::Business(
            ErrorCode::UserIsSystem,
            "Cannot delete system user".into(),
        ));
    }

    let is_admin = super::role::find_by_id(pool, existing.role_id)
        .await?
        .map(|r| r.name == "admin")
        .unwrap_or(false);
    if is_admin && existing.is_active && count_active_admins(pool).await? <= 1 {
        return Err(RepoError::Business(
            ErrorCode::LastAdmin,
            "Cannot delete the last active administrator".into(),
        ));
    }

    // employee profile cascades, orders keep a NULL created_by
    sqlx::query("DELETE FROM user WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(true)
}
