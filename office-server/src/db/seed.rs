//! First-boot seeding
//!
//! Built-in roles ship as a migration; the admin account is created here
//! because password hashing needs the argon2 stack.

use sqlx::SqlitePool;

use crate::auth::password::hash_password;
use crate::core::Config;
use crate::db::repository::{role, user};
use crate::utils::AppError;
use shared::util::{now_millis, snowflake_id};

/// Ensure an active admin account exists.
///
/// On an empty database this creates the account from ADMIN_EMAIL /
/// ADMIN_PASSWORD. Without a configured password a random one is generated
/// and printed once to the log — change it after first login.
pub async fn ensure_admin_user(pool: &SqlitePool, config: &Config) -> Result<(), AppError> {
    let admins = user::count_active_admins(pool)
        .await
        .map_err(AppError::from)?;
    if admins > 0 {
        return Ok(());
    }

    let admin_role = role::find_by_name(pool, "admin")
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::internal("Built-in admin role is missing"))?;

    let (password, generated) = match &config.admin_password {
        Some(password) => (password.clone(), false),
        None => (crate::auth::jwt::generate_printable_jwt_secret(), true),
    };

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let id = snowflake_id();
    let now = now_millis();

    sqlx::query(
        "INSERT INTO user (id, email, username, first_name, last_name, password_hash, role_id, is_system, is_active, created_at, updated_at) \
         VALUES (?, ?, 'admin', 'System', 'Administrator', ?, ?, 1, 1, ?, ?)",
    )
    .bind(id)
    .bind(&config.admin_email)
    .bind(&password_hash)
    .bind(admin_role.id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| AppError::database(format!("Failed to seed admin user: {e}")))?;

    if generated {
        tracing::warn!(
            email = %config.admin_email,
            password = %password,
            "Seeded admin account with a GENERATED password — change it after first login"
        );
    } else {
        tracing::info!(email = %config.admin_email, "Seeded admin account");
    }

    Ok(())
}
