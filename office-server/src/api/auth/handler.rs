//! Authentication Handlers
//!
//! Handles login, logout, and password changes

use std::time::Duration;

use axum::{Extension, Json, extract::State};

use crate::auth::CurrentUser;
use crate::auth::password::verify_password;
use crate::core::ServerState;
use crate::db::repository::{role, user};
use crate::security_log;
use crate::utils::{AppError, AppResult};
use shared::models::{ChangePasswordRequest, LoginRequest, LoginResponse, User, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

async fn build_user_info(state: &ServerState, user: &User) -> AppResult<UserInfo> {
    let role = role::find_by_id(&state.pool, user.role_id)
        .await?
        .ok_or_else(|| AppError::internal("Role not found"))?;

    Ok(UserInfo {
        id: user.id,
        email: user.email.clone(),
        username: user.username.clone(),
        display_name: user.display_name(),
        role_id: role.id,
        role_name: role.name,
        permissions: role.permissions,
        is_system: user.is_system,
        is_active: user.is_active,
        created_at: user.created_at,
    })
}

/// POST /api/auth/login - 登录
///
/// Authenticates credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let account = user::find_by_email(&state.pool, &req.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent email enumeration
    let account = match account {
        Some(account) => {
            if !account.is_active {
                return Err(AppError::with_message(
                    shared::ErrorCode::AccountDisabled,
                    "Account has been disabled",
                ));
            }

            let password_valid = verify_password(&req.password, &account.password_hash)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

            if !password_valid {
                security_log!(
                    "WARN",
                    "login_failed",
                    email = req.email.clone(),
                    reason = "invalid_credentials"
                );
                return Err(AppError::invalid_credentials());
            }

            account
        }
        None => {
            security_log!(
                "WARN",
                "login_failed",
                email = req.email.clone(),
                reason = "user_not_found"
            );
            return Err(AppError::invalid_credentials());
        }
    };

    let role = role::find_by_id(&state.pool, account.role_id)
        .await?
        .ok_or_else(|| AppError::internal("Role not found"))?;
    if !role.is_active {
        return Err(AppError::forbidden("Role has been disabled"));
    }

    let info = build_user_info(&state, &account).await?;

    let jwt_service = state.get_jwt_service();
    let token = jwt_service
        .generate_token(
            info.id,
            &info.email,
            &info.display_name,
            info.role_id,
            &info.role_name,
            &info.permissions,
            info.is_system,
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(
        user_id = info.id,
        email = %info.email,
        role = %info.role_name,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse { token, user: info }))
}

/// GET /api/auth/me - 当前用户信息
///
/// Re-reads the account so disabled users see fresh state
pub async fn me(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserInfo>> {
    let account = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    let info = build_user_info(&state, &account).await?;
    Ok(Json(info))
}

/// POST /api/auth/logout - 登出
///
/// Stateless tokens: the client discards the token; this logs the event
pub async fn logout(
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponseOk>> {
    tracing::info!(
        user_id = current_user.id,
        email = %current_user.email,
        "User logged out"
    );
    Ok(Json(ApiResponseOk { ok: true }))
}

#[derive(serde::Serialize)]
pub struct ApiResponseOk {
    pub ok: bool,
}

/// POST /api/auth/change-password - 修改自己的密码
pub async fn change_password(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> AppResult<Json<ApiResponseOk>> {
    user::change_password(
        &state.pool,
        current_user.id,
        &req.current_password,
        &req.new_password,
    )
    .await?;

    security_log!(
        "INFO",
        "password_changed",
        user_id = current_user.id,
        email = current_user.email.clone()
    );

    Ok(Json(ApiResponseOk { ok: true }))
}
