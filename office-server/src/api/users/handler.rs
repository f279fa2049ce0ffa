//! User API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_email, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{User, UserCreate, UserUpdate};

/// GET /api/users - 获取账号列表
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    let users = user::find_all(&state.pool).await?;
    Ok(Json(users))
}

/// GET /api/users/:id - 获取单个账号
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<User>> {
    let user = user::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {}", id)))?;
    Ok(Json(user))
}

/// POST /api/users - 创建账号
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<User>> {
    validate_email(&payload.email)?;
    validate_required_text(&payload.username, "username", MAX_NAME_LEN)?;
    validate_required_text(&payload.password, "password", MAX_PASSWORD_LEN)?;
    validate_optional_text(&payload.first_name, "first_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.last_name, "last_name", MAX_NAME_LEN)?;

    let user = user::create(&state.pool, payload).await?;

    tracing::info!(user_id = user.id, email = %user.email, "User account created");

    Ok(Json(user))
}

/// PUT /api/users/:id - 更新账号
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<User>> {
    if let Some(ref email) = payload.email {
        validate_email(email)?;
    }
    validate_optional_text(&payload.username, "username", MAX_NAME_LEN)?;
    validate_optional_text(&payload.password, "password", MAX_PASSWORD_LEN)?;
    validate_optional_text(&payload.first_name, "first_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.last_name, "last_name", MAX_NAME_LEN)?;

    let user = user::update(&state.pool, id, payload).await?;
    Ok(Json(user))
}

/// DELETE /api/users/:id - 删除账号
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = user::delete(&state.pool, id, current_user.id).await?;

    tracing::info!(user_id = id, deleted_by = current_user.id, "User account deleted");

    Ok(Json(result))
}
