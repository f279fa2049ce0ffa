//! Role API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::permissions::ALL_PERMISSIONS;
use crate::core::ServerState;
use crate::db::repository::role;
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{Role, RoleCreate, RoleUpdate};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// GET /api/roles - 获取角色列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Role>>> {
    let roles = if query.include_inactive {
        role::find_all_with_inactive(&state.pool).await?
    } else {
        role::find_all(&state.pool).await?
    };
    Ok(Json(roles))
}

/// GET /api/roles/:id - 获取单个角色
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Role>> {
    let role = role::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Role {}", id)))?;
    Ok(Json(role))
}

/// GET /api/permissions - 可配置权限列表
pub async fn get_all_permissions() -> Json<Vec<&'static str>> {
    Json(ALL_PERMISSIONS.to_vec())
}

/// POST /api/roles - 创建角色
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RoleCreate>,
) -> AppResult<Json<Role>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.display_name, "display_name", MAX_NAME_LEN)?;

    let role = role::create(&state.pool, payload).await?;
    Ok(Json(role))
}

/// PUT /api/roles/:id - 更新角色
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RoleUpdate>,
) -> AppResult<Json<Role>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.display_name, "display_name", MAX_NAME_LEN)?;

    let role = role::update(&state.pool, id, payload).await?;
    Ok(Json(role))
}

/// DELETE /api/roles/:id - 删除角色
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = role::delete(&state.pool, id).await?;
    Ok(Json(result))
}
