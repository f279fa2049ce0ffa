//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::employee;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{Employee, EmployeeCreate, EmployeeDetail, EmployeeUpdate};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub restaurant_id: Option<i64>,
}

/// GET /api/employees - 获取员工列表 (可按门店过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<EmployeeDetail>>> {
    let employees = employee::find_all(&state.pool, query.restaurant_id).await?;
    Ok(Json(employees))
}

/// GET /api/employees/:id - 获取单个员工
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EmployeeDetail>> {
    let employee = employee::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {}", id)))?;
    Ok(Json(employee))
}

/// POST /api/employees - 创建员工档案
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<Employee>> {
    validate_required_text(&payload.position, "position", MAX_SHORT_TEXT_LEN)?;

    let employee = employee::create(&state.pool, payload).await?;
    Ok(Json(employee))
}

/// PUT /api/employees/:id - 更新员工档案
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    if let Some(ref position) = payload.position {
        validate_required_text(position, "position", MAX_SHORT_TEXT_LEN)?;
    }

    let employee = employee::update(&state.pool, id, payload).await?;
    Ok(Json(employee))
}

/// DELETE /api/employees/:id - 删除员工档案
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = employee::delete(&state.pool, id).await?;
    Ok(Json(result))
}
