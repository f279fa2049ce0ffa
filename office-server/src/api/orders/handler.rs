//! Order API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::str::FromStr;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, order, restaurant};
use crate::inventory;
use crate::utils::{AppError, AppResult};
use shared::ErrorCode;
use shared::models::{
    DeductionOutcome, Order, OrderCreate, OrderDetail, OrderItemAdd, OrderItemUpdate, OrderStatus,
    OrderStatusUpdate, Receipt, ReceiptLine, StatusChangeResult,
};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub restaurant_id: Option<i64>,
    #[serde(default = "default_limit")]
    pub limit: i32,
    #[serde(default)]
    pub offset: i32,
}

fn default_limit() -> i32 {
    50
}

/// GET /api/orders - 获取订单列表 (按创建时间倒序)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let status = match query.status.as_deref() {
        Some(s) => Some(
            OrderStatus::from_str(s)
                .map_err(|_| AppError::with_message(ErrorCode::OrderInvalidStatus, format!("Invalid order status: {s}")))?,
        ),
        None => None,
    };

    let orders = order::find_all(
        &state.pool,
        status,
        query.restaurant_id,
        query.limit,
        query.offset,
    )
    .await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - 获取订单详情 (含明细)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = order::find_detail(&state.pool, id).await?;
    Ok(Json(detail))
}

/// POST /api/orders - 创建订单 (PENDING)
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    let o = order::create(&state.pool, payload, Some(current_user.id)).await?;

    tracing::info!(
        order_id = o.id,
        restaurant_id = o.restaurant_id,
        created_by = current_user.id,
        "Order created"
    );

    Ok(Json(o))
}

/// POST /api/orders/:id/items - 添加菜品到订单
///
/// 已存在的明细行累加数量；新行冻结菜品当前价格。
pub async fn add_item(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderItemAdd>,
) -> AppResult<Json<OrderDetail>> {
    order::add_item(&state.pool, id, payload).await?;
    let detail = order::find_detail(&state.pool, id).await?;
    Ok(Json(detail))
}

/// PUT /api/orders/:id/items/:item_id - 修改明细数量
pub async fn update_item(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(i64, i64)>,
    Json(payload): Json<OrderItemUpdate>,
) -> AppResult<Json<OrderDetail>> {
    order::update_item_quantity(&state.pool, id, item_id, payload.quantity).await?;
    let detail = order::find_detail(&state.pool, id).await?;
    Ok(Json(detail))
}

/// DELETE /api/orders/:id/items/:item_id - 删除明细行
pub async fn remove_item(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(i64, i64)>,
) -> AppResult<Json<OrderDetail>> {
    order::remove_item(&state.pool, id, item_id).await?;
    let detail = order::find_detail(&state.pool, id).await?;
    Ok(Json(detail))
}

/// Run deduction, folding unexpected failures into a `success: false`
/// outcome — the transaction is already rolled back by then.
async fn run_deduction(state: &ServerState, order_id: i64) -> AppResult<DeductionOutcome> {
    match inventory::process_order(&state.pool, order_id).await {
        Ok(outcome) => Ok(outcome),
        Err(RepoError::Business(code, msg)) => Err(AppError::with_message(code, msg)),
        Err(e) => {
            tracing::error!(order_id, error = %e, "Ingredient deduction failed");
            Ok(DeductionOutcome {
                success: false,
                message: "An unexpected error occurred while processing ingredients".to_string(),
                warnings: Vec::new(),
            })
        }
    }
}

/// PUT /api/orders/:id/status - 状态流转
///
/// 进入 IN_PROGRESS 时自动触发配料扣减；扣减结果随响应返回，
/// 但不阻塞状态变更本身。
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<StatusChangeResult>> {
    let before = order::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found")))?;

    let order = order::update_status(&state.pool, id, payload.status).await?;

    let deduction = if payload.status == OrderStatus::InProgress
        && before.status != OrderStatus::InProgress
    {
        Some(run_deduction(&state, id).await?)
    } else {
        None
    };

    tracing::info!(
        order_id = id,
        from = before.status.as_str(),
        to = order.status.as_str(),
        changed_by = current_user.id,
        "Order status changed"
    );

    // Re-read: deduction flips ingredients_processed
    let order = order::find_by_id(&state.pool, id).await?.unwrap_or(order);

    Ok(Json(StatusChangeResult { order, deduction }))
}

/// POST /api/orders/:id/process-ingredients - 手动触发配料扣减
pub async fn process_ingredients(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<DeductionOutcome>> {
    let outcome = run_deduction(&state, id).await?;

    tracing::info!(
        order_id = id,
        success = outcome.success,
        warnings = outcome.warnings.len(),
        triggered_by = current_user.id,
        "Manual ingredient deduction"
    );

    Ok(Json(outcome))
}

/// GET /api/orders/:id/receipt - 小票
pub async fn receipt(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Receipt>> {
    let detail = order::find_detail(&state.pool, id).await?;
    let branch = restaurant::find_by_id(&state.pool, detail.order.restaurant_id)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant"))?;

    let lines = detail
        .items
        .iter()
        .map(|item| ReceiptLine {
            name: item.menu_item_name.clone(),
            quantity: item.quantity,
            unit_price: item.price_at_moment,
            line_total: item.line_total,
        })
        .collect();

    Ok(Json(Receipt {
        receipt_number: detail.order.receipt_number.clone(),
        order_id: detail.order.id,
        restaurant_name: branch.name,
        restaurant_address: branch.address,
        restaurant_phone: branch.phone,
        table_number: detail.order.table_number,
        status: detail.order.status,
        lines,
        total: detail.order.total_price,
        created_at: detail.order.created_at,
    }))
}
