//! Report API Handlers
//!
//! Read-only aggregation over orders, menu and stock for the dashboards.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::stock;
use crate::utils::time::{day_end_millis, day_start_millis, parse_date, today};
use crate::utils::{AppError, AppResult};
use shared::ErrorCode;
use shared::models::{Order, StockItemDetail};
use shared::money::round_money;
use shared::util::now_millis;

// ============================================================================
// Response Types
// ============================================================================

/// Entity totals for the dashboard header tiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardTotals {
    pub restaurants: i64,
    pub menu_items: i64,
    pub users: i64,
    pub orders: i64,
}

/// Orders per status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Restaurant ranked by order count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopRestaurant {
    pub restaurant_id: i64,
    pub name: String,
    pub orders_count: i64,
}

/// Menu item ranked by ordered quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularItem {
    pub menu_item_id: i64,
    pub name: String,
    pub total_quantity: i64,
}

/// Full dashboard response
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub totals: DashboardTotals,
    /// Orders placed in the last 30 days
    pub recent_orders_count: i64,
    /// Revenue over the last 30 days (cancelled orders excluded)
    pub recent_revenue: f64,
    pub orders_by_status: Vec<StatusCount>,
    pub top_restaurants: Vec<TopRestaurant>,
    pub popular_items: Vec<PopularItem>,
    pub recent_orders: Vec<Order>,
}

/// Sales report row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesReportItem {
    pub order_id: i64,
    pub receipt_number: String,
    pub restaurant_name: String,
    pub created_at: i64,
    pub total: f64,
    pub status: String,
}

/// Sales report response
#[derive(Debug, Clone, Serialize)]
pub struct SalesReportResponse {
    pub items: Vec<SalesReportItem>,
    pub total_count: i64,
    pub total_revenue: f64,
    pub page: i32,
    pub page_size: i32,
    pub total_pages: i32,
}

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SalesReportQuery {
    /// today | 7d | 30d | custom
    #[serde(default = "default_time_range")]
    pub time_range: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub restaurant_id: Option<i64>,
    #[serde(default = "default_page")]
    pub page: i32,
}

fn default_time_range() -> String {
    "30d".to_string()
}

fn default_page() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct LowStockQuery {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    pub restaurant_id: Option<i64>,
}

fn default_threshold() -> f64 {
    10.0
}

const PAGE_SIZE: i32 = 20;

/// Resolve a time-range keyword to `[start, end)` millis in the business tz
fn resolve_time_range(
    query: &SalesReportQuery,
    tz: chrono_tz::Tz,
) -> AppResult<(i64, i64)> {
    let today = today(tz);
    match query.time_range.as_str() {
        "today" => Ok((day_start_millis(today, tz), day_end_millis(today, tz))),
        "7d" => Ok((
            day_start_millis(today - chrono::Duration::days(6), tz),
            day_end_millis(today, tz),
        )),
        "30d" => Ok((
            day_start_millis(today - chrono::Duration::days(29), tz),
            day_end_millis(today, tz),
        )),
        "custom" => {
            let (Some(start), Some(end)) = (&query.start_date, &query.end_date) else {
                return Err(AppError::with_message(
                    ErrorCode::ReportRangeInvalid,
                    "custom range requires start_date and end_date",
                ));
            };
            let start_date = parse_date(start)?;
            let end_date = parse_date(end)?;
            if end_date < start_date {
                return Err(AppError::with_message(
                    ErrorCode::ReportRangeInvalid,
                    format!("end_date {end_date} is before start_date {start_date}"),
                ));
            }
            Ok((
                day_start_millis(start_date, tz),
                day_end_millis(end_date, tz),
            ))
        }
        other => Err(AppError::with_message(
            ErrorCode::ReportRangeInvalid,
            format!("Unknown time_range: {other}"),
        )),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/reports/dashboard - 主看板
pub async fn dashboard(State(state): State<ServerState>) -> AppResult<Json<DashboardResponse>> {
    let pool = &state.pool;

    let restaurants: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM restaurant")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    let menu_items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_item")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customer_order")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let thirty_days_ago = now_millis() - 30 * 24 * 60 * 60 * 1000;

    let recent_orders_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM customer_order WHERE created_at >= ?")
            .bind(thirty_days_ago)
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

    let recent_revenue: f64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(total_price), 0.0) FROM customer_order WHERE created_at >= ? AND status != 'CANCELLED'",
    )
    .bind(thirty_days_ago)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::database(e.to_string()))?;

    let orders_by_status: Vec<(String, i64)> = sqlx::query_as(
        "SELECT status, COUNT(*) FROM customer_order GROUP BY status ORDER BY status",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::database(e.to_string()))?;

    let top_restaurants: Vec<(i64, String, i64)> = sqlx::query_as(
        "SELECT r.id, r.name, COUNT(o.id) AS orders_count \
         FROM restaurant r \
         LEFT JOIN customer_order o ON o.restaurant_id = r.id \
         GROUP BY r.id, r.name \
         ORDER BY orders_count DESC, r.name \
         LIMIT 5",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::database(e.to_string()))?;

    let popular_items: Vec<(i64, String, i64)> = sqlx::query_as(
        "SELECT m.id, m.name, COALESCE(SUM(oi.quantity), 0) AS total_quantity \
         FROM menu_item m \
         LEFT JOIN order_item oi ON oi.menu_item_id = m.id \
         GROUP BY m.id, m.name \
         ORDER BY total_quantity DESC, m.name \
         LIMIT 5",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::database(e.to_string()))?;

    let recent_orders = crate::db::repository::order::find_all(pool, None, None, 5, 0).await?;

    Ok(Json(DashboardResponse {
        totals: DashboardTotals {
            restaurants,
            menu_items,
            users,
            orders,
        },
        recent_orders_count,
        recent_revenue: round_money(recent_revenue),
        orders_by_status: orders_by_status
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect(),
        top_restaurants: top_restaurants
            .into_iter()
            .map(|(restaurant_id, name, orders_count)| TopRestaurant {
                restaurant_id,
                name,
                orders_count,
            })
            .collect(),
        popular_items: popular_items
            .into_iter()
            .map(|(menu_item_id, name, total_quantity)| PopularItem {
                menu_item_id,
                name,
                total_quantity,
            })
            .collect(),
        recent_orders,
    }))
}

/// GET /api/reports/sales - 销售报表 (分页)
pub async fn sales_report(
    State(state): State<ServerState>,
    Query(query): Query<SalesReportQuery>,
) -> AppResult<Json<SalesReportResponse>> {
    let tz = state.config.timezone;
    let (start, end) = resolve_time_range(&query, tz)?;
    let pool = &state.pool;

    let mut filter = String::from("WHERE o.created_at >= ? AND o.created_at < ?");
    if query.restaurant_id.is_some() {
        filter.push_str(" AND o.restaurant_id = ?");
    }

    let count_sql = format!("SELECT COUNT(*) FROM customer_order o {filter}");
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(start).bind(end);
    if let Some(rid) = query.restaurant_id {
        count_query = count_query.bind(rid);
    }
    let total_count = count_query
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let revenue_sql = format!(
        "SELECT COALESCE(SUM(o.total_price), 0.0) FROM customer_order o {filter} AND o.status != 'CANCELLED'"
    );
    let mut revenue_query = sqlx::query_scalar::<_, f64>(&revenue_sql).bind(start).bind(end);
    if let Some(rid) = query.restaurant_id {
        revenue_query = revenue_query.bind(rid);
    }
    let total_revenue = revenue_query
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let page = query.page.max(1);
    let offset = (page - 1) * PAGE_SIZE;

    let rows_sql = format!(
        "SELECT o.id, o.receipt_number, r.name, o.created_at, o.total_price, o.status \
         FROM customer_order o \
         JOIN restaurant r ON r.id = o.restaurant_id \
         {filter} \
         ORDER BY o.created_at DESC \
         LIMIT ? OFFSET ?"
    );
    let mut rows_query =
        sqlx::query_as::<_, (i64, String, String, i64, f64, String)>(&rows_sql)
            .bind(start)
            .bind(end);
    if let Some(rid) = query.restaurant_id {
        rows_query = rows_query.bind(rid);
    }
    let rows = rows_query
        .bind(PAGE_SIZE)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let total_pages = if total_count == 0 {
        0
    } else {
        ((total_count as i32) + PAGE_SIZE - 1) / PAGE_SIZE
    };

    Ok(Json(SalesReportResponse {
        items: rows
            .into_iter()
            .map(
                |(order_id, receipt_number, restaurant_name, created_at, total, status)| {
                    SalesReportItem {
                        order_id,
                        receipt_number,
                        restaurant_name,
                        created_at,
                        total,
                        status,
                    }
                },
            )
            .collect(),
        total_count,
        total_revenue: round_money(total_revenue),
        page,
        page_size: PAGE_SIZE,
        total_pages,
    }))
}

/// GET /api/reports/low-stock - 低库存清单
pub async fn low_stock(
    State(state): State<ServerState>,
    Query(query): Query<LowStockQuery>,
) -> AppResult<Json<Vec<StockItemDetail>>> {
    if !query.threshold.is_finite() || query.threshold < 0.0 {
        return Err(AppError::validation(format!(
            "threshold must be non-negative, got {}",
            query.threshold
        )));
    }

    let items = stock::find_low_stock(&state.pool, query.threshold, query.restaurant_id).await?;
    Ok(Json(items))
}
