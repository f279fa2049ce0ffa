//! Report API 模块

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_permission;
use crate::core::ServerState;

/// Report router - 需要 reports:view
pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/reports", routes())
        .layer(middleware::from_fn(require_permission("reports:view")))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/dashboard", get(handler::dashboard))
        .route("/sales", get(handler::sales_report))
        .route("/low-stock", get(handler::low_stock))
}
