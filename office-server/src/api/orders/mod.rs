//! Order API 模块
//!
//! 订单录入、状态流转、配料扣减和小票。

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/receipt", get(handler::receipt));

    let manage_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .route("/{id}/items", axum::routing::post(handler::add_item))
        .route(
            "/{id}/items/{item_id}",
            axum::routing::put(handler::update_item).delete(handler::remove_item),
        )
        .route("/{id}/status", axum::routing::put(handler::update_status))
        .route(
            "/{id}/process-ingredients",
            axum::routing::post(handler::process_ingredients),
        )
        .layer(middleware::from_fn(require_permission("orders:manage")));

    read_routes.merge(manage_routes)
}
