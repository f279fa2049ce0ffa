//! Role API 模块

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Role router - 仅管理员可用 (users:manage)
pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/roles", routes())
        .route(
            "/api/permissions",
            get(handler::get_all_permissions).layer(middleware::from_fn(require_admin)),
        )
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_admin))
}
