//! Office Server - 连锁餐厅管理系统后台节点
//!
//! # 架构概述
//!
//! 本模块是后台服务的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SQLite 存储 (sqlx, WAL)
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **库存扣减** (`inventory`): 订单出单时的配料扣减引擎
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! office-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、权限
//! ├── db/            # 数据库层 (repository)
//! ├── inventory/     # 库存扣减引擎
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod inventory;
pub mod utils;

// Re-export 公共类型
pub use crate::auth::{CurrentUser, JwtService};
pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::{AppError, AppResult};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   ____  _____________________
  / __ \/ __/ __/  _/ ____/ __/
 / / / / /_/ /_  / // /   / _/
/ /_/ / __/ __/_/ // /___/ /__
\____/_/ /_/ /___/\____/____/
   S E R V E R
    "#
    );
}
