//! 认证模块
//!
//! - [`JwtService`] - JWT 令牌生成和验证
//! - [`CurrentUser`] - 当前用户上下文 (中间件注入)
//! - [`middleware`] - 认证和权限中间件
//! - [`permissions`] - 权限目录

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth, require_permission};
