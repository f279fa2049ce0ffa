//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`roles`] - 角色管理接口
//! - [`users`] - 账号管理接口
//! - [`employees`] - 员工档案接口
//! - [`restaurants`] - 门店管理接口
//! - [`categories`] - 分类管理接口
//! - [`menu_items`] - 菜品和配方管理接口
//! - [`ingredients`] - 原料管理接口
//! - [`stock`] - 库存管理接口
//! - [`orders`] - 订单管理接口
//! - [`reports`] - 报表接口

pub mod auth;
pub mod health;

// Accounts
pub mod employees;
pub mod roles;
pub mod users;

// Data models API
pub mod categories;
pub mod ingredients;
pub mod menu_items;
pub mod orders;
pub mod restaurants;
pub mod stock;

// Reporting
pub mod reports;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};
