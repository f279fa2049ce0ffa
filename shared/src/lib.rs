//! Shared types for the back-office server
//!
//! 连锁餐厅后台的共享类型库：
//!
//! - [`error`] - 统一错误码和 API 响应结构
//! - [`models`] - 数据模型和 Create/Update DTO
//! - [`money`] - 金额计算工具 (rust_decimal)
//! - [`util`] - 时间戳和 ID 生成

pub mod error;
pub mod models;
pub mod money;
pub mod util;

// Re-export the error types used across every crate
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
