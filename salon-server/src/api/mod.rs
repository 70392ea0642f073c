//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`bookings`] - 预约管理接口
//! - [`products`] - 商品管理接口 (含图片上传)

pub mod convert;
pub mod extract;

pub mod bookings;
pub mod health;
pub mod products;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
