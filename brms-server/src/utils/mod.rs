//! 工具模块 - 通用工具函数和类型
//!
//! - [`AppError`] / [`ApiResponse`] - 统一错误与响应 (from shared::error)
//! - [`logger`] - 日志初始化与清理
//! - [`validation`] - 输入校验

pub mod logger;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// Wrap data in a success response
pub fn ok<T>(data: T) -> ApiResponse<T> {
    ApiResponse::success(data)
}

/// Wrap data in a success response with a custom message
pub fn ok_with_message<T>(message: impl Into<String>, data: T) -> ApiResponse<T> {
    ApiResponse::success_with_message(message, data)
}
