//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 存活检查 + 运行时长 |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{ApiResponse, ok};

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    /// 实例 epoch
    epoch: String,
    uptime_seconds: u64,
    active_kitchen_orders: usize,
}

/// GET /health - 健康检查
pub async fn health(State(state): State<ServerState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        epoch: state.epoch.clone(),
        uptime_seconds: state.uptime_seconds(),
        active_kitchen_orders: state.kitchen.queue().len(),
    }))
}
