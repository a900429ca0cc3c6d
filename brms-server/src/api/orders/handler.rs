//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{CustomerOrder, CustomerOrderStatus, OrderQuery};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: CustomerOrderStatus,
}

/// GET /api/orders?q=&status=&customer_email=&sort=&dir= - 订单搜索
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<OrderQuery>,
) -> Json<ApiResponse<Vec<CustomerOrder>>> {
    Json(ok(state.orders.search(&query)))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CustomerOrder>>> {
    Ok(Json(ok(state.orders.get(&id)?)))
}

/// PUT /api/orders/{id}/status - 经理修改订单状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<ApiResponse<CustomerOrder>>> {
    Ok(Json(ok(state.orders.update_status(&id, payload.status)?)))
}

/// GET /api/orders/history/{email} - 顾客历史订单
pub async fn history(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> Json<ApiResponse<Vec<CustomerOrder>>> {
    Json(ok(state.orders.history_for(&email)))
}
