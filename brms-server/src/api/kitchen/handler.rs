//! Kitchen API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use serde::Deserialize;
use shared::models::{
    ItemStatus, KitchenNotification, KitchenOrder, KitchenOrderCreate, KitchenOrderStatus,
    KitchenStaff, KitchenStation, KitchenStats, NotificationCreate, OrderPriority, StaffStatus,
    StationStatus,
};
use shared::util::now_millis;
use std::convert::Infallible;
use tokio::sync::broadcast::error::RecvError;

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<KitchenOrderStatus>,
    pub priority: Option<OrderPriority>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: KitchenOrderStatus,
}

#[derive(Debug, Deserialize)]
pub struct ItemStatusUpdate {
    pub status: ItemStatus,
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub staff_id: String,
}

#[derive(Debug, Deserialize)]
pub struct StaffStatusUpdate {
    pub status: StaffStatus,
}

#[derive(Debug, Deserialize)]
pub struct StationStatusUpdate {
    pub status: StationStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread_only: bool,
}

// ========== Orders ==========

/// GET /api/kitchen/orders - 订单列表 (按状态/优先级过滤)
pub async fn list_orders(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> Json<ApiResponse<Vec<KitchenOrder>>> {
    Json(ok(state.kitchen.list_orders(query.status, query.priority)))
}

/// POST /api/kitchen/orders - 新建厨房订单
pub async fn create_order(
    State(state): State<ServerState>,
    Json(payload): Json<KitchenOrderCreate>,
) -> AppResult<Json<ApiResponse<KitchenOrder>>> {
    let order = state.kitchen.add_order(payload)?;
    Ok(Json(ok_with_message("Order created", order)))
}

/// GET /api/kitchen/orders/{id}
pub async fn get_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<KitchenOrder>>> {
    Ok(Json(ok(state.kitchen.get_order(&id)?)))
}

/// PUT /api/kitchen/orders/{id}/status - 推进订单状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<ApiResponse<KitchenOrder>>> {
    Ok(Json(ok(state.kitchen.update_order_status(&id, payload.status)?)))
}

/// PUT /api/kitchen/orders/{id}/status/override - 经理强制改状态
pub async fn override_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<ApiResponse<KitchenOrder>>> {
    tracing::warn!(order_id = %id, status = %payload.status, "Kitchen order status overridden");
    Ok(Json(ok(state.kitchen.override_order_status(&id, payload.status)?)))
}

/// PUT /api/kitchen/orders/{id}/items/{item_id}/status
pub async fn update_item_status(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
    Json(payload): Json<ItemStatusUpdate>,
) -> AppResult<Json<ApiResponse<KitchenOrder>>> {
    Ok(Json(ok(state
        .kitchen
        .update_item_status(&id, &item_id, payload.status)?)))
}

/// PUT /api/kitchen/orders/{id}/assign - 分配给厨师
pub async fn assign_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AssignRequest>,
) -> AppResult<Json<ApiResponse<KitchenOrder>>> {
    Ok(Json(ok(state.kitchen.assign_order(&id, &payload.staff_id)?)))
}

/// GET /api/kitchen/queue - 出餐队列
pub async fn queue(State(state): State<ServerState>) -> Json<ApiResponse<Vec<KitchenOrder>>> {
    Json(ok(state.kitchen.queue()))
}

/// GET /api/kitchen/overdue - 超时订单
pub async fn overdue(State(state): State<ServerState>) -> Json<ApiResponse<Vec<KitchenOrder>>> {
    Json(ok(state.kitchen.overdue_orders(now_millis())))
}

/// GET /api/kitchen/stats - 厨房指标
pub async fn stats(State(state): State<ServerState>) -> Json<ApiResponse<KitchenStats>> {
    Json(ok(state.kitchen.stats(now_millis())))
}

// ========== Notifications ==========

/// GET /api/kitchen/notifications
pub async fn list_notifications(
    State(state): State<ServerState>,
    Query(query): Query<NotificationQuery>,
) -> Json<ApiResponse<Vec<KitchenNotification>>> {
    Json(ok(state.kitchen.notifications(query.unread_only)))
}

/// POST /api/kitchen/notifications
pub async fn add_notification(
    State(state): State<ServerState>,
    Json(payload): Json<NotificationCreate>,
) -> AppResult<Json<ApiResponse<KitchenNotification>>> {
    Ok(Json(ok(state.kitchen.add_notification(payload)?)))
}

/// DELETE /api/kitchen/notifications - 清空通知
pub async fn clear_notifications(State(state): State<ServerState>) -> Json<ApiResponse<()>> {
    state.kitchen.clear_notifications();
    Json(ApiResponse::ok())
}

/// PUT /api/kitchen/notifications/{id}/read
pub async fn mark_read(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<KitchenNotification>>> {
    Ok(Json(ok(state.kitchen.mark_notification_as_read(&id)?)))
}

/// PUT /api/kitchen/notifications/read-all - 返回标记数量
pub async fn mark_all_read(State(state): State<ServerState>) -> Json<ApiResponse<usize>> {
    Json(ok(state.kitchen.mark_all_notifications_as_read()))
}

// ========== Staff & stations ==========

/// GET /api/kitchen/staff
pub async fn list_staff(State(state): State<ServerState>) -> Json<ApiResponse<Vec<KitchenStaff>>> {
    Json(ok(state.kitchen.staff()))
}

/// PUT /api/kitchen/staff/{id}/status
pub async fn update_staff_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StaffStatusUpdate>,
) -> AppResult<Json<ApiResponse<KitchenStaff>>> {
    Ok(Json(ok(state.kitchen.update_staff_status(&id, payload.status)?)))
}

/// GET /api/kitchen/stations
pub async fn list_stations(
    State(state): State<ServerState>,
) -> Json<ApiResponse<Vec<KitchenStation>>> {
    Json(ok(state.kitchen.stations()))
}

/// PUT /api/kitchen/stations/{id}/status
pub async fn update_station_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StationStatusUpdate>,
) -> AppResult<Json<ApiResponse<KitchenStation>>> {
    Ok(Json(ok(state.kitchen.update_station_status(&id, payload.status)?)))
}

// ========== Change feed ==========

/// GET /api/kitchen/events - SSE 推送厨房变更
///
/// 慢客户端会丢事件 (lagged)，连接保持；服务关闭时流结束。
pub async fn events(
    State(state): State<ServerState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.kitchen.subscribe();
    let shutdown = state.shutdown.clone();

    let stream = futures::stream::unfold((rx, shutdown), |(mut rx, shutdown)| async move {
        loop {
            let received = tokio::select! {
                _ = shutdown.cancelled() => return None,
                received = rx.recv() => received,
            };
            match received {
                Ok(event) => {
                    let sse = match Event::default().event(event.name()).json_data(&event) {
                        Ok(sse) => sse,
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to encode kitchen event");
                            continue;
                        }
                    };
                    return Some((Ok(sse), (rx, shutdown)));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "SSE client lagged behind kitchen events");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
