use shared::error::{AppError, ErrorCode};
use shared::models::{ItemStatus, KitchenOrderStatus};
use thiserror::Error;

/// Kitchen store errors
#[derive(Debug, Error)]
pub enum KitchenError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Item {item_id} not found on order {order_id}")]
    ItemNotFound { order_id: String, item_id: String },

    #[error("Order cannot move from {from} to {to}")]
    InvalidTransition {
        from: KitchenOrderStatus,
        to: KitchenOrderStatus,
    },

    #[error("Item cannot move from {from} to {to}")]
    InvalidItemTransition { from: ItemStatus, to: ItemStatus },

    #[error("Order is closed ({status}): {order_id}")]
    OrderClosed {
        order_id: String,
        status: KitchenOrderStatus,
    },

    #[error("Staff not found: {0}")]
    StaffNotFound(String),

    #[error("Staff member is not on duty: {0}")]
    StaffUnavailable(String),

    #[error("Station not found: {0}")]
    StationNotFound(String),

    #[error("Notification not found: {0}")]
    NotificationNotFound(String),

    #[error("Order has no items")]
    EmptyOrder,

    #[error(transparent)]
    Invalid(#[from] AppError),
}

impl From<KitchenError> for AppError {
    fn from(err: KitchenError) -> Self {
        match err {
            KitchenError::OrderNotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, format!("Order not found: {}", id))
                    .with_detail("order_id", id)
            }
            KitchenError::ItemNotFound { order_id, item_id } => AppError::with_message(
                ErrorCode::OrderItemNotFound,
                format!("Item {} not found on order {}", item_id, order_id),
            )
            .with_detail("order_id", order_id)
            .with_detail("item_id", item_id),
            KitchenError::InvalidTransition { from, to } => {
                AppError::invalid_transition("Order", from, to)
            }
            KitchenError::InvalidItemTransition { from, to } => {
                AppError::invalid_transition("Item", from, to)
            }
            KitchenError::OrderClosed { order_id, status } => AppError::with_message(
                ErrorCode::OrderClosed,
                format!("Order {} is already {}", order_id, status),
            )
            .with_detail("order_id", order_id)
            .with_detail("status", status.to_string()),
            KitchenError::StaffNotFound(id) => {
                AppError::with_message(ErrorCode::StaffNotFound, format!("Staff not found: {}", id))
                    .with_detail("staff_id", id)
            }
            KitchenError::StaffUnavailable(id) => AppError::with_message(
                ErrorCode::StaffUnavailable,
                format!("Staff member is not on duty: {}", id),
            )
            .with_detail("staff_id", id),
            KitchenError::StationNotFound(id) => AppError::with_message(
                ErrorCode::StationNotFound,
                format!("Station not found: {}", id),
            )
            .with_detail("station_id", id),
            KitchenError::NotificationNotFound(id) => AppError::with_message(
                ErrorCode::NotificationNotFound,
                format!("Notification not found: {}", id),
            )
            .with_detail("notification_id", id),
            KitchenError::EmptyOrder => AppError::new(ErrorCode::OrderEmpty),
            KitchenError::Invalid(e) => e,
        }
    }
}

pub type KitchenResult<T> = Result<T, KitchenError>;
