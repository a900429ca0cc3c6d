//! Kitchen Models
//!
//! Kitchen orders are the only records with a lifecycle. Every other
//! dashboard model is plain data.
//!
//! ```text
//! pending ──► preparing ──► ready ──► served
//!    │            │           │
//!    └────────────┴───────────┴──► cancelled
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// 订单类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    #[default]
    DineIn,
    Takeaway,
    Delivery,
}

/// 出餐优先级
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderPriority {
    #[default]
    Normal,
    Rush,
    Urgent,
}

impl OrderPriority {
    /// Queue rank, lower is served first
    pub fn rank(&self) -> u8 {
        match self {
            Self::Urgent => 0,
            Self::Rush => 1,
            Self::Normal => 2,
        }
    }
}

impl fmt::Display for OrderPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Rush => write!(f, "rush"),
            Self::Urgent => write!(f, "urgent"),
        }
    }
}

/// 厨房订单状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum KitchenOrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Served,
    Cancelled,
}

impl KitchenOrderStatus {
    /// Served and cancelled orders never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Served | Self::Cancelled)
    }

    /// Orders still on the kitchen board
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Preparing | Self::Ready)
    }

    /// Forward-only transitions, one step at a time, cancel from any open state.
    ///
    /// A status never transitions to itself; callers treat that as a no-op.
    pub fn can_transition_to(&self, next: KitchenOrderStatus) -> bool {
        use KitchenOrderStatus::*;
        matches!(
            (self, next),
            (Pending, Preparing)
                | (Preparing, Ready)
                | (Ready, Served)
                | (Pending | Preparing | Ready, Cancelled)
        )
    }
}

impl fmt::Display for KitchenOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Preparing => write!(f, "preparing"),
            Self::Ready => write!(f, "ready"),
            Self::Served => write!(f, "served"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// 菜品状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
}

impl ItemStatus {
    pub fn can_transition_to(&self, next: ItemStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Preparing) | (Self::Preparing, Self::Ready)
        )
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Preparing => write!(f, "preparing"),
            Self::Ready => write!(f, "ready"),
        }
    }
}

/// 出品档口
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Station {
    Hot,
    Cold,
    Grill,
    Pastry,
    Beverages,
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hot => write!(f, "hot"),
            Self::Cold => write!(f, "cold"),
            Self::Grill => write!(f, "grill"),
            Self::Pastry => write!(f, "pastry"),
            Self::Beverages => write!(f, "beverages"),
        }
    }
}

/// 支付状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
}

/// 厨房订单菜品
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KitchenOrderItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub category: String,
    /// Minutes
    pub preparation_time: u32,
    pub status: ItemStatus,
    pub station: Station,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// 厨房订单
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KitchenOrder {
    pub id: String,
    pub order_number: String,
    pub customer_name: String,
    pub order_type: OrderType,
    pub priority: OrderPriority,
    pub status: KitchenOrderStatus,
    pub items: Vec<KitchenOrderItem>,
    /// Minutes
    pub estimated_prep_time: u32,
    /// Epoch millis
    pub created_at: i64,
    /// Epoch millis
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl KitchenOrder {
    /// Whole minutes since the order reached the kitchen
    pub fn elapsed_minutes(&self, now: i64) -> i64 {
        crate::util::elapsed_minutes(self.created_at, now)
    }

    /// Derived on every read, never stored
    pub fn is_overdue(&self, now: i64) -> bool {
        matches!(
            self.status,
            KitchenOrderStatus::Pending | KitchenOrderStatus::Preparing
        ) && self.elapsed_minutes(now) > i64::from(self.estimated_prep_time)
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut KitchenOrderItem> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }
}

/// Create kitchen order item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenOrderItemCreate {
    pub name: String,
    pub quantity: u32,
    pub category: String,
    pub preparation_time: u32,
    pub station: Station,
    pub notes: Option<String>,
}

/// Create kitchen order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenOrderCreate {
    pub customer_name: String,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub priority: OrderPriority,
    pub items: Vec<KitchenOrderItemCreate>,
    /// Defaults to the slowest item's preparation time
    pub estimated_prep_time: Option<u32>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub table_number: Option<String>,
    pub notes: Option<String>,
}

/// 通知类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    OrderReady,
    OrderOverdue,
    NewOrder,
    StationAlert,
    System,
}

/// 通知优先级
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// 厨房通知
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KitchenNotification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub priority: NotificationPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_id: Option<String>,
    pub created_at: i64,
}

/// Create notification payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationCreate {
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub priority: NotificationPriority,
    pub order_id: Option<String>,
    pub station_id: Option<String>,
}

/// 厨房岗位
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    HeadChef,
    Chef,
    LineCook,
    PrepCook,
}

/// 员工状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StaffStatus {
    #[default]
    Active,
    OnBreak,
    OffDuty,
}

/// 厨房员工
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KitchenStaff {
    pub id: String,
    pub name: String,
    pub role: StaffRole,
    pub station: Station,
    pub status: StaffStatus,
    /// Derived: open orders assigned to this member
    #[serde(default)]
    pub active_orders: usize,
}

/// 档口状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StationStatus {
    #[default]
    Active,
    Idle,
    Maintenance,
}

/// 厨房档口
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KitchenStation {
    pub id: String,
    pub name: String,
    pub kind: Station,
    pub status: StationStatus,
    pub capacity: u32,
    /// Derived: unfinished item quantity routed to this station
    #[serde(default)]
    pub current_load: u32,
}

/// Kitchen metrics, recomputed on every request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KitchenStats {
    pub total_orders: usize,
    pub pending_orders: usize,
    pub preparing_orders: usize,
    pub ready_orders: usize,
    pub served_orders: usize,
    pub cancelled_orders: usize,
    pub active_orders: usize,
    pub overdue_orders: usize,
    /// Average minutes from creation to service, served orders only
    pub average_prep_time: f64,
    pub unread_notifications: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_transitions_forward_only() {
        use KitchenOrderStatus::*;
        assert!(Pending.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Served));

        assert!(!Pending.can_transition_to(Served));
        assert!(!Served.can_transition_to(Pending));
        assert!(!Ready.can_transition_to(Preparing));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_cancel_only_from_open_states() {
        use KitchenOrderStatus::*;
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Ready.can_transition_to(Cancelled));
        assert!(!Served.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(Served.is_terminal() && Cancelled.is_terminal());
    }

    #[test]
    fn test_item_transitions() {
        assert!(ItemStatus::Pending.can_transition_to(ItemStatus::Preparing));
        assert!(ItemStatus::Preparing.can_transition_to(ItemStatus::Ready));
        assert!(!ItemStatus::Ready.can_transition_to(ItemStatus::Pending));
        assert!(!ItemStatus::Pending.can_transition_to(ItemStatus::Ready));
    }

    #[test]
    fn test_priority_rank() {
        let mut p = vec![
            OrderPriority::Normal,
            OrderPriority::Urgent,
            OrderPriority::Rush,
        ];
        p.sort_by_key(|p| p.rank());
        assert_eq!(
            p,
            vec![
                OrderPriority::Urgent,
                OrderPriority::Rush,
                OrderPriority::Normal
            ]
        );
    }

    #[test]
    fn test_notification_type_field_name() {
        let n = KitchenNotification {
            id: "ntf-1".into(),
            kind: NotificationType::OrderReady,
            title: "Order Ready".into(),
            message: "K-1001 is ready".into(),
            read: false,
            priority: NotificationPriority::High,
            order_id: Some("ko-1".into()),
            station_id: None,
            created_at: 0,
        };
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["type"], "order_ready");
        assert!(json.get("station_id").is_none());
    }
}
