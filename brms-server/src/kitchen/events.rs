//! Kitchen change feed
//!
//! Every store mutation publishes one [`KitchenEvent`]. Subscribers are
//! the SSE endpoint and the event logger task; slow receivers lag and
//! drop events, they never block the store.

use serde::Serialize;
use shared::models::{KitchenNotification, KitchenOrder};

/// Broadcast channel capacity
pub const EVENT_CHANNEL_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum KitchenEvent {
    OrderCreated(KitchenOrder),
    OrderUpdated(KitchenOrder),
    ItemUpdated {
        order_id: String,
        item_id: String,
        order: KitchenOrder,
    },
    NotificationAdded(KitchenNotification),
    NotificationsRead {
        /// `None` means every notification
        id: Option<String>,
    },
    NotificationsCleared,
}

impl KitchenEvent {
    /// SSE event name
    pub fn name(&self) -> &'static str {
        match self {
            Self::OrderCreated(_) => "order_created",
            Self::OrderUpdated(_) => "order_updated",
            Self::ItemUpdated { .. } => "item_updated",
            Self::NotificationAdded(_) => "notification_added",
            Self::NotificationsRead { .. } => "notifications_read",
            Self::NotificationsCleared => "notifications_cleared",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_tag() {
        let json = serde_json::to_value(KitchenEvent::NotificationsCleared).unwrap();
        assert_eq!(json["event"], "notifications_cleared");

        let json = serde_json::to_value(KitchenEvent::NotificationsRead {
            id: Some("ntf-1".into()),
        })
        .unwrap();
        assert_eq!(json["event"], "notifications_read");
        assert_eq!(json["payload"]["id"], "ntf-1");
    }
}
