//! KitchenStore - authoritative in-memory kitchen board
//!
//! Holds kitchen orders, notifications, staff and stations behind one
//! `parking_lot::RwLock`. Mutations take the write lock, release it, then
//! publish a [`KitchenEvent`].
//!
//! # Order lifecycle
//!
//! ```text
//! update_order_status(id, status)
//!     ├─ 1. Find order (OrderNotFound, list untouched)
//!     ├─ 2. Same status → no-op, return order
//!     ├─ 3. can_transition_to? (InvalidTransition otherwise)
//!     ├─ 4. Apply status + sync item statuses + updated_at
//!     ├─ 5. Ready → push order_ready notification
//!     └─ 6. Publish OrderUpdated (+ NotificationAdded)
//! ```
//!
//! `override_order_status` skips steps 2 and 3 for manager corrections: it
//! always writes, so repeating `ready` notifies again.

mod error;
mod events;

#[cfg(test)]
mod tests;

pub use error::*;
pub use events::*;

use parking_lot::RwLock;
use shared::models::{
    ItemStatus, KitchenNotification, KitchenOrder, KitchenOrderCreate, KitchenOrderItem,
    KitchenOrderStatus, KitchenStaff, KitchenStation, KitchenStats, NotificationCreate,
    NotificationPriority, NotificationType, OrderPriority, StaffStatus, StationStatus,
};
use shared::util::{elapsed_minutes, now_millis, prefixed_id};
use std::collections::HashSet;
use tokio::sync::broadcast;

use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_quantity,
    validate_required_text,
};

/// Notifications kept in memory, oldest dropped first
pub const MAX_NOTIFICATIONS: usize = 500;

/// Kitchen order numbers start after this value (`K-1001`, `K-1002`, ...)
const ORDER_NUMBER_BASE: u32 = 1000;

#[derive(Debug, Default)]
struct KitchenInner {
    orders: Vec<KitchenOrder>,
    staff: Vec<KitchenStaff>,
    stations: Vec<KitchenStation>,
    /// Newest first
    notifications: Vec<KitchenNotification>,
    /// Orders already reported overdue
    overdue_notified: HashSet<String>,
    order_seq: u32,
}

impl KitchenInner {
    fn find_order(&self, order_id: &str) -> KitchenResult<&KitchenOrder> {
        self.orders
            .iter()
            .find(|o| o.id == order_id)
            .ok_or_else(|| KitchenError::OrderNotFound(order_id.to_string()))
    }

    fn find_order_mut(&mut self, order_id: &str) -> KitchenResult<&mut KitchenOrder> {
        self.orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| KitchenError::OrderNotFound(order_id.to_string()))
    }

    fn push_notification(&mut self, notification: KitchenNotification) {
        self.notifications.insert(0, notification);
        self.notifications.truncate(MAX_NOTIFICATIONS);
    }

    fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    fn staff_view(&self, member: &KitchenStaff) -> KitchenStaff {
        let active_orders = self
            .orders
            .iter()
            .filter(|o| !o.status.is_terminal() && o.assigned_to.as_deref() == Some(&member.id))
            .count();
        KitchenStaff {
            active_orders,
            ..member.clone()
        }
    }

    fn station_view(&self, station: &KitchenStation) -> KitchenStation {
        let current_load = self
            .orders
            .iter()
            .filter(|o| o.status.is_active())
            .flat_map(|o| o.items.iter())
            .filter(|i| i.station == station.kind && i.status != ItemStatus::Ready)
            .map(|i| i.quantity)
            .sum();
        KitchenStation {
            current_load,
            ..station.clone()
        }
    }
}

/// Bring item statuses in line with the order status
fn sync_items(order: &mut KitchenOrder) {
    match order.status {
        KitchenOrderStatus::Preparing => {
            for item in order.items.iter_mut() {
                if item.status == ItemStatus::Pending {
                    item.status = ItemStatus::Preparing;
                }
            }
        }
        KitchenOrderStatus::Ready | KitchenOrderStatus::Served => {
            for item in order.items.iter_mut() {
                item.status = ItemStatus::Ready;
            }
        }
        KitchenOrderStatus::Pending | KitchenOrderStatus::Cancelled => {}
    }
}

fn ready_notification(order: &KitchenOrder, now: i64) -> KitchenNotification {
    KitchenNotification {
        id: prefixed_id("ntf"),
        kind: NotificationType::OrderReady,
        title: "Order Ready".to_string(),
        message: format!(
            "Order {} for {} is ready for pickup",
            order.order_number, order.customer_name
        ),
        read: false,
        priority: NotificationPriority::High,
        order_id: Some(order.id.clone()),
        station_id: None,
        created_at: now,
    }
}

/// In-memory kitchen board shared by all handlers
#[derive(Debug)]
pub struct KitchenStore {
    inner: RwLock<KitchenInner>,
    event_tx: broadcast::Sender<KitchenEvent>,
}

impl Default for KitchenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KitchenStore {
    /// Empty kitchen board
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: RwLock::new(KitchenInner::default()),
            event_tx,
        }
    }

    /// Kitchen board preloaded with existing data
    pub fn with_data(
        orders: Vec<KitchenOrder>,
        staff: Vec<KitchenStaff>,
        stations: Vec<KitchenStation>,
        mut notifications: Vec<KitchenNotification>,
    ) -> Self {
        let store = Self::new();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notifications.truncate(MAX_NOTIFICATIONS);
        {
            let mut inner = store.inner.write();
            inner.order_seq = orders.len() as u32;
            inner.orders = orders;
            inner.staff = staff;
            inner.stations = stations;
            inner.notifications = notifications;
        }
        store
    }

    /// Subscribe to the change feed
    pub fn subscribe(&self) -> broadcast::Receiver<KitchenEvent> {
        self.event_tx.subscribe()
    }

    fn publish(&self, event: KitchenEvent) {
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }

    // ========== Orders: queries ==========

    /// All orders in board order
    pub fn orders(&self) -> Vec<KitchenOrder> {
        self.inner.read().orders.clone()
    }

    pub fn get_order(&self, order_id: &str) -> KitchenResult<KitchenOrder> {
        self.inner.read().find_order(order_id).cloned()
    }

    /// Orders with the given status, original relative order kept
    pub fn orders_by_status(&self, status: KitchenOrderStatus) -> Vec<KitchenOrder> {
        self.list_orders(Some(status), None)
    }

    /// Orders with the given priority, original relative order kept
    pub fn orders_by_priority(&self, priority: OrderPriority) -> Vec<KitchenOrder> {
        self.list_orders(None, Some(priority))
    }

    /// Orders matching both optional filters
    pub fn list_orders(
        &self,
        status: Option<KitchenOrderStatus>,
        priority: Option<OrderPriority>,
    ) -> Vec<KitchenOrder> {
        self.inner
            .read()
            .orders
            .iter()
            .filter(|o| status.is_none_or(|s| o.status == s))
            .filter(|o| priority.is_none_or(|p| o.priority == p))
            .cloned()
            .collect()
    }

    /// Active orders, urgent first, then oldest first
    pub fn queue(&self) -> Vec<KitchenOrder> {
        let mut queue: Vec<KitchenOrder> = self
            .inner
            .read()
            .orders
            .iter()
            .filter(|o| o.status.is_active())
            .cloned()
            .collect();
        queue.sort_by_key(|o| (o.priority.rank(), o.created_at));
        queue
    }

    pub fn overdue_orders(&self, now: i64) -> Vec<KitchenOrder> {
        self.inner
            .read()
            .orders
            .iter()
            .filter(|o| o.is_overdue(now))
            .cloned()
            .collect()
    }

    // ========== Orders: mutations ==========

    /// Append a new pending order and announce it
    pub fn add_order(&self, new_order: KitchenOrderCreate) -> KitchenResult<KitchenOrder> {
        validate_required_text(&new_order.customer_name, "customer_name", MAX_NAME_LEN)?;
        validate_optional_text(&new_order.table_number, "table_number", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&new_order.notes, "notes", MAX_NOTE_LEN)?;
        if new_order.items.is_empty() {
            return Err(KitchenError::EmptyOrder);
        }
        for item in &new_order.items {
            validate_required_text(&item.name, "items.name", MAX_NAME_LEN)?;
            validate_optional_text(&item.notes, "items.notes", MAX_NOTE_LEN)?;
            validate_quantity(item.quantity, "items.quantity")?;
        }

        let now = now_millis();
        let id = prefixed_id("ko");
        let items: Vec<KitchenOrderItem> = new_order
            .items
            .into_iter()
            .enumerate()
            .map(|(n, item)| KitchenOrderItem {
                id: format!("{}-i{}", id, n + 1),
                name: item.name,
                quantity: item.quantity,
                category: item.category,
                preparation_time: item.preparation_time,
                status: ItemStatus::Pending,
                station: item.station,
                notes: item.notes,
            })
            .collect();
        let estimated_prep_time = new_order
            .estimated_prep_time
            .unwrap_or_else(|| items.iter().map(|i| i.preparation_time).max().unwrap_or(0));

        let (order, notification) = {
            let mut inner = self.inner.write();
            inner.order_seq += 1;
            let order = KitchenOrder {
                id,
                order_number: format!("K-{}", ORDER_NUMBER_BASE + inner.order_seq),
                customer_name: new_order.customer_name,
                order_type: new_order.order_type,
                priority: new_order.priority,
                status: KitchenOrderStatus::Pending,
                items,
                estimated_prep_time,
                created_at: now,
                updated_at: now,
                assigned_to: None,
                payment_status: new_order.payment_status,
                table_number: new_order.table_number,
                notes: new_order.notes,
            };
            let notification = KitchenNotification {
                id: prefixed_id("ntf"),
                kind: NotificationType::NewOrder,
                title: "New Order".to_string(),
                message: format!(
                    "Order {} received ({} items, {} priority)",
                    order.order_number,
                    order.items.len(),
                    order.priority
                ),
                read: false,
                priority: match order.priority {
                    OrderPriority::Normal => NotificationPriority::Medium,
                    OrderPriority::Rush | OrderPriority::Urgent => NotificationPriority::High,
                },
                order_id: Some(order.id.clone()),
                station_id: None,
                created_at: now,
            };
            inner.orders.push(order.clone());
            inner.push_notification(notification.clone());
            (order, notification)
        };

        tracing::info!(order_id = %order.id, order_number = %order.order_number, "Kitchen order created");
        self.publish(KitchenEvent::OrderCreated(order.clone()));
        self.publish(KitchenEvent::NotificationAdded(notification));
        Ok(order)
    }

    /// Move an order along its lifecycle
    ///
    /// Unknown ids and illegal moves leave the board untouched. Repeating
    /// the current status is a no-op and does not notify again.
    pub fn update_order_status(
        &self,
        order_id: &str,
        status: KitchenOrderStatus,
    ) -> KitchenResult<KitchenOrder> {
        self.set_order_status(order_id, status, true)
    }

    /// Manager correction: any status, including regressions
    ///
    /// Always writes and bumps `updated_at`, even for the current status.
    pub fn override_order_status(
        &self,
        order_id: &str,
        status: KitchenOrderStatus,
    ) -> KitchenResult<KitchenOrder> {
        self.set_order_status(order_id, status, false)
    }

    fn set_order_status(
        &self,
        order_id: &str,
        status: KitchenOrderStatus,
        guarded: bool,
    ) -> KitchenResult<KitchenOrder> {
        let now = now_millis();
        let (order, notification) = {
            let mut inner = self.inner.write();
            let order = inner.find_order_mut(order_id)?;
            let from = order.status;

            if guarded && from == status {
                return Ok(order.clone());
            }
            if guarded && !from.can_transition_to(status) {
                tracing::warn!(order_id = %order_id, from = %from, to = %status, "Rejected order status change");
                return Err(KitchenError::InvalidTransition { from, to: status });
            }

            order.status = status;
            order.updated_at = now;
            sync_items(order);
            let order = order.clone();

            let notification = (status == KitchenOrderStatus::Ready)
                .then(|| ready_notification(&order, now));
            if let Some(n) = &notification {
                inner.push_notification(n.clone());
            }
            tracing::info!(order_id = %order_id, from = %from, to = %status, guarded, "Order status changed");
            (order, notification)
        };

        self.publish(KitchenEvent::OrderUpdated(order.clone()));
        if let Some(n) = notification {
            self.publish(KitchenEvent::NotificationAdded(n));
        }
        Ok(order)
    }

    /// Move one item along `pending → preparing → ready`
    ///
    /// The first item started on a pending order starts the order too.
    pub fn update_item_status(
        &self,
        order_id: &str,
        item_id: &str,
        status: ItemStatus,
    ) -> KitchenResult<KitchenOrder> {
        let now = now_millis();
        let order = {
            let mut inner = self.inner.write();
            let order = inner.find_order_mut(order_id)?;
            if order.status.is_terminal() {
                return Err(KitchenError::OrderClosed {
                    order_id: order_id.to_string(),
                    status: order.status,
                });
            }
            let item = order
                .item_mut(item_id)
                .ok_or_else(|| KitchenError::ItemNotFound {
                    order_id: order_id.to_string(),
                    item_id: item_id.to_string(),
                })?;

            let from = item.status;
            if from == status {
                return Ok(order.clone());
            }
            if !from.can_transition_to(status) {
                return Err(KitchenError::InvalidItemTransition { from, to: status });
            }
            item.status = status;

            if order.status == KitchenOrderStatus::Pending && status == ItemStatus::Preparing {
                order.status = KitchenOrderStatus::Preparing;
            }
            order.updated_at = now;
            tracing::debug!(order_id = %order_id, item_id = %item_id, status = %status, "Item status changed");
            order.clone()
        };

        self.publish(KitchenEvent::ItemUpdated {
            order_id: order_id.to_string(),
            item_id: item_id.to_string(),
            order: order.clone(),
        });
        Ok(order)
    }

    /// Hand an open order to an on-duty staff member
    pub fn assign_order(&self, order_id: &str, staff_id: &str) -> KitchenResult<KitchenOrder> {
        let now = now_millis();
        let order = {
            let mut inner = self.inner.write();
            let member = inner
                .staff
                .iter()
                .find(|s| s.id == staff_id)
                .ok_or_else(|| KitchenError::StaffNotFound(staff_id.to_string()))?;
            if member.status != StaffStatus::Active {
                return Err(KitchenError::StaffUnavailable(staff_id.to_string()));
            }

            let order = inner.find_order_mut(order_id)?;
            if order.status.is_terminal() {
                return Err(KitchenError::OrderClosed {
                    order_id: order_id.to_string(),
                    status: order.status,
                });
            }
            order.assigned_to = Some(staff_id.to_string());
            order.updated_at = now;
            order.clone()
        };

        tracing::info!(order_id = %order_id, staff_id = %staff_id, "Order assigned");
        self.publish(KitchenEvent::OrderUpdated(order.clone()));
        Ok(order)
    }

    /// Report orders that became overdue since the last scan
    ///
    /// Each order is reported at most once.
    pub fn scan_overdue(&self, now: i64) -> Vec<KitchenNotification> {
        let created = {
            let mut inner = self.inner.write();
            let newly_overdue: Vec<KitchenNotification> = inner
                .orders
                .iter()
                .filter(|o| o.is_overdue(now) && !inner.overdue_notified.contains(&o.id))
                .map(|o| KitchenNotification {
                    id: prefixed_id("ntf"),
                    kind: NotificationType::OrderOverdue,
                    title: "Order Overdue".to_string(),
                    message: format!(
                        "Order {} has been waiting {} min (estimate {} min)",
                        o.order_number,
                        o.elapsed_minutes(now),
                        o.estimated_prep_time
                    ),
                    read: false,
                    priority: NotificationPriority::High,
                    order_id: Some(o.id.clone()),
                    station_id: None,
                    created_at: now,
                })
                .collect();

            for n in &newly_overdue {
                if let Some(order_id) = &n.order_id {
                    inner.overdue_notified.insert(order_id.clone());
                }
                inner.push_notification(n.clone());
            }
            newly_overdue
        };

        if !created.is_empty() {
            tracing::warn!(count = created.len(), "Orders became overdue");
        }
        for n in &created {
            self.publish(KitchenEvent::NotificationAdded(n.clone()));
        }
        created
    }

    // ========== Notifications ==========

    /// Notifications, newest first
    pub fn notifications(&self, unread_only: bool) -> Vec<KitchenNotification> {
        self.inner
            .read()
            .notifications
            .iter()
            .filter(|n| !unread_only || !n.read)
            .cloned()
            .collect()
    }

    pub fn add_notification(&self, create: NotificationCreate) -> KitchenResult<KitchenNotification> {
        validate_required_text(&create.title, "title", MAX_NAME_LEN)?;
        validate_required_text(&create.message, "message", MAX_NOTE_LEN)?;

        let notification = KitchenNotification {
            id: prefixed_id("ntf"),
            kind: create.kind,
            title: create.title,
            message: create.message,
            read: false,
            priority: create.priority,
            order_id: create.order_id,
            station_id: create.station_id,
            created_at: now_millis(),
        };
        self.inner.write().push_notification(notification.clone());
        self.publish(KitchenEvent::NotificationAdded(notification.clone()));
        Ok(notification)
    }

    /// Flip exactly one notification to read
    pub fn mark_notification_as_read(&self, id: &str) -> KitchenResult<KitchenNotification> {
        let notification = {
            let mut inner = self.inner.write();
            let n = inner
                .notifications
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or_else(|| KitchenError::NotificationNotFound(id.to_string()))?;
            n.read = true;
            n.clone()
        };
        self.publish(KitchenEvent::NotificationsRead {
            id: Some(id.to_string()),
        });
        Ok(notification)
    }

    /// Mark every notification read, returns how many changed
    pub fn mark_all_notifications_as_read(&self) -> usize {
        let changed = {
            let mut inner = self.inner.write();
            let mut changed = 0;
            for n in inner.notifications.iter_mut().filter(|n| !n.read) {
                n.read = true;
                changed += 1;
            }
            changed
        };
        self.publish(KitchenEvent::NotificationsRead { id: None });
        changed
    }

    pub fn clear_notifications(&self) {
        self.inner.write().notifications.clear();
        tracing::info!("Kitchen notifications cleared");
        self.publish(KitchenEvent::NotificationsCleared);
    }

    pub fn unread_notification_count(&self) -> usize {
        self.inner.read().unread_count()
    }

    // ========== Staff & stations ==========

    pub fn staff(&self) -> Vec<KitchenStaff> {
        let inner = self.inner.read();
        inner.staff.iter().map(|s| inner.staff_view(s)).collect()
    }

    pub fn update_staff_status(&self, staff_id: &str, status: StaffStatus) -> KitchenResult<KitchenStaff> {
        let mut inner = self.inner.write();
        let member = inner
            .staff
            .iter_mut()
            .find(|s| s.id == staff_id)
            .ok_or_else(|| KitchenError::StaffNotFound(staff_id.to_string()))?;
        member.status = status;
        let member = member.clone();
        tracing::info!(staff_id = %staff_id, status = ?status, "Staff status changed");
        Ok(inner.staff_view(&member))
    }

    pub fn stations(&self) -> Vec<KitchenStation> {
        let inner = self.inner.read();
        inner.stations.iter().map(|s| inner.station_view(s)).collect()
    }

    /// Change a station's status; maintenance raises a station alert
    pub fn update_station_status(
        &self,
        station_id: &str,
        status: StationStatus,
    ) -> KitchenResult<KitchenStation> {
        let (station, alert) = {
            let mut inner = self.inner.write();
            let station = inner
                .stations
                .iter_mut()
                .find(|s| s.id == station_id)
                .ok_or_else(|| KitchenError::StationNotFound(station_id.to_string()))?;
            let previous = station.status;
            station.status = status;
            let station = station.clone();

            let alert = (status == StationStatus::Maintenance && previous != status).then(|| {
                KitchenNotification {
                    id: prefixed_id("ntf"),
                    kind: NotificationType::StationAlert,
                    title: "Station Maintenance".to_string(),
                    message: format!("{} is under maintenance", station.name),
                    read: false,
                    priority: NotificationPriority::High,
                    order_id: None,
                    station_id: Some(station.id.clone()),
                    created_at: now_millis(),
                }
            });
            if let Some(a) = &alert {
                inner.push_notification(a.clone());
            }
            (inner.station_view(&station), alert)
        };

        tracing::info!(station_id = %station_id, status = ?status, "Station status changed");
        if let Some(a) = alert {
            self.publish(KitchenEvent::NotificationAdded(a));
        }
        Ok(station)
    }

    // ========== Metrics ==========

    /// Kitchen metrics at `now`
    pub fn stats(&self, now: i64) -> KitchenStats {
        let inner = self.inner.read();
        let count = |s: KitchenOrderStatus| inner.orders.iter().filter(|o| o.status == s).count();

        let served: Vec<i64> = inner
            .orders
            .iter()
            .filter(|o| o.status == KitchenOrderStatus::Served)
            .map(|o| elapsed_minutes(o.created_at, o.updated_at))
            .collect();
        let average_prep_time = if served.is_empty() {
            0.0
        } else {
            served.iter().sum::<i64>() as f64 / served.len() as f64
        };

        KitchenStats {
            total_orders: inner.orders.len(),
            pending_orders: count(KitchenOrderStatus::Pending),
            preparing_orders: count(KitchenOrderStatus::Preparing),
            ready_orders: count(KitchenOrderStatus::Ready),
            served_orders: count(KitchenOrderStatus::Served),
            cancelled_orders: count(KitchenOrderStatus::Cancelled),
            active_orders: inner.orders.iter().filter(|o| o.status.is_active()).count(),
            overdue_orders: inner.orders.iter().filter(|o| o.is_overdue(now)).count(),
            average_prep_time,
            unread_notifications: inner.unread_count(),
        }
    }
}
