use super::*;
use crate::utils::validation::MAX_QUANTITY;
use shared::ErrorCode;
use shared::models::{
    KitchenOrderItemCreate, OrderType, PaymentStatus, StaffRole, Station,
};

const MINUTE: i64 = 60_000;

fn create_item(name: &str, station: Station, prep: u32) -> KitchenOrderItemCreate {
    KitchenOrderItemCreate {
        name: name.to_string(),
        quantity: 1,
        category: "Mains".to_string(),
        preparation_time: prep,
        station,
        notes: None,
    }
}

fn create_order_cmd(customer: &str, priority: OrderPriority) -> KitchenOrderCreate {
    KitchenOrderCreate {
        customer_name: customer.to_string(),
        order_type: OrderType::DineIn,
        priority,
        items: vec![
            create_item("Brochettes", Station::Grill, 15),
            create_item("Isombe", Station::Hot, 20),
        ],
        estimated_prep_time: None,
        payment_status: PaymentStatus::Pending,
        table_number: Some("T4".to_string()),
        notes: None,
    }
}

fn fixed_order(id: &str, status: KitchenOrderStatus, priority: OrderPriority, created_at: i64) -> KitchenOrder {
    KitchenOrder {
        id: id.to_string(),
        order_number: format!("K-{}", id),
        customer_name: format!("Guest {}", id),
        order_type: OrderType::DineIn,
        priority,
        status,
        items: vec![KitchenOrderItem {
            id: format!("{}-i1", id),
            name: "Sambaza".to_string(),
            quantity: 2,
            category: "Mains".to_string(),
            preparation_time: 10,
            status: ItemStatus::Pending,
            station: Station::Hot,
            notes: None,
        }],
        estimated_prep_time: 20,
        created_at,
        updated_at: created_at,
        assigned_to: None,
        payment_status: PaymentStatus::Pending,
        table_number: None,
        notes: None,
    }
}

fn create_test_store() -> KitchenStore {
    KitchenStore::with_data(
        vec![
            fixed_order("a", KitchenOrderStatus::Pending, OrderPriority::Normal, 1_000),
            fixed_order("b", KitchenOrderStatus::Preparing, OrderPriority::Urgent, 2_000),
            fixed_order("c", KitchenOrderStatus::Pending, OrderPriority::Rush, 3_000),
            fixed_order("d", KitchenOrderStatus::Served, OrderPriority::Normal, 4_000),
        ],
        vec![
            KitchenStaff {
                id: "s1".to_string(),
                name: "Jean".to_string(),
                role: StaffRole::Chef,
                station: Station::Hot,
                status: StaffStatus::Active,
                active_orders: 0,
            },
            KitchenStaff {
                id: "s2".to_string(),
                name: "Claire".to_string(),
                role: StaffRole::LineCook,
                station: Station::Grill,
                status: StaffStatus::OnBreak,
                active_orders: 0,
            },
        ],
        vec![KitchenStation {
            id: "st-hot".to_string(),
            name: "Hot Line".to_string(),
            kind: Station::Hot,
            status: StationStatus::Active,
            capacity: 8,
            current_load: 0,
        }],
        vec![],
    )
}

fn ready_notifications(store: &KitchenStore) -> usize {
    store
        .notifications(false)
        .iter()
        .filter(|n| n.kind == NotificationType::OrderReady)
        .count()
}

// ========================================================================
// Order status
// ========================================================================

#[test]
fn test_update_status_valid_transition() {
    let store = create_test_store();
    let order = store
        .update_order_status("a", KitchenOrderStatus::Preparing)
        .unwrap();
    assert_eq!(order.status, KitchenOrderStatus::Preparing);
    assert_eq!(order.items[0].status, ItemStatus::Preparing);
    assert_eq!(store.get_order("a").unwrap().status, KitchenOrderStatus::Preparing);
}

#[test]
fn test_update_status_unknown_order_leaves_list_unchanged() {
    let store = create_test_store();
    let before = store.orders();

    let err = store
        .update_order_status("missing", KitchenOrderStatus::Ready)
        .unwrap_err();
    assert!(matches!(err, KitchenError::OrderNotFound(ref id) if id == "missing"));
    assert_eq!(store.orders(), before);

    let app: shared::AppError = err.into();
    assert_eq!(app.code, ErrorCode::OrderNotFound);
}

#[test]
fn test_regression_and_skip_rejected() {
    let store = create_test_store();

    let err = store
        .update_order_status("d", KitchenOrderStatus::Pending)
        .unwrap_err();
    assert!(matches!(
        err,
        KitchenError::InvalidTransition {
            from: KitchenOrderStatus::Served,
            to: KitchenOrderStatus::Pending
        }
    ));

    let err = store
        .update_order_status("a", KitchenOrderStatus::Served)
        .unwrap_err();
    let app: shared::AppError = err.into();
    assert_eq!(app.code, ErrorCode::InvalidStatusTransition);

    assert_eq!(store.get_order("a").unwrap().status, KitchenOrderStatus::Pending);
    assert_eq!(store.get_order("d").unwrap().status, KitchenOrderStatus::Served);
}

#[test]
fn test_ready_notifies_once() {
    let store = create_test_store();
    store
        .update_order_status("b", KitchenOrderStatus::Ready)
        .unwrap();
    let again = store
        .update_order_status("b", KitchenOrderStatus::Ready)
        .unwrap();

    assert_eq!(again.status, KitchenOrderStatus::Ready);
    assert!(again.items.iter().all(|i| i.status == ItemStatus::Ready));
    assert_eq!(ready_notifications(&store), 1);

    let n = &store.notifications(true)[0];
    assert_eq!(n.order_id.as_deref(), Some("b"));
    assert_eq!(n.priority, NotificationPriority::High);
}

#[test]
fn test_cancel_from_open_state_only() {
    let store = create_test_store();
    assert!(store
        .update_order_status("c", KitchenOrderStatus::Cancelled)
        .is_ok());
    assert!(store
        .update_order_status("c", KitchenOrderStatus::Preparing)
        .is_err());
}

#[test]
fn test_override_allows_regression_and_notifies_on_ready() {
    let store = create_test_store();
    let order = store
        .override_order_status("d", KitchenOrderStatus::Pending)
        .unwrap();
    assert_eq!(order.status, KitchenOrderStatus::Pending);

    let before = store.get_order("a").unwrap().updated_at;
    store
        .override_order_status("a", KitchenOrderStatus::Ready)
        .unwrap();
    assert_eq!(ready_notifications(&store), 1);

    // repeating an override still writes and re-announces
    let again = store
        .override_order_status("a", KitchenOrderStatus::Ready)
        .unwrap();
    assert_eq!(again.status, KitchenOrderStatus::Ready);
    assert!(again.updated_at > before);
    assert!(again.items.iter().all(|i| i.status == ItemStatus::Ready));
    assert_eq!(ready_notifications(&store), 2);

    // the guarded path stays a no-op
    store
        .update_order_status("a", KitchenOrderStatus::Ready)
        .unwrap();
    assert_eq!(ready_notifications(&store), 2);

    assert!(matches!(
        store.override_order_status("nope", KitchenOrderStatus::Ready),
        Err(KitchenError::OrderNotFound(_))
    ));
}

// ========================================================================
// Items
// ========================================================================

#[test]
fn test_item_start_promotes_pending_order() {
    let store = create_test_store();
    let order = store
        .update_item_status("a", "a-i1", ItemStatus::Preparing)
        .unwrap();
    assert_eq!(order.items[0].status, ItemStatus::Preparing);
    assert_eq!(order.status, KitchenOrderStatus::Preparing);
}

#[test]
fn test_item_transition_errors() {
    let store = create_test_store();

    assert!(matches!(
        store.update_item_status("a", "a-i1", ItemStatus::Ready),
        Err(KitchenError::InvalidItemTransition { .. })
    ));
    assert!(matches!(
        store.update_item_status("a", "zzz", ItemStatus::Preparing),
        Err(KitchenError::ItemNotFound { .. })
    ));
    assert!(matches!(
        store.update_item_status("d", "d-i1", ItemStatus::Preparing),
        Err(KitchenError::OrderClosed { .. })
    ));
    // same status is a no-op
    let order = store
        .update_item_status("a", "a-i1", ItemStatus::Pending)
        .unwrap();
    assert_eq!(order.status, KitchenOrderStatus::Pending);
}

// ========================================================================
// Queries
// ========================================================================

#[test]
fn test_orders_by_status_keeps_relative_order() {
    let store = create_test_store();
    let ids: Vec<String> = store
        .orders_by_status(KitchenOrderStatus::Pending)
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(ids, vec!["a", "c"]);

    let urgent = store.orders_by_priority(OrderPriority::Urgent);
    assert_eq!(urgent.len(), 1);
    assert_eq!(urgent[0].id, "b");
}

#[test]
fn test_queue_sorted_by_priority_then_age() {
    let store = create_test_store();
    let ids: Vec<String> = store.queue().into_iter().map(|o| o.id).collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
}

#[test]
fn test_overdue_and_scan_notifies_once() {
    let store = create_test_store();
    // estimate is 20 min; "a" created at 1s, "d" is served
    let now = 1_000 + 25 * MINUTE;
    let overdue: Vec<String> = store.overdue_orders(now).into_iter().map(|o| o.id).collect();
    assert_eq!(overdue, vec!["a", "b", "c"]);

    let first = store.scan_overdue(now);
    assert_eq!(first.len(), 3);
    assert!(first.iter().all(|n| n.kind == NotificationType::OrderOverdue));

    let second = store.scan_overdue(now + MINUTE);
    assert!(second.is_empty());
    assert_eq!(store.unread_notification_count(), 3);
}

#[test]
fn test_not_overdue_within_estimate() {
    let store = create_test_store();
    // "a" at exactly its 20 min estimate is not overdue yet
    assert!(store.overdue_orders(1_000 + 20 * MINUTE).is_empty());
    assert!(store.scan_overdue(1_000 + 20 * MINUTE).is_empty());
}

// ========================================================================
// add / assign
// ========================================================================

#[test]
fn test_add_order() {
    let store = create_test_store();
    let order = store
        .add_order(create_order_cmd("Amina", OrderPriority::Rush))
        .unwrap();

    assert_eq!(order.status, KitchenOrderStatus::Pending);
    assert_eq!(order.order_number, "K-1005");
    assert_eq!(order.estimated_prep_time, 20);
    assert_eq!(order.items.len(), 2);
    assert!(order.items[1].id.ends_with("-i2"));
    assert_eq!(store.orders().len(), 5);

    let n = &store.notifications(false)[0];
    assert_eq!(n.kind, NotificationType::NewOrder);
    assert_eq!(n.priority, NotificationPriority::High);
}

#[test]
fn test_add_order_validation() {
    let store = create_test_store();

    let mut empty = create_order_cmd("Amina", OrderPriority::Normal);
    empty.items.clear();
    assert!(matches!(store.add_order(empty), Err(KitchenError::EmptyOrder)));

    let mut zero = create_order_cmd("Amina", OrderPriority::Normal);
    zero.items[0].quantity = 0;
    let app: shared::AppError = store.add_order(zero).unwrap_err().into();
    assert_eq!(app.code, ErrorCode::ValidationFailed);

    let mut huge = create_order_cmd("Amina", OrderPriority::Normal);
    huge.items[0].quantity = MAX_QUANTITY + 1;
    let app: shared::AppError = store.add_order(huge).unwrap_err().into();
    assert_eq!(app.code, ErrorCode::ValueOutOfRange);

    let nameless = create_order_cmd("  ", OrderPriority::Normal);
    assert!(matches!(store.add_order(nameless), Err(KitchenError::Invalid(_))));

    assert_eq!(store.orders().len(), 4);
}

#[test]
fn test_assign_order() {
    let store = create_test_store();
    let order = store.assign_order("a", "s1").unwrap();
    assert_eq!(order.assigned_to.as_deref(), Some("s1"));

    let staff = store.staff();
    assert_eq!(staff[0].active_orders, 1);

    assert!(matches!(
        store.assign_order("a", "s2"),
        Err(KitchenError::StaffUnavailable(_))
    ));
    assert!(matches!(
        store.assign_order("a", "ghost"),
        Err(KitchenError::StaffNotFound(_))
    ));
    assert!(matches!(
        store.assign_order("d", "s1"),
        Err(KitchenError::OrderClosed { .. })
    ));
}

// ========================================================================
// Notifications
// ========================================================================

#[test]
fn test_mark_notification_read_flips_only_that_one() {
    let store = create_test_store();
    let make = |title: &str| NotificationCreate {
        kind: NotificationType::System,
        title: title.to_string(),
        message: "check".to_string(),
        priority: NotificationPriority::Low,
        order_id: None,
        station_id: None,
    };
    let first = store.add_notification(make("one")).unwrap();
    let second = store.add_notification(make("two")).unwrap();

    store.mark_notification_as_read(&first.id).unwrap();
    let all = store.notifications(false);
    assert!(all.iter().find(|n| n.id == first.id).unwrap().read);
    assert!(!all.iter().find(|n| n.id == second.id).unwrap().read);
    assert_eq!(store.unread_notification_count(), 1);

    assert!(matches!(
        store.mark_notification_as_read("ntf-missing"),
        Err(KitchenError::NotificationNotFound(_))
    ));

    assert_eq!(store.mark_all_notifications_as_read(), 1);
    assert_eq!(store.unread_notification_count(), 0);

    store.clear_notifications();
    assert!(store.notifications(false).is_empty());
}

#[test]
fn test_notification_cap() {
    let store = KitchenStore::new();
    for i in 0..(MAX_NOTIFICATIONS + 5) {
        store
            .add_notification(NotificationCreate {
                kind: NotificationType::System,
                title: format!("n{}", i),
                message: "m".to_string(),
                priority: NotificationPriority::Low,
                order_id: None,
                station_id: None,
            })
            .unwrap();
    }
    let all = store.notifications(false);
    assert_eq!(all.len(), MAX_NOTIFICATIONS);
    assert_eq!(all[0].title, format!("n{}", MAX_NOTIFICATIONS + 4));
}

// ========================================================================
// Staff, stations, stats
// ========================================================================

#[test]
fn test_station_load_and_maintenance_alert() {
    let store = create_test_store();
    // a, b, c are active with 2 hot items each
    assert_eq!(store.stations()[0].current_load, 6);

    let station = store
        .update_station_status("st-hot", StationStatus::Maintenance)
        .unwrap();
    assert_eq!(station.status, StationStatus::Maintenance);
    let alert = &store.notifications(false)[0];
    assert_eq!(alert.kind, NotificationType::StationAlert);
    assert_eq!(alert.station_id.as_deref(), Some("st-hot"));

    assert!(matches!(
        store.update_station_status("nope", StationStatus::Idle),
        Err(KitchenError::StationNotFound(_))
    ));
}

#[test]
fn test_update_staff_status() {
    let store = create_test_store();
    let member = store.update_staff_status("s2", StaffStatus::Active).unwrap();
    assert_eq!(member.status, StaffStatus::Active);
    assert!(store.assign_order("c", "s2").is_ok());
    assert!(matches!(
        store.update_staff_status("nope", StaffStatus::OffDuty),
        Err(KitchenError::StaffNotFound(_))
    ));
}

#[test]
fn test_stats() {
    let store = create_test_store();
    let stats = store.stats(1_000 + 25 * MINUTE);
    assert_eq!(stats.total_orders, 4);
    assert_eq!(stats.pending_orders, 2);
    assert_eq!(stats.preparing_orders, 1);
    assert_eq!(stats.served_orders, 1);
    assert_eq!(stats.active_orders, 3);
    assert_eq!(stats.overdue_orders, 3);
    // served fixture has created_at == updated_at
    assert_eq!(stats.average_prep_time, 0.0);
}

// ========================================================================
// Events
// ========================================================================

#[tokio::test]
async fn test_events_published() {
    let store = create_test_store();
    let mut rx = store.subscribe();

    store
        .update_order_status("b", KitchenOrderStatus::Ready)
        .unwrap();

    match rx.recv().await.unwrap() {
        KitchenEvent::OrderUpdated(order) => assert_eq!(order.id, "b"),
        other => panic!("unexpected event: {:?}", other),
    }
    match rx.recv().await.unwrap() {
        KitchenEvent::NotificationAdded(n) => assert_eq!(n.kind, NotificationType::OrderReady),
        other => panic!("unexpected event: {:?}", other),
    }

    // rejected changes publish nothing
    let _ = store.update_order_status("b", KitchenOrderStatus::Pending);
    store.clear_notifications();
    assert!(matches!(
        rx.recv().await.unwrap(),
        KitchenEvent::NotificationsCleared
    ));
}
