//! Sample data loaded at startup when `SEED_SAMPLE_DATA` is on
//!
//! Kitchen and order timestamps are relative to `now` so the board always
//! shows a realistic mix of fresh and overdue tickets.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::*;

use crate::finance::Ledger;
use crate::kitchen::KitchenStore;
use crate::orders::OrderBook;

const MINUTE: i64 = 60_000;

fn rwf(amount: i64) -> Decimal {
    Decimal::from(amount)
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn kitchen_item(
    id: &str,
    name: &str,
    quantity: u32,
    category: &str,
    preparation_time: u32,
    status: ItemStatus,
    station: Station,
) -> KitchenOrderItem {
    KitchenOrderItem {
        id: id.to_string(),
        name: name.to_string(),
        quantity,
        category: category.to_string(),
        preparation_time,
        status,
        station,
        notes: None,
    }
}

pub fn kitchen_store(now: i64) -> KitchenStore {
    let orders = vec![
        KitchenOrder {
            id: "ko-1001".to_string(),
            order_number: "K-1001".to_string(),
            customer_name: "Amina Uwase".to_string(),
            order_type: OrderType::DineIn,
            priority: OrderPriority::Normal,
            status: KitchenOrderStatus::Pending,
            items: vec![
                kitchen_item("ko-1001-i1", "Goat Brochettes", 2, "Grill", 15, ItemStatus::Pending, Station::Grill),
                kitchen_item("ko-1001-i2", "Isombe", 1, "Traditional", 20, ItemStatus::Pending, Station::Hot),
            ],
            estimated_prep_time: 20,
            created_at: now - 5 * MINUTE,
            updated_at: now - 5 * MINUTE,
            assigned_to: None,
            payment_status: PaymentStatus::Pending,
            table_number: Some("T3".to_string()),
            notes: None,
        },
        KitchenOrder {
            id: "ko-1002".to_string(),
            order_number: "K-1002".to_string(),
            customer_name: "Eric Mugisha".to_string(),
            order_type: OrderType::Takeaway,
            priority: OrderPriority::Rush,
            status: KitchenOrderStatus::Preparing,
            items: vec![
                kitchen_item("ko-1002-i1", "Grilled Tilapia", 1, "Fish", 25, ItemStatus::Preparing, Station::Grill),
                kitchen_item("ko-1002-i2", "Chips", 1, "Sides", 10, ItemStatus::Ready, Station::Hot),
            ],
            estimated_prep_time: 25,
            created_at: now - 32 * MINUTE,
            updated_at: now - 20 * MINUTE,
            assigned_to: Some("staff-2".to_string()),
            payment_status: PaymentStatus::Paid,
            table_number: None,
            notes: Some("Extra pili-pili".to_string()),
        },
        KitchenOrder {
            id: "ko-1003".to_string(),
            order_number: "K-1003".to_string(),
            customer_name: "Grace Ingabire".to_string(),
            order_type: OrderType::Delivery,
            priority: OrderPriority::Urgent,
            status: KitchenOrderStatus::Pending,
            items: vec![
                kitchen_item("ko-1003-i1", "Beef Stew", 2, "Mains", 18, ItemStatus::Pending, Station::Hot),
                kitchen_item("ko-1003-i2", "Passion Juice", 2, "Drinks", 3, ItemStatus::Pending, Station::Beverages),
            ],
            estimated_prep_time: 18,
            created_at: now - 2 * MINUTE,
            updated_at: now - 2 * MINUTE,
            assigned_to: None,
            payment_status: PaymentStatus::Paid,
            table_number: None,
            notes: None,
        },
        KitchenOrder {
            id: "ko-1004".to_string(),
            order_number: "K-1004".to_string(),
            customer_name: "Patrick Habimana".to_string(),
            order_type: OrderType::DineIn,
            priority: OrderPriority::Normal,
            status: KitchenOrderStatus::Ready,
            items: vec![kitchen_item("ko-1004-i1", "Garden Salad", 1, "Salads", 8, ItemStatus::Ready, Station::Cold)],
            estimated_prep_time: 8,
            created_at: now - 15 * MINUTE,
            updated_at: now - 4 * MINUTE,
            assigned_to: Some("staff-3".to_string()),
            payment_status: PaymentStatus::Pending,
            table_number: Some("T7".to_string()),
            notes: None,
        },
        KitchenOrder {
            id: "ko-1005".to_string(),
            order_number: "K-1005".to_string(),
            customer_name: "Diane Mukamana".to_string(),
            order_type: OrderType::DineIn,
            priority: OrderPriority::Normal,
            status: KitchenOrderStatus::Served,
            items: vec![kitchen_item("ko-1005-i1", "Chocolate Cake", 2, "Desserts", 5, ItemStatus::Ready, Station::Pastry)],
            estimated_prep_time: 5,
            created_at: now - 60 * MINUTE,
            updated_at: now - 48 * MINUTE,
            assigned_to: Some("staff-4".to_string()),
            payment_status: PaymentStatus::Paid,
            table_number: Some("T1".to_string()),
            notes: None,
        },
    ];

    let staff = vec![
        KitchenStaff {
            id: "staff-1".to_string(),
            name: "Jean Bosco".to_string(),
            role: StaffRole::HeadChef,
            station: Station::Hot,
            status: StaffStatus::Active,
            active_orders: 0,
        },
        KitchenStaff {
            id: "staff-2".to_string(),
            name: "Claudine Uwimana".to_string(),
            role: StaffRole::Chef,
            station: Station::Grill,
            status: StaffStatus::Active,
            active_orders: 0,
        },
        KitchenStaff {
            id: "staff-3".to_string(),
            name: "Olivier Nshuti".to_string(),
            role: StaffRole::LineCook,
            station: Station::Cold,
            status: StaffStatus::OnBreak,
            active_orders: 0,
        },
        KitchenStaff {
            id: "staff-4".to_string(),
            name: "Alice Umutoni".to_string(),
            role: StaffRole::PrepCook,
            station: Station::Pastry,
            status: StaffStatus::OffDuty,
            active_orders: 0,
        },
    ];

    let station = |id: &str, name: &str, kind: Station, status: StationStatus, capacity: u32| KitchenStation {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        status,
        capacity,
        current_load: 0,
    };
    let stations = vec![
        station("station-hot", "Hot Line", Station::Hot, StationStatus::Active, 10),
        station("station-cold", "Cold Prep", Station::Cold, StationStatus::Active, 6),
        station("station-grill", "Grill", Station::Grill, StationStatus::Active, 8),
        station("station-pastry", "Pastry", Station::Pastry, StationStatus::Idle, 4),
        station("station-bev", "Beverages", Station::Beverages, StationStatus::Active, 12),
    ];

    let notifications = vec![
        KitchenNotification {
            id: "ntf-seed-1".to_string(),
            kind: NotificationType::OrderReady,
            title: "Order Ready".to_string(),
            message: "Order K-1004 for Patrick Habimana is ready for pickup".to_string(),
            read: false,
            priority: NotificationPriority::High,
            order_id: Some("ko-1004".to_string()),
            station_id: None,
            created_at: now - 4 * MINUTE,
        },
        KitchenNotification {
            id: "ntf-seed-2".to_string(),
            kind: NotificationType::System,
            title: "Shift Started".to_string(),
            message: "Evening shift started with 2 chefs on duty".to_string(),
            read: true,
            priority: NotificationPriority::Low,
            order_id: None,
            station_id: None,
            created_at: now - 90 * MINUTE,
        },
    ];

    KitchenStore::with_data(orders, staff, stations, notifications)
}

pub fn ledger() -> Ledger {
    let record = |id: &str,
                  date: NaiveDate,
                  kind: RecordKind,
                  category: &str,
                  description: &str,
                  amount: i64,
                  method: &str| FinancialRecord {
        id: id.to_string(),
        date,
        kind,
        category: category.to_string(),
        description: description.to_string(),
        amount: rwf(amount),
        payment_method: method.to_string(),
        reference: None,
    };
    let records = vec![
        record("fin-1", day(2024, 3, 1), RecordKind::Income, "Food Sales", "Daily dine-in sales", 850_000, "cash"),
        record("fin-2", day(2024, 3, 1), RecordKind::Income, "Beverage Sales", "Bar and juice sales", 240_000, "mobile_money"),
        record("fin-3", day(2024, 3, 2), RecordKind::Expense, "Supplies", "Kimironko market produce", 310_000, "cash"),
        record("fin-4", day(2024, 3, 5), RecordKind::Expense, "Salaries", "Kitchen staff wages", 1_200_000, "bank_transfer"),
        record("fin-5", day(2024, 3, 8), RecordKind::Income, "Catering", "Wedding catering deposit", 1_500_000, "bank_transfer"),
        record("fin-6", day(2024, 3, 10), RecordKind::Expense, "Utilities", "Electricity and water", 185_000, "mobile_money"),
    ];

    let invoices = vec![
        Invoice {
            id: "inv-1".to_string(),
            invoice_number: "INV-2024-0001".to_string(),
            customer_name: "Kigali Convention Centre".to_string(),
            customer_email: Some("events@kcc.rw".to_string()),
            issue_date: day(2024, 2, 20),
            due_date: day(2024, 3, 20),
            items: vec![InvoiceLine {
                description: "Conference lunch buffet".to_string(),
                quantity: 120,
                unit_price: rwf(15_000),
            }],
            tax_rate: rwf(18),
            status: InvoiceStatus::Paid,
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            paid_date: Some(day(2024, 3, 12)),
        },
        Invoice {
            id: "inv-2".to_string(),
            invoice_number: "INV-2024-0002".to_string(),
            customer_name: "Umubano Hotel".to_string(),
            customer_email: Some("accounts@umubano.rw".to_string()),
            issue_date: day(2024, 3, 1),
            due_date: day(2024, 3, 31),
            items: vec![
                InvoiceLine {
                    description: "Pastry supply".to_string(),
                    quantity: 200,
                    unit_price: rwf(1_200),
                },
                InvoiceLine {
                    description: "Delivery".to_string(),
                    quantity: 1,
                    unit_price: rwf(10_000),
                },
            ],
            tax_rate: rwf(18),
            status: InvoiceStatus::Sent,
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            paid_date: None,
        },
        Invoice {
            id: "inv-3".to_string(),
            invoice_number: "INV-2024-0003".to_string(),
            customer_name: "Bank of Kigali".to_string(),
            customer_email: None,
            issue_date: day(2024, 3, 10),
            due_date: day(2024, 4, 10),
            items: vec![InvoiceLine {
                description: "Staff party catering".to_string(),
                quantity: 60,
                unit_price: rwf(20_000),
            }],
            tax_rate: rwf(18),
            status: InvoiceStatus::Draft,
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            paid_date: None,
        },
    ];

    let tax = |id: &str, period: &str, tax_type: TaxType, taxable: i64, rate: i64, due: NaiveDate, status: TaxStatus, filed: Option<NaiveDate>| TaxRecord {
        id: id.to_string(),
        period: period.to_string(),
        tax_type,
        taxable_amount: rwf(taxable),
        rate: rwf(rate),
        tax_due: Decimal::ZERO,
        due_date: due,
        status,
        filed_date: filed,
    };
    let taxes = vec![
        tax("tax-1", "2023-Q4", TaxType::Vat, 7_800_000, 18, day(2024, 1, 15), TaxStatus::Paid, Some(day(2024, 1, 10))),
        tax("tax-2", "2024-Q1", TaxType::Vat, 8_450_000, 18, day(2024, 4, 15), TaxStatus::Filed, Some(day(2024, 4, 5))),
        tax("tax-3", "2024-Q1", TaxType::Payroll, 3_600_000, 5, day(2024, 4, 15), TaxStatus::Pending, None),
        tax("tax-4", "2023", TaxType::Income, 24_000_000, 30, day(2024, 3, 31), TaxStatus::Pending, None),
    ];

    Ledger::with_data(records, invoices, taxes)
}

pub fn order_book(now: i64) -> OrderBook {
    let line = |name: &str, quantity: u32, price: i64| OrderLine {
        name: name.to_string(),
        quantity,
        price: rwf(price),
    };
    let order = |id: &str,
                 name: &str,
                 email: &str,
                 items: Vec<OrderLine>,
                 status: CustomerOrderStatus,
                 order_type: OrderType,
                 hours_ago: i64,
                 method: &str| {
        let total = items
            .iter()
            .map(|i| i.price * Decimal::from(i.quantity))
            .sum();
        CustomerOrder {
            id: id.to_string(),
            customer_name: name.to_string(),
            customer_email: email.to_string(),
            restaurant: "Heaven Restaurant".to_string(),
            items,
            total,
            status,
            order_type,
            created_at: now - hours_ago * 60 * MINUTE,
            payment_method: method.to_string(),
        }
    };

    OrderBook::new(vec![
        order(
            "ORD-2024-001",
            "Amina Uwase",
            "amina.uwase@example.rw",
            vec![line("Goat Brochettes", 2, 4_500), line("Isombe", 1, 6_000)],
            CustomerOrderStatus::Delivered,
            OrderType::Delivery,
            72,
            "mtn_momo",
        ),
        order(
            "ORD-2024-002",
            "Eric Mugisha",
            "eric.mugisha@example.rw",
            vec![line("Grilled Tilapia", 1, 12_000), line("Chips", 2, 2_500)],
            CustomerOrderStatus::Preparing,
            OrderType::Takeaway,
            1,
            "airtel_money",
        ),
        order(
            "ORD-2024-003",
            "Amina Uwase",
            "amina.uwase@example.rw",
            vec![line("Beef Stew", 1, 8_000), line("Passion Juice", 2, 2_000)],
            CustomerOrderStatus::Pending,
            OrderType::DineIn,
            0,
            "card",
        ),
        order(
            "ORD-2024-004",
            "Patrick Habimana",
            "patrick.h@example.rw",
            vec![line("Chocolate Cake", 3, 3_500)],
            CustomerOrderStatus::Cancelled,
            OrderType::Delivery,
            26,
            "cash",
        ),
        order(
            "ORD-2024-005",
            "Grace Ingabire",
            "grace.ingabire@example.rw",
            vec![line("Garden Salad", 2, 5_000), line("Sambaza", 1, 7_500)],
            CustomerOrderStatus::Ready,
            OrderType::DineIn,
            2,
            "mtn_momo",
        ),
    ])
}

pub fn restaurant_profile() -> RestaurantProfile {
    let hours = |day: &str, open: &str, close: &str| OpeningHours {
        day: day.to_string(),
        open: open.to_string(),
        close: close.to_string(),
    };
    let menu_item = |id: &str, name: &str, category: &str, description: &str, price: i64, available: bool| MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        price: rwf(price),
        available,
    };

    RestaurantProfile {
        id: "rest-1".to_string(),
        name: "Heaven Restaurant".to_string(),
        cuisine: "Rwandan Fusion".to_string(),
        address: "KN 29 St, Kiyovu, Kigali".to_string(),
        phone: "+250 788 000 111".to_string(),
        email: "hello@heaven.rw".to_string(),
        rating: 4.6,
        opening_hours: vec![
            hours("Monday-Friday", "07:00", "22:00"),
            hours("Saturday", "08:00", "23:00"),
            hours("Sunday", "09:00", "21:00"),
        ],
        menu: vec![
            menu_item("menu-1", "Goat Brochettes", "Grill", "Skewered goat with plantain", 4_500, true),
            menu_item("menu-2", "Grilled Tilapia", "Grill", "Whole lake tilapia, chips and salad", 12_000, true),
            menu_item("menu-3", "Isombe", "Traditional", "Cassava leaves with eggplant and peanut", 6_000, true),
            menu_item("menu-4", "Sambaza", "Traditional", "Crispy Lake Kivu sardines", 7_500, false),
            menu_item("menu-5", "Garden Salad", "Salads", "Avocado, tomato and greens", 5_000, true),
            menu_item("menu-6", "Chocolate Cake", "Desserts", "House-baked with Rwandan cocoa", 3_500, true),
            menu_item("menu-7", "Passion Juice", "Drinks", "Fresh passion fruit juice", 2_000, true),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_kitchen_is_consistent() {
        let now = 10_000_000_000;
        let store = kitchen_store(now);
        assert_eq!(store.orders().len(), 5);
        // K-1002 is past its 25 min estimate
        let overdue = store.overdue_orders(now);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].order_number, "K-1002");
        assert_eq!(store.unread_notification_count(), 1);
        assert_eq!(store.queue()[0].order_number, "K-1003");
    }

    #[test]
    fn test_seed_ledger_derives_amounts() {
        let ledger = ledger();
        let invoice = ledger.get_invoice("inv-1").unwrap();
        assert_eq!(invoice.subtotal, rwf(1_800_000));
        assert_eq!(invoice.total, rwf(2_124_000));
        assert_eq!(ledger.get_tax("tax-3").unwrap().tax_due, rwf(180_000));
    }

    #[test]
    fn test_seed_orders_and_menu() {
        let book = order_book(10_000_000_000);
        assert_eq!(book.history_for("amina.uwase@example.rw").len(), 2);
        assert_eq!(book.get("ORD-2024-001").unwrap().total, rwf(15_000));

        let profile = restaurant_profile();
        assert_eq!(profile.menu_items(None, true).len(), 6);
    }
}
