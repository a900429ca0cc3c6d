//! OrderBook - customer orders for order management and order history

use parking_lot::RwLock;
use shared::error::{AppError, ErrorCode};
use shared::models::{CustomerOrder, CustomerOrderStatus, OrderQuery, OrderSortKey, SortDirection};
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderBookError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Order cannot move from {from} to {to}")]
    InvalidTransition {
        from: CustomerOrderStatus,
        to: CustomerOrderStatus,
    },
}

impl From<OrderBookError> for AppError {
    fn from(err: OrderBookError) -> Self {
        match err {
            OrderBookError::NotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, format!("Order not found: {}", id))
                    .with_detail("order_id", id)
            }
            OrderBookError::InvalidTransition { from, to } => {
                AppError::invalid_transition("Order", from, to)
            }
        }
    }
}

pub type OrderBookResult<T> = Result<T, OrderBookError>;

fn matches_term(order: &CustomerOrder, term: &str) -> bool {
    order.id.to_lowercase().contains(term)
        || order.customer_name.to_lowercase().contains(term)
        || order.customer_email.to_lowercase().contains(term)
        || order
            .items
            .iter()
            .any(|i| i.name.to_lowercase().contains(term))
}

fn compare(a: &CustomerOrder, b: &CustomerOrder, key: OrderSortKey) -> Ordering {
    let primary = match key {
        OrderSortKey::Date => a.created_at.cmp(&b.created_at),
        OrderSortKey::Total => a.total.cmp(&b.total),
        OrderSortKey::Customer => a
            .customer_name
            .to_lowercase()
            .cmp(&b.customer_name.to_lowercase()),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

/// In-memory customer order list
#[derive(Debug, Default)]
pub struct OrderBook {
    orders: RwLock<Vec<CustomerOrder>>,
}

impl OrderBook {
    pub fn new(orders: Vec<CustomerOrder>) -> Self {
        Self {
            orders: RwLock::new(orders),
        }
    }

    /// Filter by free text, status and customer, then sort
    ///
    /// The free-text term matches id, customer name, email or any item
    /// name, case-insensitive.
    pub fn search(&self, query: &OrderQuery) -> Vec<CustomerOrder> {
        let term = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);
        let email = query.customer_email.as_deref().map(str::trim);

        let mut found: Vec<CustomerOrder> = self
            .orders
            .read()
            .iter()
            .filter(|o| term.as_deref().is_none_or(|t| matches_term(o, t)))
            .filter(|o| query.status.is_none_or(|s| o.status == s))
            .filter(|o| email.is_none_or(|e| o.customer_email.eq_ignore_ascii_case(e)))
            .cloned()
            .collect();

        found.sort_by(|a, b| {
            let ord = compare(a, b, query.sort);
            match query.dir {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        found
    }

    pub fn get(&self, id: &str) -> OrderBookResult<CustomerOrder> {
        self.orders
            .read()
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| OrderBookError::NotFound(id.to_string()))
    }

    /// Manager status change; delivered and cancelled orders are final
    pub fn update_status(
        &self,
        id: &str,
        status: CustomerOrderStatus,
    ) -> OrderBookResult<CustomerOrder> {
        let mut orders = self.orders.write();
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| OrderBookError::NotFound(id.to_string()))?;

        if order.status == status {
            return Ok(order.clone());
        }
        if !order.status.can_transition_to(status) {
            return Err(OrderBookError::InvalidTransition {
                from: order.status,
                to: status,
            });
        }
        tracing::info!(order_id = %id, from = %order.status, to = %status, "Customer order status changed");
        order.status = status;
        Ok(order.clone())
    }

    /// One customer's orders, newest first
    pub fn history_for(&self, customer_email: &str) -> Vec<CustomerOrder> {
        self.search(&OrderQuery {
            customer_email: Some(customer_email.to_string()),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use shared::models::{OrderLine, OrderType};

    fn order(id: &str, name: &str, email: &str, total: i64, created_at: i64, item: &str) -> CustomerOrder {
        CustomerOrder {
            id: id.to_string(),
            customer_name: name.to_string(),
            customer_email: email.to_string(),
            restaurant: "Heaven Restaurant".to_string(),
            items: vec![OrderLine {
                name: item.to_string(),
                quantity: 1,
                price: total.into(),
            }],
            total: total.into(),
            status: CustomerOrderStatus::Pending,
            order_type: OrderType::Delivery,
            created_at,
            payment_method: "mtn_momo".to_string(),
        }
    }

    fn create_test_book() -> OrderBook {
        OrderBook::new(vec![
            order("ORD-001", "Amina Uwase", "amina@example.rw", 12000, 100, "Brochettes"),
            order("ORD-002", "Eric Mugisha", "eric@example.rw", 8500, 300, "Isombe"),
            order("ORD-003", "amina uwase", "AMINA@example.rw", 23000, 200, "Tilapia"),
        ])
    }

    fn ids(orders: Vec<CustomerOrder>) -> Vec<String> {
        orders.into_iter().map(|o| o.id).collect()
    }

    #[test]
    fn test_default_sort_newest_first() {
        let book = create_test_book();
        assert_eq!(
            ids(book.search(&OrderQuery::default())),
            vec!["ORD-002", "ORD-003", "ORD-001"]
        );
    }

    #[test]
    fn test_search_term_matches_items_and_names() {
        let book = create_test_book();
        let q = |t: &str| OrderQuery {
            q: Some(t.to_string()),
            ..Default::default()
        };
        assert_eq!(ids(book.search(&q("tilapia"))), vec!["ORD-003"]);
        assert_eq!(ids(book.search(&q("MUGISHA"))), vec!["ORD-002"]);
        assert_eq!(ids(book.search(&q("ord-001"))), vec!["ORD-001"]);
        assert_eq!(book.search(&q("   ")).len(), 3);
        assert!(book.search(&q("pizza")).is_empty());
    }

    #[test]
    fn test_sort_by_total_and_customer() {
        let book = create_test_book();
        let by_total = book.search(&OrderQuery {
            sort: OrderSortKey::Total,
            dir: SortDirection::Asc,
            ..Default::default()
        });
        assert_eq!(by_total[0].total, dec!(8500));
        assert_eq!(by_total[2].total, dec!(23000));

        let by_customer = book.search(&OrderQuery {
            sort: OrderSortKey::Customer,
            dir: SortDirection::Asc,
            ..Default::default()
        });
        assert_eq!(ids(by_customer), vec!["ORD-001", "ORD-003", "ORD-002"]);
    }

    #[test]
    fn test_update_status() {
        let book = create_test_book();
        let updated = book
            .update_status("ORD-001", CustomerOrderStatus::Preparing)
            .unwrap();
        assert_eq!(updated.status, CustomerOrderStatus::Preparing);

        let err = book
            .update_status("ORD-001", CustomerOrderStatus::Pending)
            .unwrap_err();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::InvalidStatusTransition);

        book.update_status("ORD-001", CustomerOrderStatus::Delivered)
            .unwrap();
        assert!(book
            .update_status("ORD-001", CustomerOrderStatus::Cancelled)
            .is_err());

        assert!(matches!(
            book.update_status("ORD-404", CustomerOrderStatus::Ready),
            Err(OrderBookError::NotFound(_))
        ));
    }

    #[test]
    fn test_status_filter_and_history() {
        let book = create_test_book();
        book.update_status("ORD-002", CustomerOrderStatus::Cancelled)
            .unwrap();
        let cancelled = book.search(&OrderQuery {
            status: Some(CustomerOrderStatus::Cancelled),
            ..Default::default()
        });
        assert_eq!(ids(cancelled), vec!["ORD-002"]);

        assert_eq!(
            ids(book.history_for("amina@example.rw")),
            vec!["ORD-003", "ORD-001"]
        );
        assert!(book.history_for("nobody@example.rw").is_empty());
    }
}
