//! Customer Order Model (order management and customer order history)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::kitchen::OrderType;

/// 顾客订单状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum CustomerOrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl CustomerOrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    fn step(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Confirmed => 1,
            Self::Preparing => 2,
            Self::Ready => 3,
            Self::Delivered => 4,
            Self::Cancelled => u8::MAX,
        }
    }

    /// Managers may skip steps forward but never move back
    pub fn can_transition_to(&self, next: CustomerOrderStatus) -> bool {
        if self.is_terminal() || *self == next {
            return false;
        }
        next == Self::Cancelled || next.step() > self.step()
    }
}

impl fmt::Display for CustomerOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Preparing => write!(f, "preparing"),
            Self::Ready => write!(f, "ready"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
}

/// 顾客订单
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerOrder {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub restaurant: String,
    pub items: Vec<OrderLine>,
    pub total: Decimal,
    pub status: CustomerOrderStatus,
    pub order_type: OrderType,
    /// Epoch millis
    pub created_at: i64,
    pub payment_method: String,
}

/// 排序字段
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderSortKey {
    #[default]
    Date,
    Total,
    Customer,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Order search parameters (also the query string of `GET /api/orders`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderQuery {
    /// Free text: id, customer name, email or item name
    pub q: Option<String>,
    pub status: Option<CustomerOrderStatus>,
    pub customer_email: Option<String>,
    #[serde(default)]
    pub sort: OrderSortKey,
    #[serde(default)]
    pub dir: SortDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_order_transitions() {
        use CustomerOrderStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Cancelled));
        assert!(!Ready.can_transition_to(Pending));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Preparing.can_transition_to(Preparing));
    }
}
