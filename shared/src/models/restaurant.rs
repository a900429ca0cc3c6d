//! Restaurant Profile Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpeningHours {
    pub day: String,
    pub open: String,
    pub close: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: Decimal,
    pub available: bool,
}

/// 餐厅资料
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestaurantProfile {
    pub id: String,
    pub name: String,
    pub cuisine: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub rating: f32,
    pub opening_hours: Vec<OpeningHours>,
    pub menu: Vec<MenuItem>,
}

impl RestaurantProfile {
    /// Menu filtered by category (case-insensitive) and availability
    pub fn menu_items(&self, category: Option<&str>, available_only: bool) -> Vec<&MenuItem> {
        self.menu
            .iter()
            .filter(|m| category.is_none_or(|c| m.category.eq_ignore_ascii_case(c)))
            .filter(|m| !available_only || m.available)
            .collect()
    }

    /// Distinct categories in menu order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.menu {
            if !seen.contains(&item.category.as_str()) {
                seen.push(item.category.as_str());
            }
        }
        seen
    }
}
