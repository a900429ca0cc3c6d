//! Checkout money helpers
//!
//! All arithmetic is done in `Decimal`. RWF has no minor unit, so display
//! values are rounded to whole francs while totals keep full precision.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};

/// VAT applied at checkout (8%)
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Service charge applied at checkout (5%)
pub const SERVICE_CHARGE_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Default display currency
pub const DEFAULT_CURRENCY: &str = "RWF";

/// Maximum allowed unit price (RWF 100,000,000)
const MAX_PRICE: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);
/// Maximum allowed quantity per line
const MAX_QUANTITY: u32 = 9999;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Totals shown on the checkout review step
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub service_charge: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub item_count: u32,
}

/// Validate a cart line before it enters any total
pub fn validate_cart_item(item: &CartItem) -> AppResult<()> {
    if item.price.is_sign_negative() {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("price must be non-negative, got {}", item.price),
        )
        .with_detail("item_id", item.id.clone()));
    }
    if item.price > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("price exceeds maximum allowed ({}), got {}", MAX_PRICE, item.price),
        )
        .with_detail("item_id", item.id.clone()));
    }
    if item.quantity == 0 || item.quantity > MAX_QUANTITY {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!(
                "quantity must be between 1 and {}, got {}",
                MAX_QUANTITY, item.quantity
            ),
        )
        .with_detail("item_id", item.id.clone()));
    }
    Ok(())
}

/// Cart totals with no discount
///
/// `total = subtotal + tax + service_charge - discount`, `tax = subtotal * 0.08`.
pub fn calculate_cart_totals(items: &[CartItem]) -> CartTotals {
    totals_with_discount(items, Decimal::ZERO)
}

/// Cart totals with a percentage discount (0–100) taken off the subtotal
pub fn calculate_cart_totals_with_discount(
    items: &[CartItem],
    discount_percent: Decimal,
) -> AppResult<CartTotals> {
    if discount_percent.is_sign_negative() || discount_percent > Decimal::ONE_HUNDRED {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!(
                "discount_percent must be between 0 and 100, got {}",
                discount_percent
            ),
        ));
    }
    for item in items {
        validate_cart_item(item)?;
    }
    Ok(totals_with_discount(items, discount_percent))
}

fn totals_with_discount(items: &[CartItem], discount_percent: Decimal) -> CartTotals {
    let subtotal: Decimal = items.iter().map(CartItem::line_total).sum();
    let tax = subtotal * TAX_RATE;
    let service_charge = subtotal * SERVICE_CHARGE_RATE;
    let discount = subtotal * discount_percent / Decimal::ONE_HUNDRED;
    CartTotals {
        subtotal,
        tax,
        service_charge,
        discount,
        total: subtotal + tax + service_charge - discount,
        item_count: items.iter().map(|i| i.quantity).sum(),
    }
}

/// Format an amount as RWF, e.g. `RWF 1,000`
///
/// Rounded half away from zero to whole francs; never prints a decimal point.
pub fn format_currency(amount: impl Into<Decimal>) -> String {
    format_currency_with_code(amount, DEFAULT_CURRENCY)
}

/// Same as [`format_currency`] with an explicit currency prefix
pub fn format_currency_with_code(amount: impl Into<Decimal>, code: &str) -> String {
    let rounded = amount
        .into()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();
    format!("{}{} {}", sign, code, group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
