//! 结算路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/checkout/totals | POST | 购物车合计 (税 8%、服务费 5%、可选折扣) |
//! | /api/checkout/format?amount= | GET | 金额格式化，如 `RWF 1,000` |

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::checkout::{
    CartItem, CartTotals, calculate_cart_totals, calculate_cart_totals_with_discount,
    format_currency_with_code, validate_cart_item,
};
use std::str::FromStr;

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppError, AppResult, ok};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/checkout/totals", post(totals))
        .route("/api/checkout/format", get(format_amount))
}

#[derive(Debug, Deserialize)]
pub struct TotalsRequest {
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub discount_percent: Option<Decimal>,
}

/// Totals as shown to the customer
#[derive(Debug, Serialize)]
pub struct FormattedTotals {
    pub subtotal: String,
    pub tax: String,
    pub service_charge: String,
    pub discount: String,
    pub total: String,
}

#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    pub totals: CartTotals,
    pub formatted: FormattedTotals,
}

/// POST /api/checkout/totals - 计算购物车合计
pub async fn totals(
    State(state): State<ServerState>,
    Json(payload): Json<TotalsRequest>,
) -> AppResult<Json<ApiResponse<TotalsResponse>>> {
    let totals = match payload.discount_percent {
        Some(percent) => calculate_cart_totals_with_discount(&payload.items, percent)?,
        None => {
            for item in &payload.items {
                validate_cart_item(item)?;
            }
            calculate_cart_totals(&payload.items)
        }
    };

    let code = state.config.currency_code.as_str();
    let formatted = FormattedTotals {
        subtotal: format_currency_with_code(totals.subtotal, code),
        tax: format_currency_with_code(totals.tax, code),
        service_charge: format_currency_with_code(totals.service_charge, code),
        discount: format_currency_with_code(totals.discount, code),
        total: format_currency_with_code(totals.total, code),
    };
    Ok(Json(ok(TotalsResponse { totals, formatted })))
}

#[derive(Debug, Deserialize)]
pub struct FormatQuery {
    pub amount: String,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub amount: Decimal,
    pub formatted: String,
}

/// GET /api/checkout/format?amount= - 金额格式化
pub async fn format_amount(
    State(state): State<ServerState>,
    Query(query): Query<FormatQuery>,
) -> AppResult<Json<ApiResponse<FormatResponse>>> {
    let amount = Decimal::from_str(query.amount.trim()).map_err(|_| {
        AppError::validation(format!("amount is not a number: {}", query.amount))
            .with_detail("field", "amount")
    })?;
    Ok(Json(ok(FormatResponse {
        amount,
        formatted: format_currency_with_code(amount, &state.config.currency_code),
    })))
}
