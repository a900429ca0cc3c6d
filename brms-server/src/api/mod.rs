//! API 路由模块
//!
//! | 模块 | 前缀 | 说明 |
//! |------|------|------|
//! | [`health`] | /health | 健康检查 |
//! | [`kitchen`] | /api/kitchen | 厨房看板、通知、员工与档口 |
//! | [`finance`] | /api/finance | 收支、发票、税务 |
//! | [`orders`] | /api/orders | 顾客订单管理与历史 |
//! | [`checkout`] | /api/checkout | 购物车结算与金额格式化 |
//! | [`restaurant`] | /api/restaurant | 餐厅资料与菜单 |

pub mod checkout;
pub mod finance;
pub mod health;
pub mod kitchen;
pub mod orders;
pub mod restaurant;

use axum::Router;

use crate::core::ServerState;

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(kitchen::router())
        .merge(finance::router())
        .merge(orders::router())
        .merge(checkout::router())
        .merge(restaurant::router())
}
