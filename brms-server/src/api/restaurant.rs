//! 餐厅资料路由 (只读)

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use shared::models::{MenuItem, RestaurantProfile};

use crate::core::ServerState;
use crate::utils::{ApiResponse, ok};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/restaurant", get(profile))
        .route("/api/restaurant/menu", get(menu))
}

#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
    #[serde(default)]
    pub available_only: bool,
}

#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub categories: Vec<String>,
    pub items: Vec<MenuItem>,
}

/// GET /api/restaurant - 餐厅资料
pub async fn profile(State(state): State<ServerState>) -> Json<ApiResponse<RestaurantProfile>> {
    Json(ok(state.restaurant.as_ref().clone()))
}

/// GET /api/restaurant/menu?category=&available_only= - 菜单
pub async fn menu(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> Json<ApiResponse<MenuResponse>> {
    let items = state
        .restaurant
        .menu_items(query.category.as_deref(), query.available_only)
        .into_iter()
        .cloned()
        .collect();
    let categories = state
        .restaurant
        .categories()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(ok(MenuResponse { categories, items }))
}
