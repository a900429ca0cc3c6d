//! Kitchen API Module
//!
//! Kitchen board, notifications, staff and stations. `GET /events` streams
//! every board change as Server-Sent Events.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Kitchen router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/kitchen", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Orders
        .route("/orders", get(handler::list_orders).post(handler::create_order))
        .route("/orders/{id}", get(handler::get_order))
        .route("/orders/{id}/status", put(handler::update_status))
        .route("/orders/{id}/status/override", put(handler::override_status))
        .route(
            "/orders/{id}/items/{item_id}/status",
            put(handler::update_item_status),
        )
        .route("/orders/{id}/assign", put(handler::assign_order))
        // Board views
        .route("/queue", get(handler::queue))
        .route("/overdue", get(handler::overdue))
        .route("/stats", get(handler::stats))
        // Notifications
        .route(
            "/notifications",
            get(handler::list_notifications)
                .post(handler::add_notification)
                .delete(handler::clear_notifications),
        )
        .route("/notifications/read-all", put(handler::mark_all_read))
        .route("/notifications/{id}/read", put(handler::mark_read))
        // Staff & stations
        .route("/staff", get(handler::list_staff))
        .route("/staff/{id}/status", put(handler::update_staff_status))
        .route("/stations", get(handler::list_stations))
        .route("/stations/{id}/status", put(handler::update_station_status))
        // Change feed
        .route("/events", get(handler::events))
}
