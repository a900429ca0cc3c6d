//! Finance API Module
//!
//! Ledger endpoints for the accountant, admin and manager dashboards.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Finance router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/finance", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Financial records
        .route(
            "/records",
            get(handler::list_records).post(handler::create_record),
        )
        .route("/records/summary", get(handler::record_summary))
        .route(
            "/records/{id}",
            get(handler::get_record)
                .put(handler::update_record)
                .delete(handler::delete_record),
        )
        // Invoices
        .route(
            "/invoices",
            get(handler::list_invoices).post(handler::create_invoice),
        )
        .route(
            "/invoices/{id}",
            get(handler::get_invoice)
                .put(handler::update_invoice)
                .delete(handler::delete_invoice),
        )
        .route("/invoices/{id}/pay", post(handler::pay_invoice))
        // Tax records
        .route("/taxes", get(handler::list_taxes).post(handler::create_tax))
        .route("/taxes/summary", get(handler::tax_summary))
        .route(
            "/taxes/{id}",
            get(handler::get_tax)
                .put(handler::update_tax)
                .delete(handler::delete_tax),
        )
        .route("/taxes/{id}/file", post(handler::file_tax))
        .route("/taxes/{id}/pay", post(handler::pay_tax))
}
