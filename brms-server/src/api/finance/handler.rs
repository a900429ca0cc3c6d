//! Finance API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use shared::models::{
    FinancialRecord, FinancialRecordCreate, FinancialRecordUpdate, FinancialSummary, Invoice,
    InvoiceCreate, InvoiceUpdate, TaxRecord, TaxRecordCreate, TaxRecordUpdate, TaxSummary,
};

use crate::core::ServerState;
use crate::finance::{InvoiceFilter, RecordFilter, TaxFilter};
use crate::utils::{ApiResponse, AppResult, ok, ok_with_message};

/// Body of the pay / file actions; `date` defaults to today
#[derive(Debug, Default, Deserialize)]
pub struct ActionDate {
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl ActionDate {
    fn or_today(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

// ========== Financial records ==========

/// GET /api/finance/records - 收支列表
pub async fn list_records(
    State(state): State<ServerState>,
    Query(filter): Query<RecordFilter>,
) -> Json<ApiResponse<Vec<FinancialRecord>>> {
    Json(ok(state.ledger.list_records(&filter)))
}

/// GET /api/finance/records/summary - 收支汇总
pub async fn record_summary(
    State(state): State<ServerState>,
    Query(filter): Query<RecordFilter>,
) -> Json<ApiResponse<FinancialSummary>> {
    Json(ok(state.ledger.financial_summary(&filter)))
}

/// GET /api/finance/records/{id}
pub async fn get_record(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<FinancialRecord>>> {
    Ok(Json(ok(state.ledger.get_record(&id)?)))
}

/// POST /api/finance/records
pub async fn create_record(
    State(state): State<ServerState>,
    Json(payload): Json<FinancialRecordCreate>,
) -> AppResult<Json<ApiResponse<FinancialRecord>>> {
    let record = state.ledger.create_record(payload)?;
    Ok(Json(ok_with_message("Record created", record)))
}

/// PUT /api/finance/records/{id}
pub async fn update_record(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<FinancialRecordUpdate>,
) -> AppResult<Json<ApiResponse<FinancialRecord>>> {
    Ok(Json(ok(state.ledger.update_record(&id, payload)?)))
}

/// DELETE /api/finance/records/{id}
pub async fn delete_record(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<FinancialRecord>>> {
    Ok(Json(ok_with_message(
        "Record deleted",
        state.ledger.delete_record(&id)?,
    )))
}

// ========== Invoices ==========

/// GET /api/finance/invoices - 发票列表
pub async fn list_invoices(
    State(state): State<ServerState>,
    Query(filter): Query<InvoiceFilter>,
) -> Json<ApiResponse<Vec<Invoice>>> {
    Json(ok(state.ledger.list_invoices(&filter)))
}

/// GET /api/finance/invoices/{id}
pub async fn get_invoice(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Invoice>>> {
    Ok(Json(ok(state.ledger.get_invoice(&id)?)))
}

/// POST /api/finance/invoices - 新建发票 (自动编号)
pub async fn create_invoice(
    State(state): State<ServerState>,
    Json(payload): Json<InvoiceCreate>,
) -> AppResult<Json<ApiResponse<Invoice>>> {
    let invoice = state.ledger.create_invoice(payload)?;
    Ok(Json(ok_with_message("Invoice created", invoice)))
}

/// PUT /api/finance/invoices/{id}
pub async fn update_invoice(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<InvoiceUpdate>,
) -> AppResult<Json<ApiResponse<Invoice>>> {
    Ok(Json(ok(state.ledger.update_invoice(&id, payload)?)))
}

/// DELETE /api/finance/invoices/{id}
pub async fn delete_invoice(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Invoice>>> {
    Ok(Json(ok_with_message(
        "Invoice deleted",
        state.ledger.delete_invoice(&id)?,
    )))
}

/// POST /api/finance/invoices/{id}/pay - 标记已付款
pub async fn pay_invoice(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ActionDate>,
) -> AppResult<Json<ApiResponse<Invoice>>> {
    Ok(Json(ok(state
        .ledger
        .mark_invoice_paid(&id, payload.or_today())?)))
}

// ========== Tax records ==========

/// GET /api/finance/taxes - 税务记录
pub async fn list_taxes(
    State(state): State<ServerState>,
    Query(filter): Query<TaxFilter>,
) -> Json<ApiResponse<Vec<TaxRecord>>> {
    Json(ok(state.ledger.list_taxes(&filter)))
}

/// GET /api/finance/taxes/summary - 税务汇总
pub async fn tax_summary(State(state): State<ServerState>) -> Json<ApiResponse<TaxSummary>> {
    Json(ok(state.ledger.tax_summary()))
}

/// GET /api/finance/taxes/{id}
pub async fn get_tax(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<TaxRecord>>> {
    Ok(Json(ok(state.ledger.get_tax(&id)?)))
}

/// POST /api/finance/taxes
pub async fn create_tax(
    State(state): State<ServerState>,
    Json(payload): Json<TaxRecordCreate>,
) -> AppResult<Json<ApiResponse<TaxRecord>>> {
    let tax = state.ledger.create_tax(payload)?;
    Ok(Json(ok_with_message("Tax record created", tax)))
}

/// PUT /api/finance/taxes/{id}
pub async fn update_tax(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TaxRecordUpdate>,
) -> AppResult<Json<ApiResponse<TaxRecord>>> {
    Ok(Json(ok(state.ledger.update_tax(&id, payload)?)))
}

/// DELETE /api/finance/taxes/{id}
pub async fn delete_tax(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<TaxRecord>>> {
    Ok(Json(ok_with_message(
        "Tax record deleted",
        state.ledger.delete_tax(&id)?,
    )))
}

/// POST /api/finance/taxes/{id}/file - 申报
pub async fn file_tax(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ActionDate>,
) -> AppResult<Json<ApiResponse<TaxRecord>>> {
    Ok(Json(ok(state.ledger.mark_tax_filed(&id, payload.or_today())?)))
}

/// POST /api/finance/taxes/{id}/pay - 缴税
pub async fn pay_tax(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ActionDate>,
) -> AppResult<Json<ApiResponse<TaxRecord>>> {
    Ok(Json(ok(state.ledger.mark_tax_paid(&id, payload.or_today())?)))
}
