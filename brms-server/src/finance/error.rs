use shared::error::{AppError, ErrorCode};
use shared::models::TaxStatus;
use thiserror::Error;

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Financial record not found: {0}")]
    RecordNotFound(String),

    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    #[error("Invoice already paid: {0}")]
    InvoiceAlreadyPaid(String),

    #[error("Invoice is cancelled: {0}")]
    InvoiceCancelled(String),

    #[error("Tax record not found: {0}")]
    TaxRecordNotFound(String),

    #[error("Tax already paid: {0}")]
    TaxAlreadyPaid(String),

    #[error("Tax record cannot move from {from} to {to}")]
    InvalidTaxTransition { from: TaxStatus, to: TaxStatus },

    #[error(transparent)]
    Invalid(#[from] AppError),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::RecordNotFound(id) => AppError::with_message(
                ErrorCode::FinancialRecordNotFound,
                format!("Financial record not found: {}", id),
            )
            .with_detail("record_id", id),
            LedgerError::InvoiceNotFound(id) => AppError::with_message(
                ErrorCode::InvoiceNotFound,
                format!("Invoice not found: {}", id),
            )
            .with_detail("invoice_id", id),
            LedgerError::InvoiceAlreadyPaid(id) => AppError::with_message(
                ErrorCode::InvoiceAlreadyPaid,
                format!("Invoice already paid: {}", id),
            )
            .with_detail("invoice_id", id),
            LedgerError::InvoiceCancelled(id) => AppError::with_message(
                ErrorCode::InvoiceCancelled,
                format!("Invoice is cancelled: {}", id),
            )
            .with_detail("invoice_id", id),
            LedgerError::TaxRecordNotFound(id) => AppError::with_message(
                ErrorCode::TaxRecordNotFound,
                format!("Tax record not found: {}", id),
            )
            .with_detail("tax_id", id),
            LedgerError::TaxAlreadyPaid(id) => AppError::with_message(
                ErrorCode::TaxAlreadyPaid,
                format!("Tax already paid: {}", id),
            )
            .with_detail("tax_id", id),
            LedgerError::InvalidTaxTransition { from, to } => {
                AppError::invalid_transition("Tax record", from, to)
            }
            LedgerError::Invalid(e) => e,
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
