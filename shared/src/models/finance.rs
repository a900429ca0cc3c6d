//! Finance Models (accountant / admin / manager dashboards)
//!
//! Amounts are RWF held as `Decimal`; totals are always derived, never
//! accepted from the client.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Financial records
// ============================================================================

/// 收支类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Income,
    Expense,
}

/// 收支记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialRecord {
    pub id: String,
    pub date: NaiveDate,
    pub kind: RecordKind,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Create financial record payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialRecordCreate {
    pub date: NaiveDate,
    pub kind: RecordKind,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub payment_method: String,
    pub reference: Option<String>,
}

/// Update financial record payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialRecordUpdate {
    pub date: Option<NaiveDate>,
    pub kind: Option<RecordKind>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub payment_method: Option<String>,
    pub reference: Option<String>,
}

/// 收支汇总
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FinancialSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_profit: Decimal,
    pub record_count: usize,
    /// (category, signed total) sorted by category
    pub by_category: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub kind: RecordKind,
    pub total: Decimal,
}

// ============================================================================
// Invoices
// ============================================================================

/// 发票状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Sent => write!(f, "sent"),
            Self::Paid => write!(f, "paid"),
            Self::Overdue => write!(f, "overdue"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceLine {
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl InvoiceLine {
    pub fn amount(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// 发票
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    pub customer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub items: Vec<InvoiceLine>,
    /// Percent, e.g. 18 for 18% VAT
    pub tax_rate: Decimal,
    pub status: InvoiceStatus,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
}

/// Create invoice payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceCreate {
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub items: Vec<InvoiceLine>,
    pub tax_rate: Decimal,
    #[serde(default)]
    pub status: InvoiceStatus,
}

/// Update invoice payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceUpdate {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub items: Option<Vec<InvoiceLine>>,
    pub tax_rate: Option<Decimal>,
    pub status: Option<InvoiceStatus>,
}

// ============================================================================
// Tax records
// ============================================================================

/// 税种
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaxType {
    Vat,
    Income,
    Payroll,
    Withholding,
}

/// 申报状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaxStatus {
    #[default]
    Pending,
    Filed,
    Paid,
}

impl fmt::Display for TaxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Filed => write!(f, "filed"),
            Self::Paid => write!(f, "paid"),
        }
    }
}

/// 税务记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxRecord {
    pub id: String,
    /// e.g. "2024-Q1"
    pub period: String,
    pub tax_type: TaxType,
    pub taxable_amount: Decimal,
    /// Percent
    pub rate: Decimal,
    pub tax_due: Decimal,
    pub due_date: NaiveDate,
    pub status: TaxStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filed_date: Option<NaiveDate>,
}

/// Create tax record payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRecordCreate {
    pub period: String,
    pub tax_type: TaxType,
    pub taxable_amount: Decimal,
    pub rate: Decimal,
    pub due_date: NaiveDate,
}

/// Update tax record payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxRecordUpdate {
    pub period: Option<String>,
    pub tax_type: Option<TaxType>,
    pub taxable_amount: Option<Decimal>,
    pub rate: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
}

/// 税务汇总
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaxSummary {
    pub total_due: Decimal,
    pub total_paid: Decimal,
    pub outstanding: Decimal,
    pub pending_count: usize,
    pub filed_count: usize,
    pub paid_count: usize,
}
