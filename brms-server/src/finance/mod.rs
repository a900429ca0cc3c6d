//! Ledger - financial records, invoices and tax records
//!
//! Backs the accountant, admin and manager finance screens. Derived
//! amounts (`subtotal`, `tax`, `total`, `tax_due`) are recomputed by the
//! ledger on every write and never taken from the caller.

mod error;


pub use error::*;

use chrono::{Datelike, NaiveDate};
use parking_lot::RwLock;
use rust_decimal::prelude::*;
use serde::Deserialize;
use shared::models::{
    CategoryTotal, FinancialRecord, FinancialRecordCreate, FinancialRecordUpdate,
    FinancialSummary, Invoice, InvoiceCreate, InvoiceLine, InvoiceStatus, InvoiceUpdate,
    RecordKind, TaxRecord, TaxRecordCreate, TaxRecordUpdate, TaxStatus, TaxSummary, TaxType,
};
use shared::util::prefixed_id;
use std::collections::BTreeMap;

use crate::utils::AppError;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_amount,
    validate_optional_text, validate_percent, validate_quantity, validate_required_text,
};

/// Round to whole francs, half away from zero
fn round_rwf(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// `base × percent / 100`, rounded to whole francs
fn percent_of(base: Decimal, percent: Decimal) -> Decimal {
    round_rwf(base * percent / Decimal::ONE_HUNDRED)
}

/// Recompute invoice subtotal, tax and total
fn recompute_invoice(invoice: &mut Invoice) {
    invoice.subtotal = invoice.items.iter().map(InvoiceLine::amount).sum();
    invoice.tax = percent_of(invoice.subtotal, invoice.tax_rate);
    invoice.total = invoice.subtotal + invoice.tax;
}

fn validate_invoice_lines(items: &[InvoiceLine]) -> Result<(), AppError> {
    if items.is_empty() {
        return Err(AppError::validation("Invoice must have at least one line"));
    }
    for line in items {
        validate_required_text(&line.description, "items.description", MAX_NOTE_LEN)?;
        validate_amount(line.unit_price, "items.unit_price")?;
        validate_quantity(line.quantity, "items.quantity")?;
    }
    Ok(())
}

fn validate_dates(issue_date: NaiveDate, due_date: NaiveDate) -> Result<(), AppError> {
    if due_date < issue_date {
        return Err(AppError::validation(format!(
            "due_date {} is before issue_date {}",
            due_date, issue_date
        )));
    }
    Ok(())
}

// ========== Filters ==========

/// Financial record filter (all fields optional, inclusive date range)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordFilter {
    pub kind: Option<RecordKind>,
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl RecordFilter {
    fn matches(&self, record: &FinancialRecord) -> bool {
        self.kind.is_none_or(|k| record.kind == k)
            && self
                .category
                .as_deref()
                .is_none_or(|c| record.category.eq_ignore_ascii_case(c))
            && self.from.is_none_or(|d| record.date >= d)
            && self.to.is_none_or(|d| record.date <= d)
    }
}

/// Invoice filter: status plus free text on number / customer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    pub q: Option<String>,
}

impl InvoiceFilter {
    fn matches(&self, invoice: &Invoice) -> bool {
        let term = self
            .q
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);
        self.status.is_none_or(|s| invoice.status == s)
            && term.is_none_or(|t| {
                invoice.invoice_number.to_lowercase().contains(&t)
                    || invoice.customer_name.to_lowercase().contains(&t)
                    || invoice
                        .customer_email
                        .as_deref()
                        .is_some_and(|e| e.to_lowercase().contains(&t))
            })
    }
}

/// Tax record filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaxFilter {
    pub period: Option<String>,
    pub status: Option<TaxStatus>,
    pub tax_type: Option<TaxType>,
}

impl TaxFilter {
    fn matches(&self, tax: &TaxRecord) -> bool {
        self.period.as_deref().is_none_or(|p| tax.period == p)
            && self.status.is_none_or(|s| tax.status == s)
            && self.tax_type.is_none_or(|t| tax.tax_type == t)
    }
}

// ========== Ledger ==========

#[derive(Debug, Default)]
struct LedgerInner {
    records: Vec<FinancialRecord>,
    invoices: Vec<Invoice>,
    taxes: Vec<TaxRecord>,
    invoice_seq: u32,
}

/// In-memory ledger
#[derive(Debug, Default)]
pub struct Ledger {
    inner: RwLock<LedgerInner>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger preloaded with existing data; derived amounts are recomputed
    pub fn with_data(
        records: Vec<FinancialRecord>,
        mut invoices: Vec<Invoice>,
        mut taxes: Vec<TaxRecord>,
    ) -> Self {
        invoices.iter_mut().for_each(recompute_invoice);
        for tax in taxes.iter_mut() {
            tax.tax_due = percent_of(tax.taxable_amount, tax.rate);
        }
        Self {
            inner: RwLock::new(LedgerInner {
                invoice_seq: invoices.len() as u32,
                records,
                invoices,
                taxes,
            }),
        }
    }

    // ========== Financial records ==========

    /// Records matching the filter, newest first
    pub fn list_records(&self, filter: &RecordFilter) -> Vec<FinancialRecord> {
        let mut records: Vec<FinancialRecord> = self
            .inner
            .read()
            .records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    pub fn get_record(&self, id: &str) -> LedgerResult<FinancialRecord> {
        self.inner
            .read()
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| LedgerError::RecordNotFound(id.to_string()))
    }

    pub fn create_record(&self, data: FinancialRecordCreate) -> LedgerResult<FinancialRecord> {
        validate_required_text(&data.category, "category", MAX_NAME_LEN)?;
        validate_required_text(&data.description, "description", MAX_NOTE_LEN)?;
        validate_required_text(&data.payment_method, "payment_method", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.reference, "reference", MAX_SHORT_TEXT_LEN)?;
        validate_amount(data.amount, "amount")?;

        let record = FinancialRecord {
            id: prefixed_id("fin"),
            date: data.date,
            kind: data.kind,
            category: data.category,
            description: data.description,
            amount: data.amount,
            payment_method: data.payment_method,
            reference: data.reference,
        };
        self.inner.write().records.push(record.clone());
        tracing::info!(record_id = %record.id, kind = ?record.kind, amount = %record.amount, "Financial record created");
        Ok(record)
    }

    pub fn update_record(
        &self,
        id: &str,
        data: FinancialRecordUpdate,
    ) -> LedgerResult<FinancialRecord> {
        if let Some(category) = &data.category {
            validate_required_text(category, "category", MAX_NAME_LEN)?;
        }
        if let Some(description) = &data.description {
            validate_required_text(description, "description", MAX_NOTE_LEN)?;
        }
        if let Some(method) = &data.payment_method {
            validate_required_text(method, "payment_method", MAX_SHORT_TEXT_LEN)?;
        }
        validate_optional_text(&data.reference, "reference", MAX_SHORT_TEXT_LEN)?;
        if let Some(amount) = data.amount {
            validate_amount(amount, "amount")?;
        }

        let mut inner = self.inner.write();
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| LedgerError::RecordNotFound(id.to_string()))?;

        if let Some(v) = data.date {
            record.date = v;
        }
        if let Some(v) = data.kind {
            record.kind = v;
        }
        if let Some(v) = data.category {
            record.category = v;
        }
        if let Some(v) = data.description {
            record.description = v;
        }
        if let Some(v) = data.amount {
            record.amount = v;
        }
        if let Some(v) = data.payment_method {
            record.payment_method = v;
        }
        if data.reference.is_some() {
            record.reference = data.reference;
        }
        Ok(record.clone())
    }

    pub fn delete_record(&self, id: &str) -> LedgerResult<FinancialRecord> {
        let mut inner = self.inner.write();
        let pos = inner
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| LedgerError::RecordNotFound(id.to_string()))?;
        tracing::info!(record_id = %id, "Financial record deleted");
        Ok(inner.records.remove(pos))
    }

    /// Income, expense, net profit and per-category totals
    pub fn financial_summary(&self, filter: &RecordFilter) -> FinancialSummary {
        let inner = self.inner.read();
        let mut summary = FinancialSummary::default();
        let mut by_category: BTreeMap<(String, &'static str), (RecordKind, Decimal)> =
            BTreeMap::new();

        for record in inner.records.iter().filter(|r| filter.matches(r)) {
            summary.record_count += 1;
            let kind_key = match record.kind {
                RecordKind::Income => {
                    summary.total_income += record.amount;
                    "income"
                }
                RecordKind::Expense => {
                    summary.total_expense += record.amount;
                    "expense"
                }
            };
            by_category
                .entry((record.category.clone(), kind_key))
                .or_insert((record.kind, Decimal::ZERO))
                .1 += record.amount;
        }

        summary.net_profit = summary.total_income - summary.total_expense;
        summary.by_category = by_category
            .into_iter()
            .map(|((category, _), (kind, total))| CategoryTotal {
                category,
                kind,
                total,
            })
            .collect();
        summary
    }

    // ========== Invoices ==========

    /// Invoices matching the filter, newest issue date first
    pub fn list_invoices(&self, filter: &InvoiceFilter) -> Vec<Invoice> {
        let mut invoices: Vec<Invoice> = self
            .inner
            .read()
            .invoices
            .iter()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect();
        invoices.sort_by(|a, b| b.issue_date.cmp(&a.issue_date));
        invoices
    }

    pub fn get_invoice(&self, id: &str) -> LedgerResult<Invoice> {
        self.inner
            .read()
            .invoices
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| LedgerError::InvoiceNotFound(id.to_string()))
    }

    /// Create an invoice numbered `INV-<issue year>-NNNN`
    pub fn create_invoice(&self, data: InvoiceCreate) -> LedgerResult<Invoice> {
        validate_required_text(&data.customer_name, "customer_name", MAX_NAME_LEN)?;
        validate_optional_text(&data.customer_email, "customer_email", MAX_EMAIL_LEN)?;
        validate_invoice_lines(&data.items)?;
        validate_percent(data.tax_rate, "tax_rate")?;
        validate_dates(data.issue_date, data.due_date)?;
        if data.status == InvoiceStatus::Paid {
            return Err(AppError::validation("Use the pay action to mark an invoice paid").into());
        }

        let mut inner = self.inner.write();
        inner.invoice_seq += 1;
        let mut invoice = Invoice {
            id: prefixed_id("inv"),
            invoice_number: format!("INV-{}-{:04}", data.issue_date.year(), inner.invoice_seq),
            customer_name: data.customer_name,
            customer_email: data.customer_email,
            issue_date: data.issue_date,
            due_date: data.due_date,
            items: data.items,
            tax_rate: data.tax_rate,
            status: data.status,
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            paid_date: None,
        };
        recompute_invoice(&mut invoice);
        inner.invoices.push(invoice.clone());
        tracing::info!(invoice_number = %invoice.invoice_number, total = %invoice.total, "Invoice created");
        Ok(invoice)
    }

    /// Edit an open invoice; paid and cancelled invoices are frozen
    pub fn update_invoice(&self, id: &str, data: InvoiceUpdate) -> LedgerResult<Invoice> {
        if let Some(name) = &data.customer_name {
            validate_required_text(name, "customer_name", MAX_NAME_LEN)?;
        }
        validate_optional_text(&data.customer_email, "customer_email", MAX_EMAIL_LEN)?;
        if let Some(items) = &data.items {
            validate_invoice_lines(items)?;
        }
        if let Some(rate) = data.tax_rate {
            validate_percent(rate, "tax_rate")?;
        }
        if data.status == Some(InvoiceStatus::Paid) {
            return Err(AppError::validation("Use the pay action to mark an invoice paid").into());
        }

        let mut inner = self.inner.write();
        let invoice = inner
            .invoices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| LedgerError::InvoiceNotFound(id.to_string()))?;
        match invoice.status {
            InvoiceStatus::Paid => return Err(LedgerError::InvoiceAlreadyPaid(id.to_string())),
            InvoiceStatus::Cancelled => return Err(LedgerError::InvoiceCancelled(id.to_string())),
            _ => {}
        }
        validate_dates(
            data.issue_date.unwrap_or(invoice.issue_date),
            data.due_date.unwrap_or(invoice.due_date),
        )?;

        if let Some(v) = data.customer_name {
            invoice.customer_name = v;
        }
        if data.customer_email.is_some() {
            invoice.customer_email = data.customer_email;
        }
        if let Some(v) = data.issue_date {
            invoice.issue_date = v;
        }
        if let Some(v) = data.due_date {
            invoice.due_date = v;
        }
        if let Some(v) = data.items {
            invoice.items = v;
        }
        if let Some(v) = data.tax_rate {
            invoice.tax_rate = v;
        }
        if let Some(v) = data.status {
            invoice.status = v;
        }
        recompute_invoice(invoice);
        Ok(invoice.clone())
    }

    pub fn delete_invoice(&self, id: &str) -> LedgerResult<Invoice> {
        let mut inner = self.inner.write();
        let pos = inner
            .invoices
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| LedgerError::InvoiceNotFound(id.to_string()))?;
        tracing::info!(invoice_id = %id, "Invoice deleted");
        Ok(inner.invoices.remove(pos))
    }

    pub fn mark_invoice_paid(&self, id: &str, paid_date: NaiveDate) -> LedgerResult<Invoice> {
        let mut inner = self.inner.write();
        let invoice = inner
            .invoices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| LedgerError::InvoiceNotFound(id.to_string()))?;
        match invoice.status {
            InvoiceStatus::Paid => Err(LedgerError::InvoiceAlreadyPaid(id.to_string())),
            InvoiceStatus::Cancelled => Err(LedgerError::InvoiceCancelled(id.to_string())),
            _ => {
                invoice.status = InvoiceStatus::Paid;
                invoice.paid_date = Some(paid_date);
                tracing::info!(invoice_number = %invoice.invoice_number, "Invoice paid");
                Ok(invoice.clone())
            }
        }
    }

    /// Flag sent invoices past their due date as overdue; returns how many changed
    pub fn refresh_overdue(&self, today: NaiveDate) -> usize {
        let mut inner = self.inner.write();
        let mut changed = 0;
        for invoice in inner
            .invoices
            .iter_mut()
            .filter(|i| i.status == InvoiceStatus::Sent && i.due_date < today)
        {
            invoice.status = InvoiceStatus::Overdue;
            changed += 1;
        }
        if changed > 0 {
            tracing::info!(count = changed, "Invoices marked overdue");
        }
        changed
    }

    // ========== Tax records ==========

    /// Tax records matching the filter, earliest due first
    pub fn list_taxes(&self, filter: &TaxFilter) -> Vec<TaxRecord> {
        let mut taxes: Vec<TaxRecord> = self
            .inner
            .read()
            .taxes
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        taxes.sort_by(|a, b| a.due_date.cmp(&b.due_date));
        taxes
    }

    pub fn get_tax(&self, id: &str) -> LedgerResult<TaxRecord> {
        self.inner
            .read()
            .taxes
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| LedgerError::TaxRecordNotFound(id.to_string()))
    }

    pub fn create_tax(&self, data: TaxRecordCreate) -> LedgerResult<TaxRecord> {
        validate_required_text(&data.period, "period", MAX_SHORT_TEXT_LEN)?;
        validate_amount(data.taxable_amount, "taxable_amount")?;
        validate_percent(data.rate, "rate")?;

        let tax = TaxRecord {
            id: prefixed_id("tax"),
            tax_due: percent_of(data.taxable_amount, data.rate),
            period: data.period,
            tax_type: data.tax_type,
            taxable_amount: data.taxable_amount,
            rate: data.rate,
            due_date: data.due_date,
            status: TaxStatus::Pending,
            filed_date: None,
        };
        self.inner.write().taxes.push(tax.clone());
        tracing::info!(tax_id = %tax.id, period = %tax.period, tax_due = %tax.tax_due, "Tax record created");
        Ok(tax)
    }

    pub fn update_tax(&self, id: &str, data: TaxRecordUpdate) -> LedgerResult<TaxRecord> {
        if let Some(period) = &data.period {
            validate_required_text(period, "period", MAX_SHORT_TEXT_LEN)?;
        }
        if let Some(amount) = data.taxable_amount {
            validate_amount(amount, "taxable_amount")?;
        }
        if let Some(rate) = data.rate {
            validate_percent(rate, "rate")?;
        }

        let mut inner = self.inner.write();
        let tax = inner
            .taxes
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| LedgerError::TaxRecordNotFound(id.to_string()))?;
        if tax.status == TaxStatus::Paid {
            return Err(LedgerError::TaxAlreadyPaid(id.to_string()));
        }

        if let Some(v) = data.period {
            tax.period = v;
        }
        if let Some(v) = data.tax_type {
            tax.tax_type = v;
        }
        if let Some(v) = data.taxable_amount {
            tax.taxable_amount = v;
        }
        if let Some(v) = data.rate {
            tax.rate = v;
        }
        if let Some(v) = data.due_date {
            tax.due_date = v;
        }
        tax.tax_due = percent_of(tax.taxable_amount, tax.rate);
        Ok(tax.clone())
    }

    pub fn delete_tax(&self, id: &str) -> LedgerResult<TaxRecord> {
        let mut inner = self.inner.write();
        let pos = inner
            .taxes
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LedgerError::TaxRecordNotFound(id.to_string()))?;
        tracing::info!(tax_id = %id, "Tax record deleted");
        Ok(inner.taxes.remove(pos))
    }

    /// pending → filed
    pub fn mark_tax_filed(&self, id: &str, filed_date: NaiveDate) -> LedgerResult<TaxRecord> {
        self.set_tax_status(id, TaxStatus::Filed, filed_date)
    }

    /// pending | filed → paid
    pub fn mark_tax_paid(&self, id: &str, paid_date: NaiveDate) -> LedgerResult<TaxRecord> {
        self.set_tax_status(id, TaxStatus::Paid, paid_date)
    }

    fn set_tax_status(&self, id: &str, to: TaxStatus, date: NaiveDate) -> LedgerResult<TaxRecord> {
        let mut inner = self.inner.write();
        let tax = inner
            .taxes
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| LedgerError::TaxRecordNotFound(id.to_string()))?;

        match (tax.status, to) {
            (TaxStatus::Paid, _) => return Err(LedgerError::TaxAlreadyPaid(id.to_string())),
            (TaxStatus::Pending, TaxStatus::Filed)
            | (TaxStatus::Pending | TaxStatus::Filed, TaxStatus::Paid) => {}
            (from, to) => return Err(LedgerError::InvalidTaxTransition { from, to }),
        }

        tax.status = to;
        // paying an unfiled record files it on the same day
        tax.filed_date.get_or_insert(date);
        tracing::info!(tax_id = %id, status = %to, "Tax record status changed");
        Ok(tax.clone())
    }

    /// Due, paid and outstanding tax across all records
    pub fn tax_summary(&self) -> TaxSummary {
        let inner = self.inner.read();
        let mut summary = TaxSummary::default();
        for tax in &inner.taxes {
            summary.total_due += tax.tax_due;
            match tax.status {
                TaxStatus::Pending => summary.pending_count += 1,
                TaxStatus::Filed => summary.filed_count += 1,
                TaxStatus::Paid => {
                    summary.paid_count += 1;
                    summary.total_paid += tax.tax_due;
                }
            }
        }
        summary.outstanding = summary.total_due - summary.total_paid;
        summary
    }
}
