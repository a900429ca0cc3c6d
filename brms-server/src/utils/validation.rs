//! Input validation helpers
//!
//! Centralized text length constants and validation functions shared by
//! the kitchen, ledger and order book stores.

use rust_decimal::Decimal;

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: customers, menu items, categories, staff
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, notification messages
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: periods, references, payment methods
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

// ── Numeric limits ──────────────────────────────────────────────────

/// Largest money amount a ledger entry may carry (RWF 1,000,000,000,000)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Largest quantity on a single line
pub const MAX_QUANTITY: u32 = 9999;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")).with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that a money amount is not negative
pub fn validate_non_negative(value: Decimal, field: &str) -> Result<(), AppError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(
            AppError::validation(format!("{field} must be non-negative, got {value}"))
                .with_detail("field", field),
        );
    }
    Ok(())
}

/// Validate a money amount in [0, MAX_AMOUNT]
pub fn validate_amount(value: Decimal, field: &str) -> Result<(), AppError> {
    validate_non_negative(value, field)?;
    if value > MAX_AMOUNT {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} exceeds maximum allowed ({MAX_AMOUNT}), got {value}"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate a line quantity in [1, MAX_QUANTITY]
pub fn validate_quantity(value: u32, field: &str) -> Result<(), AppError> {
    if value == 0 {
        return Err(
            AppError::validation(format!("{field} must be positive")).with_detail("field", field),
        );
    }
    if value > MAX_QUANTITY {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} exceeds maximum allowed ({MAX_QUANTITY}), got {value}"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate a percentage in [0, 100]
pub fn validate_percent(value: Decimal, field: &str) -> Result<(), AppError> {
    validate_non_negative(value, field)?;
    if value > Decimal::ONE_HUNDRED {
        return Err(
            AppError::validation(format!("{field} must be between 0 and 100, got {value}"))
                .with_detail("field", field),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Amina", "customer_name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "customer_name", MAX_NAME_LEN).is_err());
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let err = validate_required_text(&long, "customer_name", MAX_NAME_LEN).unwrap_err();
        assert!(err.message.contains("too long"));
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "notes", 5).is_ok());
        assert!(validate_optional_text(&Some("abc".into()), "notes", 5).is_ok());
        assert!(validate_optional_text(&Some("abcdef".into()), "notes", 5).is_err());
    }

    #[test]
    fn test_amounts() {
        assert!(validate_non_negative(Decimal::ZERO, "amount").is_ok());
        assert!(validate_non_negative(Decimal::NEGATIVE_ONE, "amount").is_err());
        assert!(validate_percent(Decimal::ONE_HUNDRED, "rate").is_ok());
        assert!(validate_percent(Decimal::from(101), "rate").is_err());
    }

    #[test]
    fn test_amount_bounds() {
        assert_eq!(MAX_AMOUNT, Decimal::from(1_000_000_000_000_i64));
        assert!(validate_amount(MAX_AMOUNT, "amount").is_ok());
        let err = validate_amount(MAX_AMOUNT + Decimal::ONE, "amount").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
        let err = validate_amount(Decimal::NEGATIVE_ONE, "amount").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_quantity(1, "quantity").is_ok());
        assert!(validate_quantity(MAX_QUANTITY, "quantity").is_ok());
        assert_eq!(
            validate_quantity(0, "quantity").unwrap_err().code,
            ErrorCode::ValidationFailed
        );
        assert_eq!(
            validate_quantity(MAX_QUANTITY + 1, "quantity").unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
    }
}
