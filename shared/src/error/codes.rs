//! Unified error codes for BRMS
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors (kitchen orders and customer orders)
//! - 5xxx: Finance errors (records, invoices, taxes)
//! - 7xxx: Kitchen errors (staff, stations, notifications)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with the dashboard frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order item not found
    OrderItemNotFound = 4006,
    /// Order is empty
    OrderEmpty = 4007,
    /// Status change not allowed from the current status
    InvalidStatusTransition = 4010,
    /// Order is served or cancelled and can no longer change
    OrderClosed = 4011,

    // ==================== 5xxx: Finance ====================
    /// Financial record not found
    FinancialRecordNotFound = 5001,
    /// Invoice not found
    InvoiceNotFound = 5101,
    /// Invoice has already been paid
    InvoiceAlreadyPaid = 5102,
    /// Invoice has been cancelled
    InvoiceCancelled = 5103,
    /// Tax record not found
    TaxRecordNotFound = 5201,
    /// Tax record has already been paid
    TaxAlreadyPaid = 5202,

    // ==================== 7xxx: Kitchen ====================
    /// Kitchen staff member not found
    StaffNotFound = 7001,
    /// Kitchen station not found
    StationNotFound = 7002,
    /// Notification not found
    NotificationNotFound = 7003,
    /// Staff member cannot take orders right now
    StaffUnavailable = 7004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderItemNotFound => "Order item not found",
            ErrorCode::OrderEmpty => "Order is empty",
            ErrorCode::InvalidStatusTransition => "Status transition is not allowed",
            ErrorCode::OrderClosed => "Order is closed",

            // Finance
            ErrorCode::FinancialRecordNotFound => "Financial record not found",
            ErrorCode::InvoiceNotFound => "Invoice not found",
            ErrorCode::InvoiceAlreadyPaid => "Invoice has already been paid",
            ErrorCode::InvoiceCancelled => "Invoice has been cancelled",
            ErrorCode::TaxRecordNotFound => "Tax record not found",
            ErrorCode::TaxAlreadyPaid => "Tax record has already been paid",

            // Kitchen
            ErrorCode::StaffNotFound => "Kitchen staff member not found",
            ErrorCode::StationNotFound => "Kitchen station not found",
            ErrorCode::NotificationNotFound => "Notification not found",
            ErrorCode::StaffUnavailable => "Staff member is not available",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4006 => Ok(ErrorCode::OrderItemNotFound),
            4007 => Ok(ErrorCode::OrderEmpty),
            4010 => Ok(ErrorCode::InvalidStatusTransition),
            4011 => Ok(ErrorCode::OrderClosed),

            // Finance
            5001 => Ok(ErrorCode::FinancialRecordNotFound),
            5101 => Ok(ErrorCode::InvoiceNotFound),
            5102 => Ok(ErrorCode::InvoiceAlreadyPaid),
            5103 => Ok(ErrorCode::InvoiceCancelled),
            5201 => Ok(ErrorCode::TaxRecordNotFound),
            5202 => Ok(ErrorCode::TaxAlreadyPaid),

            // Kitchen
            7001 => Ok(ErrorCode::StaffNotFound),
            7002 => Ok(ErrorCode::StationNotFound),
            7003 => Ok(ErrorCode::NotificationNotFound),
            7004 => Ok(ErrorCode::StaffUnavailable),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::InvoiceNotFound.code(), 5101);
        assert_eq!(ErrorCode::StaffNotFound.code(), 7001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_u16() {
        assert_eq!(ErrorCode::try_from(4010), Ok(ErrorCode::InvalidStatusTransition));
        assert_eq!(ErrorCode::try_from(5202), Ok(ErrorCode::TaxAlreadyPaid));
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderClosed).unwrap();
        assert_eq!(json, "4011");

        let code: ErrorCode = serde_json::from_str("7003").unwrap();
        assert_eq!(code, ErrorCode::NotificationNotFound);

        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::NotFound.is_success());
    }
}
