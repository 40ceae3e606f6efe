//! Error codes shared across the POS workspace
//!
//! Codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 for efficient serialization and cross-language
/// compatibility (Rust, TypeScript, etc.)
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

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Session has expired
    SessionExpired = 1005,

    // ==================== 4xxx: Order ====================
    /// Checkout attempted with an empty cart
    CartEmpty = 4001,
    /// Order status transition is not allowed
    InvalidStatusTransition = 4002,
    /// Order not found
    OrderNotFound = 4003,

    // ==================== 5xxx: Payment ====================
    /// Payment encoding failed (QR generation)
    PaymentEncodingFailed = 5001,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Document store operation failed
    StoreError = 9002,
}

impl ErrorCode {
    /// Default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::NotAuthenticated => "User is not authenticated",
            Self::SessionExpired => "Session has expired",
            Self::CartEmpty => "Cart is empty",
            Self::InvalidStatusTransition => "Order status transition is not allowed",
            Self::OrderNotFound => "Order not found",
            Self::PaymentEncodingFailed => "Payment encoding failed",
            Self::InternalError => "Internal error",
            Self::StoreError => "Document store operation failed",
        }
    }

    /// Numeric representation
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.as_u16())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::AlreadyExists),
            5 => Ok(Self::InvalidRequest),
            1001 => Ok(Self::NotAuthenticated),
            1005 => Ok(Self::SessionExpired),
            4001 => Ok(Self::CartEmpty),
            4002 => Ok(Self::InvalidStatusTransition),
            4003 => Ok(Self::OrderNotFound),
            5001 => Ok(Self::PaymentEncodingFailed),
            9001 => Ok(Self::InternalError),
            9002 => Ok(Self::StoreError),
            other => Err(InvalidErrorCode(other)),
        }
    }
}
