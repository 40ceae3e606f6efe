//! Unified error system
//!
//! - [`ErrorCode`]: standardized error codes, grouped by domain range
//! - [`AppError`]: rich error type with code, message, and details
//! - [`AppResult`]: result alias used across the workspace
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 9xxx: System errors

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
