//! Shared types for the cafe POS workspace
//!
//! Domain models, error types, and small utilities used by both the
//! sync layer and the engine crate.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
