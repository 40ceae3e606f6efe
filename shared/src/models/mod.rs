//! Data models
//!
//! Shared between the sync layer and the engine crate. Document IDs are
//! `Option<String>`: `None` until the store assigns one on create.

pub mod category;
pub mod menu_item;
pub mod order;

// Re-exports
pub use category::*;
pub use menu_item::*;
pub use order::*;
