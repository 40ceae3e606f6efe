//! Cafe POS engine
//!
//! The order-entry and analytics core: cart state machine, checkout,
//! kitchen workflow, catalog operations, and the pure analytics engine,
//! all over the sync layer's [`pos_sync::DocumentStore`] contract.

pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod logger;
pub mod money;
pub mod payment;
pub mod workflow;

pub use analytics::{DateFilter, RangePreset, Report, build_report};
pub use cart::{Cart, CartTotals};
pub use catalog::CatalogService;
pub use checkout::{OrderInfo, checkout, open_ticket};
pub use config::Config;
pub use payment::UpiDetails;
pub use workflow::KitchenWorkflow;
