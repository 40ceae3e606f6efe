//! Sales analytics
//!
//! Pure aggregation over the synced order list: same inputs, same
//! report, no side effects. Nothing in here returns an error; missing
//! optional data degrades to zeros and defaults.

pub mod date_range;
pub mod engine;

pub use date_range::{DateFilter, RangePreset};
pub use engine::{
    CategorySales, DailySales, ItemSales, PaymentMethodSales, Report, build_report,
    build_report_with_limit,
};
