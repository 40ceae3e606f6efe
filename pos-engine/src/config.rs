//! Runtime configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | STORE_NAME | Corner Cafe | Display name on receipts and QR codes |
//! | UPI_PAYEE_ADDRESS | cafe@okbank | UPI virtual payment address |
//! | UPI_PAYEE_NAME | (STORE_NAME) | Payee display name |
//! | CURRENCY | INR | ISO currency code for payment URIs |
//! | DATA_DIR | ./data | Session cache and log directory |
//! | LOG_LEVEL | info | Tracing level filter |
//! | TOP_ITEMS_LIMIT | 10 | Entries in the top-items roll-up |

use crate::analytics::engine::DEFAULT_TOP_ITEMS;
use crate::payment::UpiDetails;

#[derive(Debug, Clone)]
pub struct Config {
    pub store_name: String,
    pub upi_payee_address: String,
    pub upi_payee_name: String,
    pub currency: String,
    pub data_dir: String,
    pub log_level: String,
    pub top_items_limit: usize,
}

impl Config {
    /// Load configuration from environment variables, with defaults for
    /// anything unset.
    pub fn from_env() -> Self {
        let store_name =
            std::env::var("STORE_NAME").unwrap_or_else(|_| "Corner Cafe".into());
        Self {
            upi_payee_address: std::env::var("UPI_PAYEE_ADDRESS")
                .unwrap_or_else(|_| "cafe@okbank".into()),
            upi_payee_name: std::env::var("UPI_PAYEE_NAME")
                .unwrap_or_else(|_| store_name.clone()),
            currency: std::env::var("CURRENCY").unwrap_or_else(|_| "INR".into()),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            top_items_limit: std::env::var("TOP_ITEMS_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TOP_ITEMS),
            store_name,
        }
    }

    pub fn upi_details(&self) -> UpiDetails {
        UpiDetails::new(
            self.upi_payee_address.clone(),
            self.upi_payee_name.clone(),
            self.currency.clone(),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_name: "Corner Cafe".into(),
            upi_payee_address: "cafe@okbank".into(),
            upi_payee_name: "Corner Cafe".into(),
            currency: "INR".into(),
            data_dir: "./data".into(),
            log_level: "info".into(),
            top_items_limit: DEFAULT_TOP_ITEMS,
        }
    }
}
