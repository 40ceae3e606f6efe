//! Order Model

use super::menu_item::{ItemType, MenuItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kitchen-facing order status
///
/// Forward-only workflow: PENDING → PREPARING → READY → COMPLETED, with
/// CANCELLED reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Next stage in the forward workflow, if any
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Preparing),
            Self::Preparing => Some(Self::Ready),
            Self::Ready => Some(Self::Completed),
            Self::Completed | Self::Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether a transition to `to` is allowed: one forward step only,
    /// or cancellation from any non-terminal state.
    pub fn can_transition_to(self, to: Self) -> bool {
        if to == Self::Cancelled {
            return !self.is_terminal();
        }
        self.next() == Some(to)
    }

    /// Display label matching the status enum value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Preparing => "PREPARING",
            Self::Ready => "READY",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Payment status of an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

/// Payment instrument
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Upi,
}

impl PaymentMethod {
    /// Upper-cased display label used by the payment breakdown
    pub fn label(self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::Upi => "UPI",
        }
    }
}

/// A line on an order: a snapshot of the menu item at add-to-cart time
///
/// Later edits to the menu item never change historical orders. `cost`
/// is snapshotted too, so profit is computed against cost-at-sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Menu item reference (String ID)
    pub item_id: String,
    pub name: String,
    /// Price in currency unit, at time of sale
    pub price: f64,
    /// Unit cost at time of sale (absent = 0, or legacy order)
    pub cost: Option<f64>,
    pub item_type: ItemType,
    pub quantity: i32,
    pub notes: Option<String>,
}

impl OrderItem {
    /// Snapshot a menu item as a quantity-1 line
    pub fn snapshot(item: &MenuItem) -> Self {
        Self {
            item_id: item.id.clone().unwrap_or_default(),
            name: item.name.clone(),
            price: item.price,
            cost: item.cost,
            item_type: item.item_type.normalized(),
            quantity: 1,
            notes: None,
        }
    }
}

/// Order entity
///
/// Created immutable-by-convention at checkout; only `status` (and the
/// downstream `completed_at`) mutate afterwards, never the items or totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<String>,
    /// Human-facing receipt identifier (ORD-…)
    pub receipt_number: String,
    pub customer_name: Option<String>,
    pub table_no: Option<String>,
    pub items: Vec<OrderItem>,
    /// Subtotal in currency unit: Σ price × quantity
    pub subtotal: f64,
    /// Tax in currency unit: 5% of subtotal
    pub tax: f64,
    /// Total in currency unit: subtotal + tax
    pub total: f64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Timestamp analytics buckets on: completion time, falling back to
    /// creation time for orders that never completed.
    pub fn business_time(&self) -> DateTime<Utc> {
        self.completed_at.unwrap_or(self.created_at)
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}
