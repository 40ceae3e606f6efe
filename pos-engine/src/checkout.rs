//! Cart → Order conversion
//!
//! Two entry paths:
//! - [`checkout`]: walk-in, paid at the counter; the order is created
//!   already COMPLETED/PAID with `completed_at` stamped.
//! - [`open_ticket`]: dine-in; the order starts PENDING/unpaid and
//!   progresses through the kitchen workflow.
//!
//! Both convert the cart into an immutable order snapshot and clear the
//! cart only after the store accepts the order; a persistence failure
//! leaves the cart intact so the user can retry.

use crate::cart::Cart;
use chrono::Utc;
use pos_sync::{DocumentStore, EntityKind, Session};
use shared::models::{Order, OrderStatus, PaymentMethod, PaymentStatus};
use shared::util::snowflake_id;
use shared::{AppError, AppResult};

/// Optional customer/table info captured at order time
#[derive(Debug, Clone, Default)]
pub struct OrderInfo {
    pub customer_name: Option<String>,
    pub table_no: Option<String>,
}

impl OrderInfo {
    pub fn walk_in() -> Self {
        Self {
            customer_name: None,
            table_no: Some("Walk-in".into()),
        }
    }

    pub fn table(table_no: impl Into<String>) -> Self {
        Self {
            customer_name: None,
            table_no: Some(table_no.into()),
        }
    }
}

/// Counter checkout: creates a COMPLETED, PAID order from the cart.
///
/// Returns the persisted order (with its store-assigned id). The cart is
/// cleared only on success.
pub async fn checkout(
    store: &dyn DocumentStore,
    session: &Session,
    cart: &mut Cart,
    method: PaymentMethod,
    info: OrderInfo,
) -> AppResult<Order> {
    let now = Utc::now();
    let mut order = build_order(cart, info)?;
    order.status = OrderStatus::Completed;
    order.payment_status = PaymentStatus::Paid;
    order.payment_method = Some(method);
    order.completed_at = Some(now);

    persist(store, session, cart, order).await
}

/// Dine-in entry path: creates a PENDING, unpaid order from the cart.
pub async fn open_ticket(
    store: &dyn DocumentStore,
    session: &Session,
    cart: &mut Cart,
    info: OrderInfo,
) -> AppResult<Order> {
    let order = build_order(cart, info)?;
    persist(store, session, cart, order).await
}

/// Snapshot the cart into an order without touching the store.
/// Rejects an empty cart before any mutation is issued.
fn build_order(cart: &Cart, info: OrderInfo) -> AppResult<Order> {
    if cart.is_empty() {
        return Err(AppError::cart_empty());
    }
    let totals = cart.totals();
    Ok(Order {
        id: None,
        receipt_number: format!("ORD-{}", snowflake_id()),
        customer_name: info.customer_name,
        table_no: info.table_no,
        items: cart.lines().to_vec(),
        subtotal: totals.subtotal,
        tax: totals.tax,
        total: totals.total,
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        payment_method: None,
        created_at: Utc::now(),
        completed_at: None,
    })
}

async fn persist(
    store: &dyn DocumentStore,
    session: &Session,
    cart: &mut Cart,
    mut order: Order,
) -> AppResult<Order> {
    let lines = cart.take_lines();
    let doc = serde_json::to_value(&order)?;
    match store.create(&session.id, EntityKind::Orders, doc).await {
        Ok(id) => {
            order.id = Some(id);
            tracing::info!(
                receipt = %order.receipt_number,
                total = order.total,
                status = %order.status.as_str(),
                "order placed"
            );
            Ok(order)
        }
        Err(err) => {
            // Leave the cart exactly as it was so the user can retry.
            cart.restore_lines(lines);
            tracing::warn!(error = %err, "order persistence failed, cart preserved");
            Err(err)
        }
    }
}
