//! Cart state machine
//!
//! Ephemeral, per checkout session, never persisted. Lines are menu
//! item snapshots; totals are pure derivations recomputed on demand,
//! never independently mutated.

use crate::money;
use shared::models::{MenuItem, OrderItem};

/// Derived cart totals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

/// In-memory order entry cart
#[derive(Debug, Default, Clone)]
pub struct Cart {
    lines: Vec<OrderItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a menu item; an existing line for the same item
    /// id is incremented instead of duplicated.
    pub fn add_item(&mut self, item: &MenuItem) {
        let id = item.id.as_deref().unwrap_or_default();
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == id) {
            line.quantity += 1;
        } else {
            self.lines.push(OrderItem::snapshot(item));
        }
    }

    /// Adjust a line's quantity by `delta`, clamping at 0; a line that
    /// reaches 0 is removed rather than kept as a zero-quantity line.
    pub fn update_quantity(&mut self, item_id: &str, delta: i32) {
        for line in &mut self.lines {
            if line.item_id == item_id {
                line.quantity = (line.quantity + delta).max(0);
            }
        }
        self.lines.retain(|l| l.quantity > 0);
    }

    /// Attach a note to a line (special instructions for the kitchen)
    pub fn set_notes(&mut self, item_id: &str, notes: Option<String>) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.notes = notes;
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[OrderItem] {
        &self.lines
    }

    /// subtotal = Σ price×quantity; tax = 5% of subtotal; total = sum
    pub fn totals(&self) -> CartTotals {
        let subtotal = money::to_money(
            self.lines
                .iter()
                .map(|l| money::dec(l.price) * rust_decimal::Decimal::from(l.quantity))
                .sum(),
        );
        let tax = money::tax_on(subtotal);
        CartTotals {
            subtotal,
            tax,
            total: money::round2(subtotal + tax),
        }
    }

    /// Hand the lines over for order construction, leaving the cart empty
    pub(crate) fn take_lines(&mut self) -> Vec<OrderItem> {
        std::mem::take(&mut self.lines)
    }

    /// Restore lines after a failed checkout so the user can retry
    pub(crate) fn restore_lines(&mut self, lines: Vec<OrderItem>) {
        self.lines = lines;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ItemType;

    fn menu_item(id: &str, price: f64) -> MenuItem {
        MenuItem {
            id: Some(id.to_string()),
            name: format!("Item {id}"),
            description: None,
            price,
            cost: None,
            category_id: "c1".into(),
            is_available: true,
            item_type: ItemType::Veg,
        }
    }

    #[test]
    fn adding_same_item_increments_quantity() {
        let mut cart = Cart::new();
        let chai = menu_item("m1", 30.0);
        cart.add_item(&chai);
        cart.add_item(&chai);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn totals_apply_five_percent_gst() {
        // cart = [{price:100, qty:2}, {price:50, qty:1}]
        let mut cart = Cart::new();
        let a = menu_item("a", 100.0);
        let b = menu_item("b", 50.0);
        cart.add_item(&a);
        cart.add_item(&a);
        cart.add_item(&b);

        let totals = cart.totals();
        assert_eq!(totals.subtotal, 250.0);
        assert_eq!(totals.tax, 12.5);
        assert_eq!(totals.total, 262.5);
    }

    #[test]
    fn quantity_clamps_at_zero_and_removes_the_line() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("m1", 30.0));
        cart.update_quantity("m1", -5);
        assert!(cart.is_empty());
        assert!(cart.lines().iter().all(|l| l.quantity > 0));
    }

    #[test]
    fn updating_unknown_item_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("m1", 30.0));
        cart.update_quantity("ghost", 3);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn totals_are_invariant_under_add_update_sequences() {
        let mut cart = Cart::new();
        let a = menu_item("a", 12.75);
        let b = menu_item("b", 9.5);
        cart.add_item(&a);
        cart.add_item(&b);
        cart.update_quantity("a", 2); // qty 3
        cart.update_quantity("b", -1); // removed

        let totals = cart.totals();
        assert_eq!(totals.subtotal, 38.25);
        assert_eq!(totals.tax, 1.91); // round2(1.9125)
        assert_eq!(totals.total, 40.16);
        assert!(cart.lines().iter().all(|l| l.quantity > 0));
    }

    #[test]
    fn notes_attach_to_the_right_line() {
        let mut cart = Cart::new();
        cart.add_item(&menu_item("m1", 30.0));
        cart.set_notes("m1", Some("less sugar".into()));
        assert_eq!(cart.lines()[0].notes.as_deref(), Some("less sugar"));
    }
}
