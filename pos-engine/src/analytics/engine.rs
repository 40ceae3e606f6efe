//! Report aggregation
//!
//! Roll-ups over a date-filtered order set. Sums are accumulated with
//! `Decimal` and rounded once at the edge, matching how money is
//! handled everywhere else in the workspace.

use super::date_range::DateFilter;
use crate::money;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{Category, MenuItem, Order, OrderStatus};
use std::collections::BTreeMap;

/// Number of entries returned by the top-items roll-up
pub const DEFAULT_TOP_ITEMS: usize = 10;

/// Per-item sales (top-items roll-up)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ItemSales {
    pub item_id: String,
    pub name: String,
    pub quantity: i64,
    pub revenue: f64,
}

/// Per-category sales (completed orders only)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategorySales {
    pub category: String,
    pub revenue: f64,
    pub quantity: i64,
}

/// Per-instrument payment totals (paid orders only)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentMethodSales {
    /// Upper-cased display label (CASH, UPI)
    pub method: String,
    pub count: u64,
    pub amount: f64,
}

/// One calendar-day bucket of completed-order sales
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailySales {
    /// ISO sort key; chronological across month and year boundaries
    pub date: NaiveDate,
    /// Display label ("Aug 29")
    pub label: String,
    pub revenue: f64,
    pub orders: u64,
}

/// Full analytics report for one date window
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Report {
    /// Paid-order revenue
    pub revenue: f64,
    /// Paid revenue minus item costs (cost-at-sale when snapshotted)
    pub profit: f64,
    /// Paid order count
    pub order_count: u64,
    /// revenue / order_count, 0 when there are no paid orders
    pub average_order_value: f64,
    pub top_items: Vec<ItemSales>,
    pub category_breakdown: Vec<CategorySales>,
    pub payment_methods: Vec<PaymentMethodSales>,
    pub sales_by_date: Vec<DailySales>,
}

/// Compute the full report over `orders` restricted to `filter`.
///
/// Pure and deterministic: identical inputs always produce an identical
/// report, and nothing here fails; absent fields count as zero.
pub fn build_report(
    orders: &[Order],
    menu_items: &[MenuItem],
    categories: &[Category],
    filter: &DateFilter,
) -> Report {
    build_report_with_limit(orders, menu_items, categories, filter, DEFAULT_TOP_ITEMS)
}

/// [`build_report`] with a configurable top-items length
pub fn build_report_with_limit(
    orders: &[Order],
    menu_items: &[MenuItem],
    categories: &[Category],
    filter: &DateFilter,
    top_limit: usize,
) -> Report {
    let filtered: Vec<&Order> = orders
        .iter()
        .filter(|o| filter.contains(o.business_time()))
        .collect();

    let revenue = revenue(&filtered);
    let order_count = filtered.iter().filter(|o| o.is_paid()).count() as u64;
    let average_order_value = if order_count > 0 {
        money::round2(revenue / order_count as f64)
    } else {
        0.0
    };

    Report {
        revenue,
        profit: profit(&filtered, menu_items),
        order_count,
        average_order_value,
        top_items: top_items(&filtered, top_limit),
        category_breakdown: category_breakdown(&filtered, categories, menu_items),
        payment_methods: payment_methods(&filtered),
        sales_by_date: sales_by_date(&filtered),
    }
}

/// Sum of `total` over paid orders
fn revenue(orders: &[&Order]) -> f64 {
    money::to_money(
        orders
            .iter()
            .filter(|o| o.is_paid())
            .map(|o| money::dec(o.total))
            .sum(),
    )
}

/// Paid revenue minus item costs. The snapshotted line cost is
/// preferred; orders that predate cost snapshotting fall back to the
/// current menu's cost, then to zero.
fn profit(orders: &[&Order], menu_items: &[MenuItem]) -> f64 {
    let mut total_revenue = Decimal::ZERO;
    let mut total_cost = Decimal::ZERO;

    for order in orders.iter().filter(|o| o.is_paid()) {
        total_revenue += money::dec(order.total);
        for item in &order.items {
            let unit_cost = item
                .cost
                .or_else(|| live_cost(menu_items, &item.item_id))
                .unwrap_or(0.0);
            total_cost += money::dec(unit_cost) * Decimal::from(item.quantity);
        }
    }

    money::to_money(total_revenue - total_cost)
}

fn live_cost(menu_items: &[MenuItem], item_id: &str) -> Option<f64> {
    menu_items
        .iter()
        .find(|m| m.id.as_deref() == Some(item_id))
        .and_then(|m| m.cost)
}

/// Quantity-ranked items across all filtered orders, regardless of
/// order status or payment status. Ties break on first-seen item id
/// (accumulation is in encounter order and the sort is stable).
fn top_items(orders: &[&Order], limit: usize) -> Vec<ItemSales> {
    struct Accum {
        item_id: String,
        name: String,
        quantity: i64,
        revenue: Decimal,
    }
    let mut stats: Vec<Accum> = Vec::new();

    for order in orders {
        for item in &order.items {
            let line_revenue = money::dec(item.price) * Decimal::from(item.quantity);
            match stats.iter_mut().find(|s| s.item_id == item.item_id) {
                Some(s) => {
                    s.quantity += i64::from(item.quantity);
                    s.revenue += line_revenue;
                }
                None => stats.push(Accum {
                    item_id: item.item_id.clone(),
                    name: item.name.clone(),
                    quantity: i64::from(item.quantity),
                    revenue: line_revenue,
                }),
            }
        }
    }

    stats.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    stats
        .into_iter()
        .take(limit)
        .map(|s| ItemSales {
            item_id: s.item_id,
            name: s.name,
            quantity: s.quantity,
            revenue: money::to_money(s.revenue),
        })
        .collect()
}

/// Item revenue/quantity grouped by the menu item's category, for
/// completed orders only. Every known category is seeded so zero rows
/// are representable, then zero-revenue rows are dropped before the
/// descending-by-revenue sort.
fn category_breakdown(
    orders: &[&Order],
    categories: &[Category],
    menu_items: &[MenuItem],
) -> Vec<CategorySales> {
    struct Accum {
        category_id: String,
        name: String,
        revenue: Decimal,
        quantity: i64,
    }
    let mut stats: Vec<Accum> = categories
        .iter()
        .map(|c| Accum {
            category_id: c.id.clone().unwrap_or_default(),
            name: c.name.clone(),
            revenue: Decimal::ZERO,
            quantity: 0,
        })
        .collect();

    for order in orders.iter().filter(|o| o.status == OrderStatus::Completed) {
        for item in &order.items {
            let Some(menu_item) = menu_items
                .iter()
                .find(|m| m.id.as_deref() == Some(item.item_id.as_str()))
            else {
                continue; // item no longer on the menu
            };
            if let Some(s) = stats
                .iter_mut()
                .find(|s| s.category_id == menu_item.category_id)
            {
                s.revenue += money::dec(item.price) * Decimal::from(item.quantity);
                s.quantity += i64::from(item.quantity);
            }
        }
    }

    let mut rows: Vec<CategorySales> = stats
        .into_iter()
        .filter(|s| s.revenue > Decimal::ZERO)
        .map(|s| CategorySales {
            category: s.name,
            revenue: money::to_money(s.revenue),
            quantity: s.quantity,
        })
        .collect();
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    rows
}

/// Paid orders grouped by payment instrument; a paid order with no
/// method on record counts as cash.
fn payment_methods(orders: &[&Order]) -> Vec<PaymentMethodSales> {
    struct Accum {
        label: &'static str,
        count: u64,
        amount: Decimal,
    }
    let mut stats: Vec<Accum> = Vec::new();

    for order in orders.iter().filter(|o| o.is_paid()) {
        let label = order
            .payment_method
            .map(|m| m.label())
            .unwrap_or("CASH");
        match stats.iter_mut().find(|s| s.label == label) {
            Some(s) => {
                s.count += 1;
                s.amount += money::dec(order.total);
            }
            None => stats.push(Accum {
                label,
                count: 1,
                amount: money::dec(order.total),
            }),
        }
    }

    stats
        .into_iter()
        .map(|s| PaymentMethodSales {
            method: s.label.to_string(),
            count: s.count,
            amount: money::to_money(s.amount),
        })
        .collect()
}

/// Completed orders bucketed by calendar day of their business time,
/// ascending chronologically (ISO key, not the display label).
fn sales_by_date(orders: &[&Order]) -> Vec<DailySales> {
    let mut buckets: BTreeMap<NaiveDate, (Decimal, u64)> = BTreeMap::new();

    for order in orders.iter().filter(|o| o.status == OrderStatus::Completed) {
        let day = order.business_time().date_naive();
        let entry = buckets.entry(day).or_insert((Decimal::ZERO, 0));
        entry.0 += money::dec(order.total);
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(date, (revenue, orders))| DailySales {
            date,
            label: date.format("%b %d").to_string(),
            revenue: money::to_money(revenue),
            orders,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use shared::models::{ItemType, OrderItem, PaymentMethod, PaymentStatus};

    fn ts(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, d, h, 0, 0).unwrap()
    }

    fn line(id: &str, price: f64, cost: Option<f64>, qty: i32) -> OrderItem {
        OrderItem {
            item_id: id.into(),
            name: format!("Item {id}"),
            price,
            cost,
            item_type: ItemType::Veg,
            quantity: qty,
            notes: None,
        }
    }

    fn order(
        items: Vec<OrderItem>,
        status: OrderStatus,
        paid: bool,
        method: Option<PaymentMethod>,
        completed: Option<DateTime<Utc>>,
    ) -> Order {
        let subtotal: f64 = items.iter().map(|i| i.price * f64::from(i.quantity)).sum();
        let tax = money::tax_on(subtotal);
        Order {
            id: Some(format!("o-{}", subtotal)),
            receipt_number: "ORD-test".into(),
            customer_name: None,
            table_no: None,
            items,
            subtotal,
            tax,
            total: money::round2(subtotal + tax),
            status,
            payment_status: if paid {
                PaymentStatus::Paid
            } else {
                PaymentStatus::Pending
            },
            payment_method: method,
            created_at: ts(29, 10),
            completed_at: completed,
        }
    }

    fn menu_item(id: &str, category_id: &str, cost: Option<f64>) -> MenuItem {
        MenuItem {
            id: Some(id.into()),
            name: format!("Item {id}"),
            description: None,
            price: 100.0,
            cost,
            category_id: category_id.into(),
            is_available: true,
            item_type: ItemType::Veg,
        }
    }

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: Some(id.into()),
            name: name.into(),
            slug: name.to_lowercase(),
        }
    }

    fn window() -> DateFilter {
        DateFilter {
            start: ts(1, 0),
            end: ts(31, 23),
        }
    }

    #[test]
    fn revenue_excludes_unpaid_orders() {
        // orders = [{total≈100, paid}, {total≈200, pending}]
        let orders = vec![
            order(vec![line("a", 95.24, None, 1)], OrderStatus::Completed, true, Some(PaymentMethod::Cash), Some(ts(29, 12))),
            order(vec![line("b", 190.48, None, 1)], OrderStatus::Completed, false, None, Some(ts(29, 13))),
        ];
        let report = build_report(&orders, &[], &[], &window());
        assert_eq!(report.revenue, orders[0].total);
        assert_eq!(report.order_count, 1);
    }

    #[test]
    fn average_order_value_guards_division_by_zero() {
        let orders = vec![order(
            vec![line("a", 100.0, None, 1)],
            OrderStatus::Completed,
            false,
            None,
            Some(ts(29, 12)),
        )];
        let report = build_report(&orders, &[], &[], &window());
        assert_eq!(report.order_count, 0);
        assert_eq!(report.average_order_value, 0.0);
    }

    #[test]
    fn profit_prefers_snapshotted_cost_and_never_exceeds_revenue() {
        let menu = vec![menu_item("a", "c1", Some(90.0))]; // stale live cost
        let orders = vec![order(
            vec![line("a", 100.0, Some(40.0), 2)],
            OrderStatus::Completed,
            true,
            Some(PaymentMethod::Cash),
            Some(ts(29, 12)),
        )];
        let report = build_report(&orders, &menu, &[], &window());
        // Snapshot cost 40 × 2 = 80, not the live 90 × 2.
        assert_eq!(report.profit, money::round2(report.revenue - 80.0));
        assert!(report.revenue >= report.profit);
    }

    #[test]
    fn profit_falls_back_to_live_cost_for_legacy_orders() {
        let menu = vec![menu_item("a", "c1", Some(30.0))];
        let orders = vec![order(
            vec![line("a", 100.0, None, 1)],
            OrderStatus::Completed,
            true,
            Some(PaymentMethod::Cash),
            Some(ts(29, 12)),
        )];
        let report = build_report(&orders, &menu, &[], &window());
        assert_eq!(report.profit, money::round2(report.revenue - 30.0));
    }

    #[test]
    fn top_items_rank_by_quantity_regardless_of_payment() {
        let orders = vec![
            order(vec![line("a", 10.0, None, 3)], OrderStatus::Pending, false, None, None),
            order(vec![line("b", 5.0, None, 5)], OrderStatus::Completed, true, Some(PaymentMethod::Upi), Some(ts(29, 12))),
        ];
        let report = build_report(&orders, &[], &[], &window());
        assert_eq!(report.top_items.len(), 2);
        assert_eq!(report.top_items[0].item_id, "b");
        assert_eq!(report.top_items[0].quantity, 5);
        assert_eq!(report.top_items[1].item_id, "a");
    }

    #[test]
    fn top_items_tie_breaks_on_first_seen() {
        let orders = vec![
            order(vec![line("first", 10.0, None, 2)], OrderStatus::Completed, true, None, Some(ts(29, 12))),
            order(vec![line("second", 10.0, None, 2)], OrderStatus::Completed, true, None, Some(ts(29, 13))),
        ];
        let report = build_report(&orders, &[], &[], &window());
        assert_eq!(report.top_items[0].item_id, "first");
        assert_eq!(report.top_items[1].item_id, "second");
    }

    #[test]
    fn top_items_respects_the_limit() {
        let orders: Vec<Order> = (0..15)
            .map(|i| {
                order(
                    vec![line(&format!("i{i}"), 10.0, None, i + 1)],
                    OrderStatus::Completed,
                    true,
                    None,
                    Some(ts(29, 12)),
                )
            })
            .collect();
        let report = build_report(&orders, &[], &[], &window());
        assert_eq!(report.top_items.len(), DEFAULT_TOP_ITEMS);
        // Highest quantity first.
        assert_eq!(report.top_items[0].quantity, 15);

        let short = build_report_with_limit(&orders, &[], &[], &window(), 3);
        assert_eq!(short.top_items.len(), 3);
    }

    #[test]
    fn category_breakdown_drops_zero_rows_and_sorts_by_revenue() {
        let categories = vec![
            category("c1", "Drinks"),
            category("c2", "Snacks"),
            category("c3", "Desserts"), // never sold
        ];
        let menu = vec![
            menu_item("a", "c1", None),
            menu_item("b", "c2", None),
        ];
        let orders = vec![
            order(vec![line("a", 50.0, None, 1)], OrderStatus::Completed, true, None, Some(ts(29, 12))),
            order(vec![line("b", 80.0, None, 2)], OrderStatus::Completed, true, None, Some(ts(29, 13))),
            // Pending order must not count toward the category roll-up.
            order(vec![line("a", 500.0, None, 1)], OrderStatus::Pending, false, None, None),
        ];
        let report = build_report(&orders, &menu, &categories, &window());
        assert_eq!(report.category_breakdown.len(), 2);
        assert_eq!(report.category_breakdown[0].category, "Snacks");
        assert_eq!(report.category_breakdown[0].revenue, 160.0);
        assert_eq!(report.category_breakdown[1].category, "Drinks");
        assert!(!report.category_breakdown.iter().any(|c| c.category == "Desserts"));
    }

    #[test]
    fn payment_methods_default_to_cash_and_upper_case() {
        let orders = vec![
            order(vec![line("a", 100.0, None, 1)], OrderStatus::Completed, true, Some(PaymentMethod::Upi), Some(ts(29, 12))),
            order(vec![line("b", 50.0, None, 1)], OrderStatus::Completed, true, None, Some(ts(29, 13))),
            order(vec![line("c", 25.0, None, 1)], OrderStatus::Completed, true, Some(PaymentMethod::Cash), Some(ts(29, 14))),
        ];
        let report = build_report(&orders, &[], &[], &window());
        let upi = report.payment_methods.iter().find(|p| p.method == "UPI").unwrap();
        let cash = report.payment_methods.iter().find(|p| p.method == "CASH").unwrap();
        assert_eq!(upi.count, 1);
        assert_eq!(cash.count, 2);
    }

    #[test]
    fn sales_by_date_sorts_chronologically_not_lexically() {
        // "Aug 30" < "Sep 01" lexically happens to hold, but
        // "Apr 01" vs "Aug 30" would not sort correctly by label;
        // the ISO key must drive ordering.
        let mut early = order(vec![line("a", 10.0, None, 1)], OrderStatus::Completed, true, None, None);
        early.completed_at = Some(Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap());
        let late = order(vec![line("b", 20.0, None, 1)], OrderStatus::Completed, true, None, Some(ts(30, 9)));

        let filter = DateFilter {
            start: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 59).unwrap(),
        };
        let report = build_report(&[late, early], &[], &[], &filter);
        assert_eq!(report.sales_by_date.len(), 2);
        assert_eq!(report.sales_by_date[0].label, "Apr 01");
        assert_eq!(report.sales_by_date[1].label, "Aug 30");
        assert!(report.sales_by_date[0].date < report.sales_by_date[1].date);
    }

    #[test]
    fn sales_by_date_uses_created_at_when_never_completed() {
        // Completed status but no completed_at timestamp on record.
        let orders = vec![order(
            vec![line("a", 10.0, None, 1)],
            OrderStatus::Completed,
            true,
            None,
            None,
        )];
        let report = build_report(&orders, &[], &[], &window());
        assert_eq!(report.sales_by_date.len(), 1);
        assert_eq!(report.sales_by_date[0].date, ts(29, 10).date_naive());
    }

    #[test]
    fn date_window_is_inclusive_and_excludes_outside_orders() {
        let inside = order(vec![line("a", 100.0, None, 1)], OrderStatus::Completed, true, None, Some(ts(15, 12)));
        let mut outside = inside.clone();
        outside.completed_at = Some(Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap());

        let report = build_report(&[inside.clone(), outside], &[], &[], &window());
        assert_eq!(report.order_count, 1);
        assert_eq!(report.revenue, inside.total);
    }

    #[test]
    fn report_is_idempotent() {
        let categories = vec![category("c1", "Drinks")];
        let menu = vec![menu_item("a", "c1", Some(20.0))];
        let orders = vec![
            order(vec![line("a", 100.0, Some(20.0), 2)], OrderStatus::Completed, true, Some(PaymentMethod::Upi), Some(ts(29, 12))),
            order(vec![line("a", 100.0, Some(20.0), 1)], OrderStatus::Pending, false, None, None),
        ];
        let first = build_report(&orders, &menu, &categories, &window());
        let second = build_report(&orders, &menu, &categories, &window());
        assert_eq!(first, second);
    }

    #[test]
    fn empty_inputs_produce_an_empty_report() {
        let report = build_report(&[], &[], &[], &window());
        assert_eq!(report.revenue, 0.0);
        assert_eq!(report.profit, 0.0);
        assert_eq!(report.order_count, 0);
        assert_eq!(report.average_order_value, 0.0);
        assert!(report.top_items.is_empty());
        assert!(report.category_breakdown.is_empty());
        assert!(report.payment_methods.is_empty());
        assert!(report.sales_by_date.is_empty());
    }
}
