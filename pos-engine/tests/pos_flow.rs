//! End-to-end POS flow over the in-memory store: menu setup, order
//! entry, kitchen workflow, and the analytics roll-up at the end.

use chrono::Utc;
use pos_engine::analytics::{DateFilter, RangePreset, build_report};
use pos_engine::cart::Cart;
use pos_engine::catalog::CatalogService;
use pos_engine::checkout::{self, OrderInfo};
use pos_engine::workflow::KitchenWorkflow;
use pos_sync::{DocumentStore, MemoryStore, Session, SyncService};
use shared::models::{
    Category, MenuItem, MenuItemCreate, Order, OrderStatus, PaymentMethod, PaymentStatus,
};
use std::sync::Arc;

async fn seed_menu(
    catalog: &CatalogService,
    user: &str,
) -> (String, String) {
    let drinks = catalog.add_category(user, "Hot Drinks").await.unwrap();
    let snacks = catalog.add_category(user, "Snacks").await.unwrap();

    for (name, price, cost, category) in [
        ("Masala Chai", 30.0, Some(8.0), &drinks),
        ("Filter Coffee", 40.0, Some(12.0), &drinks),
        ("Samosa", 25.0, None, &snacks),
    ] {
        catalog
            .add_menu_item(
                user,
                MenuItemCreate {
                    name: name.into(),
                    description: None,
                    price,
                    cost,
                    category_id: category.clone(),
                    is_available: None,
                    item_type: None,
                },
            )
            .await
            .unwrap();
    }
    (drinks, snacks)
}

async fn synced_menu(sync: &SyncService, count: usize) -> Vec<MenuItem> {
    let mut rx = sync.menu_items().expect("sync started");
    rx.wait_for(|items| items.len() == count)
        .await
        .unwrap()
        .clone()
}

async fn synced_orders(sync: &SyncService, count: usize) -> Vec<Order> {
    let mut rx = sync.orders().expect("sync started");
    rx.wait_for(|orders| orders.len() == count)
        .await
        .unwrap()
        .clone()
}

#[tokio::test]
async fn walk_in_and_dine_in_through_to_analytics() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let session = Session::new("owner", "owner@example.com");
    let sync = SyncService::new(store.clone());
    sync.start(session.clone());

    let catalog = CatalogService::new(store.clone());
    seed_menu(&catalog, &session.id).await;
    let menu = synced_menu(&sync, 3).await;
    let chai = menu.iter().find(|m| m.name == "Masala Chai").unwrap();
    let samosa = menu.iter().find(|m| m.name == "Samosa").unwrap();

    // Walk-in: 2 chai + 1 samosa, paid by UPI; created already served.
    let mut cart = Cart::new();
    cart.add_item(chai);
    cart.add_item(chai);
    cart.add_item(samosa);
    let walk_in = checkout::checkout(
        store.as_ref(),
        &session,
        &mut cart,
        PaymentMethod::Upi,
        OrderInfo::walk_in(),
    )
    .await
    .unwrap();
    assert!(cart.is_empty());
    assert_eq!(walk_in.status, OrderStatus::Completed);
    assert_eq!(walk_in.subtotal, 85.0);
    assert_eq!(walk_in.tax, 4.25);
    assert_eq!(walk_in.total, 89.25);

    // Dine-in: one chai for table 2, cooked through the kitchen board.
    cart.add_item(chai);
    let ticket = checkout::open_ticket(store.as_ref(), &session, &mut cart, OrderInfo::table("T2"))
        .await
        .unwrap();
    assert_eq!(ticket.status, OrderStatus::Pending);
    assert_eq!(ticket.payment_status, PaymentStatus::Pending);

    let workflow = KitchenWorkflow::new(store.clone());
    let mut current = ticket.clone();
    for expected in [
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
    ] {
        let next = workflow.advance(&session.id, &current).await.unwrap();
        assert_eq!(next, expected);
        current.status = next;
    }

    // Both orders visible through the synced feed, ticket now completed.
    let mut orders_rx = sync.orders().expect("sync started");
    let orders: Vec<Order> = orders_rx
        .wait_for(|os| os.len() == 2 && os.iter().all(|o| o.status == OrderStatus::Completed))
        .await
        .unwrap()
        .clone();
    let synced_ticket = orders
        .iter()
        .find(|o| o.id == ticket.id)
        .expect("ticket synced");
    assert_eq!(synced_ticket.status, OrderStatus::Completed);
    assert!(synced_ticket.completed_at.is_some());
    // Kitchen transitions never touched payment or money fields.
    assert_eq!(synced_ticket.payment_status, PaymentStatus::Pending);
    assert_eq!(synced_ticket.total, ticket.total);

    // Analytics over today's window.
    let mut cats_rx = sync.categories().expect("sync started");
    let categories: Vec<Category> = cats_rx.wait_for(|c| c.len() == 2).await.unwrap().clone();
    let filter = DateFilter::resolve(RangePreset::Today, Utc::now(), None, None);
    let report = build_report(&orders, &menu, &categories, &filter);

    // Only the walk-in order is paid.
    assert_eq!(report.revenue, 89.25);
    assert_eq!(report.order_count, 1);
    assert_eq!(report.average_order_value, 89.25);
    // Profit uses snapshotted costs: 2 × 8 for the chai; samosa has none.
    assert_eq!(report.profit, 89.25 - 16.0);

    // Top items count both orders: 3 chai total beats 1 samosa.
    assert_eq!(report.top_items[0].name, "Masala Chai");
    assert_eq!(report.top_items[0].quantity, 3);

    // Both completed orders land in the category and daily roll-ups.
    let drinks_row = report
        .category_breakdown
        .iter()
        .find(|c| c.category == "Hot Drinks")
        .unwrap();
    assert_eq!(drinks_row.quantity, 3);
    assert_eq!(report.sales_by_date.len(), 1);
    assert_eq!(report.sales_by_date[0].orders, 2);

    sync.stop();
    assert!(sync.orders().is_none());
}

#[tokio::test]
async fn stage_skipping_is_not_exposed_by_the_workflow() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let session = Session::new("owner", "owner@example.com");
    let sync = SyncService::new(store.clone());
    sync.start(session.clone());

    let catalog = CatalogService::new(store.clone());
    seed_menu(&catalog, &session.id).await;
    let menu = synced_menu(&sync, 3).await;

    let mut cart = Cart::new();
    cart.add_item(&menu[0]);
    let ticket = checkout::open_ticket(store.as_ref(), &session, &mut cart, OrderInfo::table("T1"))
        .await
        .unwrap();

    let workflow = KitchenWorkflow::new(store.clone());
    let err = workflow
        .transition(&session.id, &ticket, OrderStatus::Ready)
        .await
        .unwrap_err();
    assert_eq!(err.code, shared::ErrorCode::InvalidStatusTransition);

    // The store still holds the order at PENDING.
    let orders = synced_orders(&sync, 1).await;
    assert_eq!(orders[0].status, OrderStatus::Pending);
}

#[tokio::test]
async fn deleting_a_category_orphans_but_keeps_its_items() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let session = Session::new("owner", "owner@example.com");
    let sync = SyncService::new(store.clone());
    sync.start(session.clone());

    let catalog = CatalogService::new(store.clone());
    let (_drinks, snacks) = seed_menu(&catalog, &session.id).await;
    synced_menu(&sync, 3).await;

    catalog.delete_category(&session.id, &snacks).await.unwrap();

    // The samosa survives with its original category_id intact.
    let menu = synced_menu(&sync, 3).await;
    let samosa = menu.iter().find(|m| m.name == "Samosa").unwrap();
    assert_eq!(samosa.category_id, snacks);
    // A category-filtered view no longer shows it.
    let mut cats_rx = sync.categories().expect("sync started");
    let categories: Vec<Category> = cats_rx.wait_for(|c| c.len() == 1).await.unwrap().clone();
    let known: Vec<&str> = categories.iter().filter_map(|c| c.id.as_deref()).collect();
    assert!(!known.contains(&snacks.as_str()));
}
