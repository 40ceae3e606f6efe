//! Demo terminal
//!
//! Runs the full POS flow against the in-memory store: seed a small
//! menu, take a walk-in checkout and a dine-in ticket, walk the ticket
//! through the kitchen, then print an analytics report for today.

use anyhow::Result;
use chrono::Utc;
use pos_engine::analytics::{DateFilter, RangePreset, build_report_with_limit};
use pos_engine::cart::Cart;
use pos_engine::catalog::CatalogService;
use pos_engine::checkout::{self, OrderInfo};
use pos_engine::config::Config;
use pos_engine::logger;
use pos_engine::workflow::KitchenWorkflow;
use pos_sync::{DocumentStore, MemoryStore, Session, SessionCache, SyncService};
use shared::models::{MenuItem, MenuItemCreate, PaymentMethod};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    logger::init_logger_with_file(Some(&config.log_level), None);
    tracing::info!(store = %config.store_name, "starting demo terminal");

    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let session = Session::new("demo-user", "owner@example.com");
    let cache = SessionCache::new(&config.data_dir);
    if let Err(err) = cache.save(&session) {
        tracing::warn!(error = %err, "session cache unavailable, continuing without it");
    }

    let sync = SyncService::new(store.clone());
    sync.start(session.clone());

    // Seed a small menu.
    let catalog = CatalogService::new(store.clone());
    let drinks = catalog.add_category(&session.id, "Hot Drinks").await?;
    let snacks = catalog.add_category(&session.id, "Snacks").await?;
    for (name, price, cost, category) in [
        ("Masala Chai", 30.0, 8.0, &drinks),
        ("Filter Coffee", 40.0, 12.0, &drinks),
        ("Samosa", 25.0, 7.0, &snacks),
    ] {
        catalog
            .add_menu_item(
                &session.id,
                MenuItemCreate {
                    name: name.into(),
                    description: None,
                    price,
                    cost: Some(cost),
                    category_id: category.clone(),
                    is_available: None,
                    item_type: None,
                },
            )
            .await?;
    }

    let mut menu_rx = sync.menu_items().expect("sync started");
    let menu: Vec<MenuItem> = menu_rx.wait_for(|items| items.len() == 3).await?.clone();
    tracing::info!(items = menu.len(), "menu synced");

    // Walk-in: two chais and a samosa, paid by UPI at the counter.
    let mut cart = Cart::new();
    cart.add_item(&menu[0]);
    cart.add_item(&menu[0]);
    cart.add_item(&menu[2]);
    let totals = cart.totals();
    let upi = config.upi_details();
    tracing::info!(uri = %upi.payment_uri(totals.total), "scan to pay");
    let paid = checkout::checkout(
        store.as_ref(),
        &session,
        &mut cart,
        PaymentMethod::Upi,
        OrderInfo::walk_in(),
    )
    .await?;
    tracing::info!(receipt = %paid.receipt_number, total = paid.total, "walk-in order served");

    // Dine-in: a coffee for table 4, runs through the kitchen.
    cart.add_item(&menu[1]);
    let ticket = checkout::open_ticket(
        store.as_ref(),
        &session,
        &mut cart,
        OrderInfo::table("T4"),
    )
    .await?;

    let workflow = KitchenWorkflow::new(store.clone());
    let mut current = ticket;
    while current.status.next().is_some() {
        let next = workflow.advance(&session.id, &current).await?;
        current.status = next;
        tracing::info!(receipt = %current.receipt_number, status = %next.as_str(), "kitchen update");
    }

    // Today's numbers.
    let mut orders_rx = sync.orders().expect("sync started");
    let orders = orders_rx
        .wait_for(|orders| orders.len() == 2 && orders.iter().all(|o| o.status.is_terminal()))
        .await?
        .clone();
    let mut categories_rx = sync.categories().expect("sync started");
    let categories = categories_rx.wait_for(|c| c.len() == 2).await?.clone();
    let filter = DateFilter::resolve(RangePreset::Today, Utc::now(), None, None);
    let report =
        build_report_with_limit(&orders, &menu, &categories, &filter, config.top_items_limit);
    tracing::info!(
        revenue = report.revenue,
        profit = report.profit,
        orders = report.order_count,
        avg = report.average_order_value,
        "today's report"
    );
    for item in &report.top_items {
        tracing::info!(name = %item.name, qty = item.quantity, revenue = item.revenue, "top item");
    }

    sync.stop();
    Ok(())
}
