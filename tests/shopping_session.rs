//! End-to-end shopping sessions against the bundled catalog.
//!
//! Each test drives a cart store and checkout ledger over a shared store the way
//! the storefront pages do: browse, add to cart, check out, pay, and come back
//! later to a reloaded session.

use jiff::Timestamp;
use rust_decimal::Decimal;
use testresult::TestResult;

use decornest::{
    cart::{CART_STORAGE_KEY, CartStore},
    checkout::{CHECKOUT_STORAGE_KEY, CheckoutLedger, Order, OrderId, OrderStatus},
    clock::FixedClock,
    fixtures::Fixture,
    notifications::RecordingNotifier,
    products::{Product, ProductCategory, ProductId},
    storage::{FileStore, KeyValueStore, MemoryStore},
};

fn frozen_at(ms: i64) -> TestResult<FixedClock> {
    Ok(FixedClock::new(Timestamp::from_millisecond(ms)?))
}

#[test]
fn browse_add_checkout_and_pay() -> TestResult {
    let catalog = Fixture::bundled_catalog()?;
    let vase = catalog.product(ProductId::new(1)).ok_or("missing vase")?;
    let pendant = catalog.product(ProductId::new(2)).ok_or("missing pendant")?;

    let dir = tempfile::tempdir()?;
    let store = FileStore::open(dir.path())?;
    let notifier = RecordingNotifier::new();

    let mut cart = CartStore::load_with_notifier(&store, &notifier);
    let mut ledger = CheckoutLedger::load(&store)
        .with_notifier(&notifier)
        .with_clock(frozen_at(1_700_000_000_000)?);

    cart.add_item(vase);
    cart.add_item(vase);
    cart.add_item(pendant);

    assert_eq!(cart.total_items(), 3);
    assert_eq!(cart.total_price(), Decimal::new(175_997, 2));

    let snapshot = ledger.begin_checkout(cart.cart());

    assert_eq!(snapshot.shipping(), Decimal::from(99));
    assert_eq!(snapshot.total(), Decimal::new(185_897, 2));
    assert!(store.get(CHECKOUT_STORAGE_KEY)?.is_some());

    let due = ledger.load_pending_amount(cart.cart());
    let order = ledger.complete_order(due, &mut cart)?;

    assert_eq!(order.id(), OrderId::new(1_700_000_000_000));
    assert_eq!(order.total(), Decimal::new(185_897, 2));
    assert_eq!(order.status(), OrderStatus::Processing);
    assert_eq!(order.items().len(), 2);
    assert_eq!(order.total_items(), 3);

    assert_eq!(cart.total_items(), 0);
    assert_eq!(ledger.orders().len(), 1);
    assert!(ledger.pending().is_none());
    assert_eq!(store.get(CHECKOUT_STORAGE_KEY)?, None);

    assert!(
        notifier
            .titles()
            .contains(&"Order Processed Successfully!".to_string()),
        "expected success notice, got {:?}",
        notifier.titles()
    );

    Ok(())
}

#[test]
fn session_survives_a_reload() -> TestResult {
    let catalog = Fixture::bundled_catalog()?;
    let dir = tempfile::tempdir()?;

    {
        let store = FileStore::open(dir.path())?;
        let mut cart = CartStore::load(&store);

        cart.add_item(catalog.product(ProductId::new(3)).ok_or("missing table")?);
        cart.add_item(catalog.product(ProductId::new(4)).ok_or("missing plant")?);
        cart.update_quantity(ProductId::new(4), 3);

        CheckoutLedger::load(&store).begin_checkout(cart.cart());
    }

    let store = FileStore::open(dir.path())?;
    let cart = CartStore::load(&store);
    let ledger = CheckoutLedger::load(&store);

    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.cart().line(ProductId::new(4)).map(|line| line.quantity), Some(3));

    let pending = ledger.pending().ok_or("missing pending checkout")?;

    assert_eq!(pending.items(), cart.items());
    assert_eq!(ledger.load_pending_amount(cart.cart()), pending.total());

    Ok(())
}

#[test]
fn order_history_is_newest_first_across_sessions() -> TestResult {
    let store = MemoryStore::new();
    let lamp = Product::new(7, "Floor Lamp", ProductCategory::Lighting, Decimal::from(2_499));

    for (ms, paid) in [(1_000, 2_598), (2_000, 5_097)] {
        let mut cart = CartStore::load(&store);
        let mut ledger = CheckoutLedger::load(&store).with_clock(frozen_at(ms)?);

        cart.add_item(&lamp);
        ledger.begin_checkout(cart.cart());
        ledger.complete_order(Decimal::from(paid), &mut cart)?;
    }

    let ledger = CheckoutLedger::load(&store);
    let ids: Vec<u64> = ledger.orders().iter().map(|order| order.id().get()).collect();

    assert_eq!(ids, [2_000, 1_000]);
    assert_eq!(
        ledger.order(OrderId::new(1_000)).map(Order::total),
        Some(Decimal::from(2_598))
    );

    Ok(())
}

#[test]
fn corrupt_cart_document_starts_empty() -> TestResult {
    let store = MemoryStore::new();

    store.set(CART_STORAGE_KEY, "{not json".to_string())?;

    let cart = CartStore::load(&store);

    assert!(cart.cart().is_empty());
    assert_eq!(cart.total_price(), Decimal::ZERO);

    Ok(())
}

#[test]
fn paying_without_checkout_records_an_empty_order() -> TestResult {
    let store = MemoryStore::new();
    let mut cart = CartStore::load(&store);
    let mut ledger = CheckoutLedger::load(&store).with_clock(frozen_at(5_000)?);

    cart.add_item(&Product::new(
        11,
        "Jute Rug",
        ProductCategory::RugsCarpets,
        Decimal::from(1_000),
    ));

    assert_eq!(ledger.load_pending_amount(cart.cart()), Decimal::from(1_000));

    let order = ledger.complete_order(Decimal::from(1_000), &mut cart)?;

    assert!(order.items().is_empty());
    assert_eq!(order.total(), Decimal::from(1_000));
    assert!(cart.cart().is_empty());

    Ok(())
}
