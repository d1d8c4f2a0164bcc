//! Checkout
//!
//! Freezing a cart into a [`CheckoutSnapshot`] when the shopper commits to
//! paying, and turning that snapshot into an [`Order`] once payment is
//! reported complete.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine},
    pricing::{FLAT_SHIPPING_FEE, shipping_for},
    storage::StorageError,
};

mod ledger;
mod orders;
mod payment;

pub use ledger::CheckoutLedger;
pub use orders::{Order, OrderId, OrderItem, OrderStatus};
pub use payment::PaymentAmount;

/// Storage key holding the pending checkout snapshot.
pub const CHECKOUT_STORAGE_KEY: &str = "decornest-checkout-data";

/// Storage key holding the order history.
pub const ORDERS_STORAGE_KEY: &str = "decornest-orders";

/// Errors raised at the checkout boundary.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The entered payment amount is empty, not a number, or not positive.
    #[error("invalid payment amount: {0:?}")]
    InvalidAmount(String),

    /// The stored order history could not be read, so it must not be overwritten.
    #[error("stored order history is unreadable")]
    HistoryUnreadable,

    /// Writing the order history failed.
    #[error("failed to save order history: {0}")]
    Storage(#[from] StorageError),
}

/// How shipping is charged on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    flat_fee: Decimal,
}

impl ShippingPolicy {
    /// Charge `flat_fee` on every non-empty order.
    pub fn flat(flat_fee: Decimal) -> Self {
        Self { flat_fee }
    }

    /// Fee charged on a non-empty order.
    pub fn flat_fee(&self) -> Decimal {
        self.flat_fee
    }

    /// Shipping for an order with the given subtotal.
    pub fn shipping_for(&self, subtotal: Decimal) -> Decimal {
        shipping_for(subtotal, self.flat_fee)
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self::flat(FLAT_SHIPPING_FEE)
    }
}

/// Cart contents and totals frozen at the start of checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSnapshot {
    items: Vec<CartLine>,
    subtotal: Decimal,
    shipping: Decimal,
    total: Decimal,
}

impl CheckoutSnapshot {
    /// Copy `cart` and compute its totals under `policy`.
    pub fn from_cart(cart: &Cart, policy: &ShippingPolicy) -> Self {
        let subtotal = cart.subtotal();
        let shipping = policy.shipping_for(subtotal);

        Self {
            items: cart.lines().to_vec(),
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    /// Lines copied from the cart.
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Shipping charge.
    pub fn shipping(&self) -> Decimal {
        self.shipping
    }

    /// Subtotal plus shipping.
    pub fn total(&self) -> Decimal {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        cart::CartStore,
        products::{Product, ProductCategory},
        storage::MemoryStore,
    };

    use super::*;

    #[test]
    fn empty_cart_ships_free() {
        let snapshot = CheckoutSnapshot::from_cart(&Cart::new(), &ShippingPolicy::default());

        assert_eq!(snapshot.subtotal(), Decimal::ZERO);
        assert_eq!(snapshot.shipping(), Decimal::ZERO);
        assert_eq!(snapshot.total(), Decimal::ZERO);
        assert!(snapshot.items().is_empty());
    }

    #[test]
    fn non_empty_cart_pays_flat_shipping() {
        let mut store = CartStore::load(MemoryStore::new());
        let table = Product::new(
            3,
            "Coffee Table",
            ProductCategory::FurnitureAccents,
            Decimal::from(1_000),
        );

        store.add_item(&table);

        let snapshot = CheckoutSnapshot::from_cart(store.cart(), &ShippingPolicy::default());

        assert_eq!(snapshot.subtotal(), Decimal::from(1_000));
        assert_eq!(snapshot.shipping(), Decimal::from(99));
        assert_eq!(snapshot.total(), Decimal::from(1_099));
    }

    #[test]
    fn custom_flat_fee_applies() {
        let policy = ShippingPolicy::flat(Decimal::from(150));

        assert_eq!(policy.shipping_for(Decimal::ONE), Decimal::from(150));
        assert_eq!(policy.shipping_for(Decimal::ZERO), Decimal::ZERO);
    }
}
