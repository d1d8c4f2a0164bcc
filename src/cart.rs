//! Cart

use std::slice;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::{
    notifications::{NoopNotifier, Notifier, Toast},
    pricing::line_total,
    products::{Product, ProductId},
    storage::{KeyValueStore, read_json, write_json},
};

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "decornest-cart";

/// Errors raised when a stored cart breaks the cart invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A line carried a quantity below one.
    #[error("cart line for product {0} has zero quantity")]
    ZeroQuantity(ProductId),

    /// Two lines referenced the same product.
    #[error("cart has more than one line for product {0}")]
    DuplicateLine(ProductId),
}

/// One product and how many units of it are in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product as it was when first added
    pub product: Product,

    /// Units of the product, always at least one
    pub quantity: u32,
}

impl CartLine {
    /// Create a line holding a single unit of `product`.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// Identifier of the product on this line.
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price multiplied by quantity.
    pub fn line_total(&self) -> Decimal {
        line_total(self.product.price, self.quantity)
    }
}

/// Ordered cart lines, at most one per product.
///
/// Lines stay in the order their product was first added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, CartLine> {
        self.lines.iter()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line for `product_id`, if present.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.product_id() == product_id)
    }

    /// Check if `product_id` has a line.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.line(product_id).is_some()
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Add one unit of `product`, returning the line's new quantity.
    fn add(&mut self, product: &Product) -> u32 {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id() == product.id)
        {
            line.quantity = line.quantity.saturating_add(1);

            return line.quantity;
        }

        self.lines.push(CartLine::new(product.clone()));

        1
    }

    fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| line.product_id() != product_id);

        self.lines.len() != before
    }

    fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> bool {
        match self
            .lines
            .iter_mut()
            .find(|line| line.product_id() == product_id)
        {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        self.lines.clear();
    }
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = CartError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        for (idx, line) in lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(CartError::ZeroQuantity(line.product_id()));
            }

            let earlier = lines.iter().take(idx);

            if earlier
                .map(CartLine::product_id)
                .any(|id| id == line.product_id())
            {
                return Err(CartError::DuplicateLine(line.product_id()));
            }
        }

        Ok(Self { lines })
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The live cart of a session, mirrored to durable storage after every change.
///
/// Storage failures never interrupt a mutation: they are logged, reported to
/// the notifier, and the in-memory cart stays authoritative.
#[derive(Debug)]
pub struct CartStore<S, N = NoopNotifier> {
    store: S,
    notifier: N,
    cart: Cart,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Load the cart persisted in `store`, or start empty.
    pub fn load(store: S) -> Self {
        Self::load_with_notifier(store, NoopNotifier)
    }
}

impl<S: KeyValueStore, N: Notifier> CartStore<S, N> {
    /// Load the cart persisted in `store`, reporting notices to `notifier`.
    ///
    /// A stored cart that cannot be read or decoded is discarded and the
    /// session starts with an empty cart.
    pub fn load_with_notifier(store: S, notifier: N) -> Self {
        let cart = match read_json::<Cart>(&store, CART_STORAGE_KEY) {
            Ok(Some(cart)) => {
                debug!(lines = cart.len(), "rehydrated cart from storage");
                cart
            }
            Ok(None) => Cart::new(),
            Err(source) => {
                error!(%source, "failed to load cart from storage");
                Cart::new()
            }
        };

        Self {
            store,
            notifier,
            cart,
        }
    }

    /// Current cart contents.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current lines in insertion order.
    pub fn items(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Add one unit of `product`, creating its line if needed.
    pub fn add_item(&mut self, product: &Product) {
        let quantity = self.cart.add(product);

        debug!(product_id = %product.id, quantity, "added item to cart");

        self.persist();

        self.notifier.notify(Toast::new(
            "Item added to cart",
            format!("{} has been added to your cart.", product.name),
        ));
    }

    /// Drop the line for `product_id`. Missing lines are ignored.
    pub fn remove_item(&mut self, product_id: ProductId) {
        let removed = self.cart.remove(product_id);

        debug!(%product_id, removed, "removed item from cart");

        self.persist();

        self.notifier.notify(Toast::new(
            "Item removed",
            "The item has been removed from your cart.",
        ));
    }

    /// Replace the quantity on the line for `product_id`.
    ///
    /// Quantities below one are ignored; use [`CartStore::remove_item`] to drop
    /// a line. Missing lines are ignored.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity < 1 {
            debug!(%product_id, quantity, "ignored quantity below one");
            return;
        }

        let Ok(quantity) = u32::try_from(quantity) else {
            warn!(%product_id, quantity, "ignored quantity out of range");
            return;
        };

        let updated = self.cart.set_quantity(product_id, quantity);

        debug!(%product_id, quantity, updated, "updated cart quantity");

        self.persist();
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();

        debug!("cleared cart");

        self.persist();

        self.notifier.notify(Toast::new(
            "Cart cleared",
            "All items have been removed from your cart.",
        ));
    }

    /// Check if `product_id` is in the cart.
    pub fn is_in_cart(&self, product_id: ProductId) -> bool {
        self.cart.contains(product_id)
    }

    /// Sum of quantities, as shown on the cart badge.
    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    /// Sum of price times quantity over all lines.
    pub fn total_price(&self) -> Decimal {
        self.cart.subtotal()
    }

    fn persist(&self) {
        if let Err(source) = write_json(&self.store, CART_STORAGE_KEY, &self.cart) {
            error!(%source, "failed to save cart to storage");

            self.notifier.notify(Toast::destructive(
                "Something went wrong",
                "Your cart could not be saved on this device.",
            ));
        }
    }
}
