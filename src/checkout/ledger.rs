//! Checkout ledger

use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::{
    cart::{Cart, CartStore},
    clock::{Clock, SystemClock},
    notifications::{NoopNotifier, Notifier, Toast},
    storage::{KeyValueStore, read_json, write_json},
};

use super::{
    CHECKOUT_STORAGE_KEY, CheckoutError, CheckoutSnapshot, ORDERS_STORAGE_KEY, Order, OrderId,
    OrderItem, ShippingPolicy,
};

/// Pending checkout snapshot and order history of a session.
///
/// At most one snapshot is pending at a time; starting a new checkout replaces
/// it. Completing an order consumes the snapshot, prepends the order to the
/// history and empties the live cart. If the history cannot be saved, none of
/// that happens and the shopper can retry.
#[derive(Debug)]
pub struct CheckoutLedger<S, N = NoopNotifier, C = SystemClock> {
    store: S,
    notifier: N,
    clock: C,
    policy: ShippingPolicy,
    pending: Option<CheckoutSnapshot>,
    history: Vec<Order>,
    history_readable: bool,
}

impl<S: KeyValueStore> CheckoutLedger<S> {
    /// Load the pending snapshot and order history persisted in `store`.
    ///
    /// Unreadable documents are logged and treated as absent.
    pub fn load(store: S) -> Self {
        let pending = match read_json::<CheckoutSnapshot>(&store, CHECKOUT_STORAGE_KEY) {
            Ok(pending) => pending,
            Err(source) => {
                warn!(%source, "failed to load pending checkout");
                None
            }
        };

        let stored = read_json::<Vec<Order>>(&store, ORDERS_STORAGE_KEY);

        let (history, history_readable) = match stored {
            Ok(history) => (history.unwrap_or_default(), true),
            Err(source) => {
                error!(%source, "failed to load order history");
                (Vec::new(), false)
            }
        };

        debug!(
            pending = pending.is_some(),
            orders = history.len(),
            "loaded checkout ledger"
        );

        Self {
            store,
            notifier: NoopNotifier,
            clock: SystemClock,
            policy: ShippingPolicy::default(),
            pending,
            history,
            history_readable,
        }
    }
}

impl<S, N, C> CheckoutLedger<S, N, C> {
    /// Report notices to `notifier`.
    pub fn with_notifier<N2: Notifier>(self, notifier: N2) -> CheckoutLedger<S, N2, C> {
        CheckoutLedger {
            store: self.store,
            notifier,
            clock: self.clock,
            policy: self.policy,
            pending: self.pending,
            history: self.history,
            history_readable: self.history_readable,
        }
    }

    /// Stamp orders using `clock`.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> CheckoutLedger<S, N, C2> {
        CheckoutLedger {
            store: self.store,
            notifier: self.notifier,
            clock,
            policy: self.policy,
            pending: self.pending,
            history: self.history,
            history_readable: self.history_readable,
        }
    }

    /// Compute shipping with `policy`.
    #[must_use]
    pub fn with_shipping_policy(mut self, policy: ShippingPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl<S: KeyValueStore, N: Notifier, C: Clock> CheckoutLedger<S, N, C> {
    /// Freeze `cart` into a snapshot and store it as the pending checkout.
    ///
    /// The live cart is left untouched.
    pub fn begin_checkout(&mut self, cart: &Cart) -> CheckoutSnapshot {
        let snapshot = CheckoutSnapshot::from_cart(cart, &self.policy);

        info!(
            lines = snapshot.items().len(),
            subtotal = %snapshot.subtotal(),
            shipping = %snapshot.shipping(),
            total = %snapshot.total(),
            "checkout started"
        );

        if let Err(source) = write_json(&self.store, CHECKOUT_STORAGE_KEY, &snapshot) {
            error!(%source, "failed to save checkout data");

            self.notifier.notify(Toast::destructive(
                "Something went wrong",
                "Your checkout could not be saved on this device.",
            ));
        }

        self.pending = Some(snapshot.clone());

        snapshot
    }

    /// Amount due on the payment step.
    ///
    /// The pending snapshot's total wins; without one, the live cart's item
    /// total is used.
    pub fn load_pending_amount(&self, cart: &Cart) -> Decimal {
        self.pending
            .as_ref()
            .map_or_else(|| cart.subtotal(), CheckoutSnapshot::total)
    }

    /// Record a completed purchase of `paid_amount`.
    ///
    /// Items come from the pending snapshot, or are empty without one. The
    /// order is prepended to the history, the pending snapshot is dropped and
    /// `cart` is emptied. Nothing here checks that a payment really happened.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::HistoryUnreadable`] if the stored history could
    /// not be decoded at load, or [`CheckoutError::Storage`] if saving it fails.
    /// In both cases the history, the pending snapshot and `cart` are left as
    /// they were.
    pub fn complete_order<S2, N2>(
        &mut self,
        paid_amount: Decimal,
        cart: &mut CartStore<S2, N2>,
    ) -> Result<Order, CheckoutError>
    where
        S2: KeyValueStore,
        N2: Notifier,
    {
        let items: Vec<OrderItem> = self
            .pending
            .as_ref()
            .map(|snapshot| snapshot.items().iter().map(OrderItem::from).collect())
            .unwrap_or_default();

        let order = Order::new(self.next_order_id(), self.clock.now(), items, paid_amount);

        if let Err(source) = self.save_with(&order) {
            error!(order_id = %order.id(), %source, "failed to save order");

            self.notifier.notify(Toast::destructive(
                "Error Saving Order",
                "There was an error saving your order. Please contact support.",
            ));

            return Err(source);
        }

        self.pending = None;

        if let Err(source) = self.store.remove(CHECKOUT_STORAGE_KEY) {
            warn!(%source, "failed to clear checkout data");
        }

        self.notifier.notify(Toast::new(
            "Order Processed Successfully!",
            "Your payment has been received. Thank you for your purchase!",
        ));

        cart.clear_cart();

        info!(
            order_id = %order.id(),
            total = %order.total(),
            items = order.items().len(),
            "order completed"
        );

        Ok(order)
    }

    /// Persist the history with `order` in front, keeping memory in step only on success.
    fn save_with(&mut self, order: &Order) -> Result<(), CheckoutError> {
        if !self.history_readable {
            return Err(CheckoutError::HistoryUnreadable);
        }

        self.history.insert(0, order.clone());

        if let Err(source) = write_json(&self.store, ORDERS_STORAGE_KEY, &self.history) {
            self.history.remove(0);

            return Err(source.into());
        }

        Ok(())
    }

    fn next_order_id(&self) -> OrderId {
        let now = u64::try_from(self.clock.now().as_millisecond()).unwrap_or_default();

        let after_latest = self
            .history
            .iter()
            .map(|order| order.id().get().saturating_add(1))
            .max()
            .unwrap_or_default();

        OrderId::new(now.max(after_latest))
    }
}

impl<S, N, C> CheckoutLedger<S, N, C> {
    /// Snapshot awaiting payment, if any.
    pub fn pending(&self) -> Option<&CheckoutSnapshot> {
        self.pending.as_ref()
    }

    /// Completed orders, most recent first.
    pub fn orders(&self) -> &[Order] {
        &self.history
    }

    /// Look up an order by identifier.
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.history.iter().find(|order| order.id() == id)
    }

    /// Shipping policy applied at checkout.
    pub fn shipping_policy(&self) -> &ShippingPolicy {
        &self.policy
    }
}
