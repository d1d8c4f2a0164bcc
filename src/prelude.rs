//! DecorNest prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine, CartStore},
    catalog::{Catalog, CatalogError, CatalogPage, CatalogQuery, PriceRange, SortOrder},
    checkout::{
        CheckoutError, CheckoutLedger, CheckoutSnapshot, Order, OrderId, OrderItem, OrderStatus,
        PaymentAmount, ShippingPolicy,
    },
    clock::{Clock, FixedClock, SystemClock},
    fixtures::{Fixture, FixtureError},
    notifications::{NoopNotifier, Notifier, RecordingNotifier, Toast, ToastVariant},
    pricing::format_price,
    products::{Product, ProductCategory, ProductId},
    receipt::ReceiptError,
    storage::{FileStore, KeyValueStore, MemoryStore, StorageError},
};
