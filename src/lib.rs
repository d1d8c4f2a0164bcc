//! DecorNest
//!
//! Storefront core for the DecorNest home decor shop: a persisted shopping cart,
//! a checkout ledger that freezes the cart into a summary and turns payments into
//! orders, and the product catalog the cart draws from.
//!
//! Every piece of state lives in a [`storage::KeyValueStore`] under a fixed key,
//! so a session can be reloaded from an in-memory map in tests or from a data
//! directory on disk.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod clock;
pub mod fixtures;
pub mod notifications;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod storage;
