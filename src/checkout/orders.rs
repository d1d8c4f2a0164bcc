//! Orders

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{cart::CartLine, pricing::line_total};

/// Order identifier, derived from the completion time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Create an order identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Paid and awaiting dispatch
    #[default]
    Processing,

    /// Handed to the courier
    Shipped,

    /// Received by the customer
    Delivered,

    /// Will not be fulfilled
    Cancelled,
}

impl OrderStatus {
    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A purchased line, copied out of the catalog at completion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product name
    pub name: String,

    /// Unit price paid
    pub price: Decimal,

    /// Units bought
    pub quantity: u32,
}

impl OrderItem {
    /// Unit price multiplied by quantity.
    pub fn line_total(&self) -> Decimal {
        line_total(self.price, self.quantity)
    }
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            name: line.product.name.clone(),
            price: line.product.price,
            quantity: line.quantity,
        }
    }
}

/// A completed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,

    #[serde(rename = "date")]
    created_at: Timestamp,

    items: Vec<OrderItem>,

    status: OrderStatus,

    total: Decimal,
}

impl Order {
    pub(crate) fn new(
        id: OrderId,
        created_at: Timestamp,
        items: Vec<OrderItem>,
        total: Decimal,
    ) -> Self {
        Self {
            id,
            created_at,
            items,
            status: OrderStatus::Processing,
            total,
        }
    }

    /// Order identifier.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// When the order was completed.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Purchased lines.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Fulfilment status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Amount paid.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Units across all lines.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
