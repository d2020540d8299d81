//! Point-in-time views of a book.
//!
//! Snapshots expose the full depth (per-order price, outstanding shares,
//! and allocated shares, best price first) without handing out the book's
//! internal collection. They serialize with serde for export and are what
//! the test suite checks invariants against.

use crate::book::order::{OrderId, Side};
use crate::book::price::Cents;
use serde::Serialize;

/// A serializable copy of one book's state.
#[derive(Debug, Clone, Serialize)]
pub struct BookSnapshot {
    /// Side of the captured book.
    pub side: Side,
    /// Target share count of the aggregate.
    pub target: u64,
    /// Whether the aggregate held the full target at capture time.
    pub valid: bool,
    /// Aggregate price in cents (partial while short).
    pub total_price: Cents,
    /// Allocated shares at capture time.
    pub owned_shares: u64,
    /// Resting orders, best price first.
    pub orders: Vec<OrderSnapshot>,
}

/// One resting order within a [`BookSnapshot`].
#[derive(Debug, Clone, Serialize)]
pub struct OrderSnapshot {
    pub id: OrderId,
    pub price: Cents,
    pub shares: u64,
    pub owned: u64,
}

impl BookSnapshot {
    /// Serializes the snapshot as a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
