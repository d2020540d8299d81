//! Id → location index shared across both books.
//!
//! A Reduce names only an order id; the index recovers which book the order
//! rests in and its position handle there, so no book is ever searched by
//! id. Entries are inserted on Add and deleted in the same dispatcher step
//! that erases the order from its book.

use crate::book::{BookKey, OrderId, Side};
use std::collections::HashMap;

/// Where a live order rests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLocation {
    /// Book holding the order.
    pub side: Side,
    /// Position handle within that book.
    pub key: BookKey,
}

/// Mapping from order id to the order's resting place.
#[derive(Debug, Default)]
pub struct OrderIndex {
    orders: HashMap<OrderId, OrderLocation>,
}

impl OrderIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        OrderIndex {
            orders: HashMap::new(),
        }
    }

    /// True when `id` names a live order.
    #[inline]
    pub fn contains(&self, id: OrderId) -> bool {
        self.orders.contains_key(&id)
    }

    /// Looks up a live order's location.
    #[inline]
    pub fn get(&self, id: OrderId) -> Option<OrderLocation> {
        self.orders.get(&id).copied()
    }

    /// Records a newly added order. The caller has already checked for
    /// duplicates.
    #[inline]
    pub fn insert(&mut self, id: OrderId, location: OrderLocation) {
        self.orders.insert(id, location);
    }

    /// Drops a fully removed order.
    #[inline]
    pub fn remove(&mut self, id: OrderId) -> Option<OrderLocation> {
        self.orders.remove(&id)
    }

    /// Number of live orders across both books.
    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// True when no orders are live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
