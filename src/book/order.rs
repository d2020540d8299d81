//! Order records and the ordering discipline of the book.
//!
//! Each side keeps its resting orders in a `BTreeMap` keyed by [`BookKey`].
//! The key encodes the limit price so that ascending key order always walks
//! from the best price to the worst, on both sides: the Sell book ranks by
//! price directly (cheapest first), the Buy book by the complement of the
//! price (richest first). Insertion sequence breaks price ties, giving the
//! stable ordering the aggregate depends on.

use crate::book::price::Cents;
use serde::{Serialize, Serializer};
use std::fmt;

/// Market side of a resting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    /// Resting buy order. The Buy book feeds Ask quotes.
    Buy,
    /// Resting sell order. The Sell book feeds Bid quotes.
    Sell,
}

impl Side {
    /// Parses the one-byte side tag used on the wire.
    pub fn from_tag(tag: &str) -> Option<Side> {
        match tag {
            "B" => Some(Side::Buy),
            "S" => Some(Side::Sell),
            _ => None,
        }
    }

    /// The action character reported on quote lines, inverted from the book
    /// side: resting buys mean we would be selling, and vice versa.
    #[inline]
    pub fn quote_tag(self) -> char {
        match self {
            Side::Buy => 'S',
            Side::Sell => 'B',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("B"),
            Side::Sell => f.write_str("S"),
        }
    }
}

/// An order identifier, up to 8 printable-ASCII bytes packed big-endian
/// into a `u64`.
///
/// Ids are opaque tokens used only for Reduce lookups, so the packed form
/// doubles as the hash key. Tokens longer than 8 bytes do not fit and are
/// rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(u64);

impl OrderId {
    /// Packs a wire token. `None` when empty, over 8 bytes, or containing
    /// non-printable or whitespace bytes.
    pub fn from_token(token: &str) -> Option<OrderId> {
        let bytes = token.as_bytes();
        if bytes.is_empty() || bytes.len() > 8 {
            return None;
        }
        let mut packed: u64 = 0;
        for &b in bytes {
            if !(b'!'..=b'~').contains(&b) {
                return None;
            }
            packed = packed << 8 | u64::from(b);
        }
        Some(OrderId(packed))
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0.to_be_bytes();
        for &b in bytes.iter().skip_while(|&&b| b == 0) {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl Serialize for OrderId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Position handle of an order within its book.
///
/// `rank` carries the side-encoded price, `seq` the per-book insertion
/// counter. Keys are never reused; erasing by key is O(log n) with no
/// re-search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BookKey {
    pub(super) rank: u64,
    pub(super) seq: u64,
}

impl BookKey {
    /// Encodes `price` for `side` so that ascending rank is best→worst.
    #[inline]
    pub(super) fn rank_for(side: Side, price: Cents) -> u64 {
        match side {
            Side::Sell => price,
            Side::Buy => !price,
        }
    }
}

/// One live resting order.
///
/// `shares` is the remaining outstanding quantity and only ever decreases;
/// `owned` is the portion currently counted toward the book's aggregate.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub limit_price: Cents,
    pub shares: u64,
    pub owned: u64,
}

impl Order {
    /// Shares this order could still contribute to the aggregate.
    #[inline]
    pub fn free(&self) -> u64 {
        self.shares - self.owned
    }
}
