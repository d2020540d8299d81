//! One side of the market: price-sorted resting orders plus the incremental
//! aggregate over the best-priced `target` shares.
//!
//! The book tracks, across every mutation, the cheapest (Buy book, feeding
//! Ask quotes) or richest (Sell book, feeding Bid quotes) accumulation of
//! exactly `target` shares drawn from its resting orders. The aggregate is
//! never recomputed from scratch: a cursor at the *last used order*
//! partitions the book into a fully-allocated prefix, the (possibly partial)
//! cursor order, and a zero-allocated suffix, and every operation moves that
//! boundary by the minimum amount.
//!
//! Mutations return a [`Quote`] when the reportable state changed; the
//! caller owns the output stream.

use super::order::{BookKey, Order, OrderId, Side};
use super::price::Cents;
use super::quote::Quote;
use super::snapshot::{BookSnapshot, OrderSnapshot};
use std::collections::BTreeMap;
use std::ops::Bound;
use tracing::trace;

/// A price-sorted book for one market side with its running aggregate.
pub struct OrderBook {
    side: Side,
    target: u64,
    orders: BTreeMap<BookKey, Order>,

    /// True iff the allocated shares sum to exactly `target`.
    valid: bool,
    /// Price-weighted sum of allocated shares, in cents.
    total_price: Cents,
    /// Raw sum of allocated shares. Never exceeds `target`.
    owned_shares: u64,
    /// The worst-priced order currently contributing to the aggregate.
    /// `None` while nothing has ever been allocated or the book is empty.
    last_used: Option<BookKey>,

    next_seq: u64,
}

impl OrderBook {
    /// Creates an empty book for `side` aggregating `target` shares.
    pub fn new(side: Side, target: u64) -> Self {
        OrderBook {
            side,
            target,
            orders: BTreeMap::new(),
            valid: false,
            total_price: 0,
            owned_shares: 0,
            last_used: None,
            next_seq: 0,
        }
    }

    /// The side this book holds.
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// The target share count the aggregate tracks.
    #[inline]
    pub fn target(&self) -> u64 {
        self.target
    }

    /// Whether the book currently holds the full target.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Current aggregate price in cents (partial while the book is short).
    #[inline]
    pub fn total_price(&self) -> Cents {
        self.total_price
    }

    /// Shares currently counted toward the aggregate.
    #[inline]
    pub fn owned_shares(&self) -> u64 {
        self.owned_shares
    }

    /// Number of live resting orders.
    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// True when no orders rest on this side.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Looks up a resting order by its position handle.
    #[inline]
    pub fn get(&self, key: BookKey) -> Option<&Order> {
        self.orders.get(&key)
    }

    /// Inserts a new order and updates the aggregate.
    ///
    /// Returns the order's position handle and, when the reportable state
    /// changed, the new quote. An add can raise validity but never drop it.
    pub fn add(&mut self, id: OrderId, limit_price: Cents, shares: u64) -> (BookKey, Option<Quote>) {
        let key = BookKey {
            rank: BookKey::rank_for(self.side, limit_price),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.orders.insert(
            key,
            Order {
                id,
                limit_price,
                shares,
                owned: 0,
            },
        );
        trace!(%id, side = %self.side, limit_price, shares, "add order");

        let prev_price = self.total_price;
        let needed = self.target - self.owned_shares;

        // Everything past the cursor is unallocated, everything up to it is
        // spoken for; which side of it the order lands on decides whether
        // anyone gets displaced.
        let beyond_cursor = self.last_used.is_none_or(|cursor| key > cursor);

        if beyond_cursor {
            // Worst end of the allocated region. Take shares only if the
            // aggregate still needs them; at target, a worse order cannot
            // improve it.
            if needed > 0 {
                let take = needed.min(shares);
                if let Some(order) = self.orders.get_mut(&key) {
                    order.owned = take;
                }
                self.owned_shares += take;
                self.total_price += take * limit_price;
                if take == needed {
                    self.valid = true;
                }
                self.last_used = Some(key);
            }
        } else if shares <= needed {
            // Better-priced than the margin but small enough to absorb
            // without displacement.
            if let Some(order) = self.orders.get_mut(&key) {
                order.owned = shares;
            }
            self.owned_shares += shares;
            self.total_price += shares * limit_price;
            self.valid = self.owned_shares == self.target;
        } else {
            // Over-allocate the new order, then drain the overflow from the
            // cursor backwards toward better prices.
            if let Some(order) = self.orders.get_mut(&key) {
                order.owned = shares;
            }
            self.owned_shares += shares;
            self.total_price += shares * limit_price;
            self.drain_overflow();
        }

        let quote = (self.valid && self.total_price != prev_price).then(|| self.quote());
        (key, quote)
    }

    /// Decrements an order's outstanding shares by `count`.
    ///
    /// The caller guarantees `count` is strictly below the order's remaining
    /// shares; a full reduce goes through [`OrderBook::remove`] instead.
    pub fn reduce(&mut self, key: BookKey, count: u64) -> Option<Quote> {
        let prev_valid = self.valid;
        let prev_price = self.total_price;

        let Some(order) = self.orders.get_mut(&key) else {
            return None;
        };
        trace!(id = %order.id, side = %self.side, count, "reduce order");
        order.shares -= count;

        if order.owned > order.shares {
            // The aggregate counted shares that no longer exist; give them
            // back and look for replacements from the cursor outward.
            let excess = order.owned - order.shares;
            let price = order.limit_price;
            order.owned = order.shares;
            self.owned_shares -= excess;
            self.total_price -= excess * price;
            self.valid = false;
            self.refill();
        }

        self.quote_if_changed(prev_valid, prev_price)
    }

    /// Removes an order outright, restoring the aggregate from worse-priced
    /// liquidity where possible.
    pub fn remove(&mut self, key: BookKey) -> Option<Quote> {
        let prev_valid = self.valid;
        let prev_price = self.total_price;

        let Some(order) = self.orders.get(&key) else {
            return None;
        };
        let freed = order.owned;
        let price = order.limit_price;
        trace!(id = %order.id, side = %self.side, freed, "remove order");

        // Step the cursor off the doomed key before erasing it.
        if self.last_used == Some(key) {
            self.last_used = self.next_better(key);
        }
        self.orders.remove(&key);

        if freed > 0 {
            self.owned_shares -= freed;
            self.total_price -= freed * price;
            self.valid = false;
            if self.last_used.is_none() {
                // The cursor was the best order; restart at the new best.
                self.last_used = self.best_key();
            }
            self.refill();
        }

        self.quote_if_changed(prev_valid, prev_price)
    }

    /// Drains `owned_shares - target` back out of the aggregate, walking the
    /// cursor from the margin toward better prices.
    fn drain_overflow(&mut self) {
        let mut overflow = self.owned_shares - self.target;
        let mut cursor = self.last_used;

        while self.owned_shares != self.target {
            let Some(key) = cursor else { break };
            let Some(order) = self.orders.get_mut(&key) else {
                break;
            };
            if order.owned < overflow {
                let released = order.owned;
                order.owned = 0;
                overflow -= released;
                self.owned_shares -= released;
                self.total_price -= released * order.limit_price;
            } else {
                order.owned -= overflow;
                self.owned_shares -= overflow;
                self.total_price -= overflow * order.limit_price;
                self.valid = true;
                if order.owned != 0 {
                    self.last_used = Some(key);
                    break;
                }
                overflow = 0;
            }
            cursor = self.next_better(key);
            self.last_used = cursor;
        }
    }

    /// Pulls unallocated shares into the aggregate, scanning from the cursor
    /// (inclusive, it may have freed capacity) toward worse prices. Orders
    /// better than the cursor are fully allocated already and offer nothing.
    fn refill(&mut self) {
        let mut scan = self.last_used.or_else(|| self.best_key());

        while let Some(key) = scan {
            let Some(order) = self.orders.get(&key) else {
                break;
            };
            let free = order.free();
            let price = order.limit_price;
            if free == 0 {
                scan = self.next_worse(key);
                continue;
            }

            let need = self.target - self.owned_shares;
            let take = need.min(free);
            if let Some(order) = self.orders.get_mut(&key) {
                order.owned += take;
            }
            self.owned_shares += take;
            self.total_price += take * price;
            self.last_used = Some(key);

            if take == need {
                self.valid = true;
                return;
            }
            scan = self.next_worse(key);
        }
        // Book exhausted short of target; the aggregate stays partial.
    }

    /// The current quote for this book.
    #[inline]
    fn quote(&self) -> Quote {
        Quote {
            side: self.side,
            total: self.valid.then_some(self.total_price),
        }
    }

    #[inline]
    fn quote_if_changed(&self, prev_valid: bool, prev_price: Cents) -> Option<Quote> {
        let changed =
            self.valid != prev_valid || (self.valid && self.total_price != prev_price);
        changed.then(|| self.quote())
    }

    #[inline]
    fn best_key(&self) -> Option<BookKey> {
        self.orders.keys().next().copied()
    }

    /// The next order in the worse-price direction, if any.
    #[inline]
    fn next_worse(&self, key: BookKey) -> Option<BookKey> {
        self.orders
            .range((Bound::Excluded(key), Bound::Unbounded))
            .next()
            .map(|(k, _)| *k)
    }

    /// The next order in the better-price direction, if any.
    #[inline]
    fn next_better(&self, key: BookKey) -> Option<BookKey> {
        self.orders.range(..key).next_back().map(|(k, _)| *k)
    }

    /// Captures the book state, best price first.
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            side: self.side,
            target: self.target,
            valid: self.valid,
            total_price: self.total_price,
            owned_shares: self.owned_shares,
            orders: self
                .orders
                .values()
                .map(|order| OrderSnapshot {
                    id: order.id,
                    price: order.limit_price,
                    shares: order.shares,
                    owned: order.owned,
                })
                .collect(),
        }
    }
}
