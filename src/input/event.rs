//! Parsed market-log events.

use crate::book::{Cents, OrderId, Side};

/// One market-log event, without its timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A new resting limit order.
    Add {
        id: OrderId,
        side: Side,
        price: Cents,
        shares: u64,
    },
    /// Removal of shares from an existing order.
    Reduce { id: OrderId, count: u64 },
}

/// An event paired with the timestamp it arrived under.
///
/// Timestamps are opaque non-decreasing integers; they are echoed on quote
/// lines and never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedEvent {
    pub timestamp: u64,
    pub event: Event,
}
