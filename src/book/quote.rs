//! Quote values emitted by book mutations.

use crate::book::order::Side;
use crate::book::price::{Cents, Dollars};
use serde::Serialize;
use std::fmt;

/// A change in the execution price of the target quantity on one book.
///
/// `total` is the price-weighted sum over the allocated shares when the book
/// holds the full target, `None` when it is short. The dispatcher pairs each
/// quote with the triggering event's timestamp and writes one output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// Side of the book that produced the quote (the printed action
    /// character is the opposite side).
    pub side: Side,
    /// Aggregate price in cents, or `None` when the book is short of target.
    pub total: Option<Cents>,
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.total {
            Some(cents) => write!(f, "{} {}", self.side.quote_tag(), Dollars(cents)),
            None => write!(f, "{} NA", self.side.quote_tag()),
        }
    }
}
