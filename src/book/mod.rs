//! Order books and the incremental target-shares aggregate.

mod book;
mod order;
mod price;
mod quote;
mod snapshot;

#[cfg(test)]
mod tests;

pub use book::OrderBook;
pub use order::{BookKey, Order, OrderId, Side};
pub use price::{Cents, Dollars, parse_cents};
pub use quote::Quote;
pub use snapshot::{BookSnapshot, OrderSnapshot};

pub(crate) use price::parse_uint;
