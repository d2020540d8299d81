//! Unit tests for the book aggregate.


use crate::book::{OrderBook, OrderId, Side};

pub(super) fn id(token: &str) -> OrderId {
    OrderId::from_token(token).expect("test id")
}

pub(super) fn sell_book(target: u64) -> OrderBook {
    OrderBook::new(Side::Sell, target)
}

pub(super) fn buy_book(target: u64) -> OrderBook {
    OrderBook::new(Side::Buy, target)
}
