//! Property tests: every event prefix leaves the book consistent, and the
//! aggregate always equals what a brute-force recomputation finds.

use pricer_rs::{BookKey, BookSnapshot, OrderBook, OrderId, Side};
use proptest::prelude::*;

fn test_id(n: u32) -> OrderId {
    OrderId::from_token(&format!("o{n}")).expect("generated id fits 8 bytes")
}

/// Greedy oracle: the cheapest/richest way to assemble `target` shares from
/// the resting orders, walking the book best price first.
fn brute_force_total(snapshot: &BookSnapshot) -> Option<u64> {
    let mut need = snapshot.target;
    let mut total = 0u64;
    for order in &snapshot.orders {
        let take = need.min(order.shares);
        total += take * order.price;
        need -= take;
        if need == 0 {
            return Some(total);
        }
    }
    None
}

fn assert_book_consistent(book: &OrderBook) {
    let snap = book.snapshot();

    // Aggregate sums match the per-order allocation.
    let owned: u64 = snap.orders.iter().map(|o| o.owned).sum();
    let weighted: u64 = snap.orders.iter().map(|o| o.owned * o.price).sum();
    assert_eq!(snap.owned_shares, owned);
    assert_eq!(snap.total_price, weighted);

    // The aggregate never overshoots, and validity means exactly on target.
    assert!(snap.owned_shares <= snap.target);
    assert_eq!(snap.valid, snap.owned_shares == snap.target);
    for order in &snap.orders {
        assert!(order.owned <= order.shares);
    }

    // Cursor partition: after the first not-fully-allocated order, nothing
    // worse may hold any allocation.
    let mut boundary_seen = false;
    for order in &snap.orders {
        if boundary_seen {
            assert_eq!(
                order.owned, 0,
                "allocated order found beyond the boundary: {snap:?}"
            );
        } else if order.owned < order.shares {
            boundary_seen = true;
        }
    }

    // A short book has drained every resting share.
    if !snap.valid {
        let resting: u64 = snap.orders.iter().map(|o| o.shares).sum();
        assert!(resting < snap.target);
        assert_eq!(snap.owned_shares, resting);
    }

    // Optimality against the oracle.
    match brute_force_total(&snap) {
        Some(best) => {
            assert!(snap.valid);
            assert_eq!(snap.total_price, best);
        }
        None => assert!(!snap.valid),
    }
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Add { price_step: u64, shares: u64 },
    Reduce { pick: usize, count: u64 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => (0u64..40, 0u64..60).prop_map(|(price_step, shares)| Op::Add { price_step, shares }),
        1 => (any::<usize>(), 1u64..80).prop_map(|(pick, count)| Op::Reduce { pick, count }),
    ]
}

fn replay_ops(side: Side, target: u64, ops: &[Op]) -> OrderBook {
    let mut book = OrderBook::new(side, target);
    let mut live: Vec<BookKey> = Vec::new();
    let mut next_id = 0u32;

    for &op in ops {
        match op {
            Op::Add { price_step, shares } => {
                let (key, _) = book.add(test_id(next_id), 1000 + price_step * 25, shares);
                next_id += 1;
                live.push(key);
            }
            Op::Reduce { pick, count } => {
                if live.is_empty() {
                    continue;
                }
                let slot = pick % live.len();
                let key = live[slot];
                let remaining = book.get(key).map_or(0, |order| order.shares);
                if count >= remaining {
                    book.remove(key);
                    live.swap_remove(slot);
                } else {
                    book.reduce(key, count);
                }
            }
        }
        assert_book_consistent(&book);
    }
    book
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn sell_books_stay_consistent(ops in proptest::collection::vec(op_strategy(), 1..120)) {
        replay_ops(Side::Sell, 100, &ops);
    }

    #[test]
    fn buy_books_stay_consistent(ops in proptest::collection::vec(op_strategy(), 1..120)) {
        replay_ops(Side::Buy, 100, &ops);
    }

    #[test]
    fn tiny_targets_stay_consistent(ops in proptest::collection::vec(op_strategy(), 1..60)) {
        replay_ops(Side::Sell, 1, &ops);
    }

    #[test]
    fn add_then_full_remove_is_a_no_op(
        ops in proptest::collection::vec(op_strategy(), 1..60),
        price_step in 0u64..40,
        shares in 1u64..60,
    ) {
        let mut book = replay_ops(Side::Sell, 100, &ops);
        let before = (book.total_price(), book.owned_shares(), book.is_valid());

        let (key, _) = book.add(test_id(9_999_999), 1000 + price_step * 25, shares);
        book.remove(key);

        prop_assert_eq!(
            (book.total_price(), book.owned_shares(), book.is_valid()),
            before
        );
        assert_book_consistent(&book);
    }
}
