//! # Streaming Order-Book Pricer
//!
//! A batch pricer for limit-order market logs. It replays a time-ordered
//! stream of Add and Reduce events and, whenever the hypothetical cost of
//! buying (or the proceeds of selling) a fixed number of shares changes,
//! emits one quote line.
//!
//! ## Key Features
//!
//! - **Incremental aggregation**: each side keeps a cursor at the last used
//!   order, partitioning the book into a fully-allocated tier, the marginal
//!   order, and untouched depth. Events move that boundary by the minimum
//!   amount instead of rescanning the book.
//! - **Integer prices throughout**: all monetary values are integer cents;
//!   parsing and formatting never touch floating point.
//! - **Packed order ids**: ids up to 8 ASCII bytes are packed into a `u64`,
//!   so the id index hashes machine words rather than strings.
//! - **Resilient parsing**: malformed lines are diagnosed once per run of
//!   bad input and skipped at line granularity; the replay keeps going.
//! - **Stream-agnostic core**: the engine is generic over `BufRead` input
//!   and `Write` sinks. The `pricer` binary wires it to stdin/stdout with
//!   large buffers; tests and benchmarks drive it from memory.
//!
//! ## Design Goals
//!
//! 1. **Correctness**: the books maintain their aggregate invariants after
//!    every event, verified by brute-force recomputation in the test suite.
//! 2. **Throughput**: per-event work is proportional to how far the
//!    allocation boundary moves, with `O(log n)` sorted-collection steps.
//! 3. **Faithful output**: quote lines, diagnostics, and exit codes follow
//!    the market-log contract exactly, in event order.
//!
//! ## Usage
//!
//! ```
//! use pricer_rs::run;
//! use std::io::Cursor;
//!
//! let log = "28800538 A b S 44.26 100\n28800562 A c S 44.10 100\n";
//! let mut quotes = Vec::new();
//! let status = run(200, Cursor::new(log), &mut quotes, std::io::sink());
//! assert!(status.is_ok());
//! assert_eq!(quotes, b"28800562 B 8836.00\n");
//! ```

pub mod book;
pub mod engine;
pub mod error;
pub mod input;
pub mod prelude;

pub use book::{BookKey, BookSnapshot, Cents, Dollars, Order, OrderBook, OrderId, Quote, Side};
pub use engine::{Dispatcher, OrderIndex, OrderLocation, STREAM_BUFFER_SIZE, run};
pub use error::PricerError;
pub use input::{Event, EventReader, ReadError, TimedEvent};
