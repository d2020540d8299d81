//! Stream processing: the dispatcher, the id index, and the `run` entry
//! point wiring them to concrete streams.

mod dispatcher;
mod index;

pub use dispatcher::Dispatcher;
pub use index::{OrderIndex, OrderLocation};

use crate::error::PricerError;
use crate::input::EventReader;
use std::io::{BufRead, Write};

/// Buffer capacity used when wrapping raw file descriptors in the binary.
/// Large enough to amortize syscalls on market-log replays.
pub const STREAM_BUFFER_SIZE: usize = 128 * 1024;

/// Prices `target_shares` against the event stream on `input`, writing quote
/// lines to `out` and diagnostics to `err`.
///
/// Processes the stream to completion where possible: recoverable failures
/// (malformed lines, unknown ids, oversized reduces) are diagnosed and the
/// replay continues. The returned error is either a fatal stream failure or,
/// after a complete run, the last recoverable failure observed; its
/// [`exit_code`](PricerError::exit_code) is the process's final status.
///
/// # Errors
/// [`PricerError::InvalidStream`] on any I/O failure; otherwise the last
/// diagnosed kind, if any.
pub fn run<R, O, E>(target_shares: u64, input: R, out: O, err: E) -> Result<(), PricerError>
where
    R: BufRead,
    O: Write,
    E: Write,
{
    let mut reader = EventReader::new(input);
    let mut dispatcher = Dispatcher::new(target_shares, out, err);
    dispatcher.process(&mut reader)?;
    dispatcher.finish()
}
