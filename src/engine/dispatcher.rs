//! Event dispatcher: drives the stream into the books and the output sink.
//!
//! One event is fully processed, including any quote emission, before the
//! next is read, so output lines appear in event order. The dispatcher owns
//! both books, the id index, and the sinks; diagnostics required by the
//! output contract go to the error sink as fixed one-line messages, while
//! structured context rides on `tracing`.

use crate::book::{OrderBook, OrderId, Quote, Side};
use crate::engine::index::{OrderIndex, OrderLocation};
use crate::error::PricerError;
use crate::input::{Event, EventReader, ReadError, TimedEvent};
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

/// Routes parsed events to the right book and forwards quote changes.
pub struct Dispatcher<O, E> {
    /// Resting buys; feeds Ask quotes.
    buys: OrderBook,
    /// Resting sells; feeds Bid quotes.
    sells: OrderBook,
    index: OrderIndex,
    out: O,
    err: E,

    timestamp: u64,
    /// Set while inside a contiguous run of malformed lines, so the parser
    /// diagnostic prints once per run.
    in_parse_error: bool,
    last_failure: Option<PricerError>,
}

impl<O: Write, E: Write> Dispatcher<O, E> {
    /// Creates a dispatcher pricing `target_shares` per side.
    pub fn new(target_shares: u64, out: O, err: E) -> Self {
        Dispatcher {
            buys: OrderBook::new(Side::Buy, target_shares),
            sells: OrderBook::new(Side::Sell, target_shares),
            index: OrderIndex::new(),
            out,
            err,
            timestamp: 0,
            in_parse_error: false,
            last_failure: None,
        }
    }

    /// The book holding `side`.
    pub fn book(&self, side: Side) -> &OrderBook {
        match side {
            Side::Buy => &self.buys,
            Side::Sell => &self.sells,
        }
    }

    fn book_mut(&mut self, side: Side) -> &mut OrderBook {
        match side {
            Side::Buy => &mut self.buys,
            Side::Sell => &mut self.sells,
        }
    }

    /// Consumes the reader to end of stream.
    ///
    /// Recoverable failures are diagnosed and the stream continues; only
    /// I/O failures propagate.
    pub fn process<R: BufRead>(
        &mut self,
        reader: &mut EventReader<R>,
    ) -> Result<(), PricerError> {
        loop {
            match reader.next_event() {
                Ok(Some(event)) => {
                    self.in_parse_error = false;
                    self.apply(event)?;
                }
                Ok(None) => return Ok(()),
                Err(ReadError::Io(err)) => return Err(err.into()),
                Err(ReadError::Malformed { line }) => {
                    debug!(line, "skipping malformed input line");
                    if !self.in_parse_error {
                        self.in_parse_error = true;
                        self.diagnose(PricerError::Parse { line })?;
                    }
                }
            }
        }
    }

    /// Flushes the output sink and reports the stream's final status: the
    /// last non-success kind observed, if any.
    pub fn finish(mut self) -> Result<(), PricerError> {
        self.out.flush()?;
        match self.last_failure.take() {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    /// Applies one parsed event. Only sink I/O failures are returned.
    fn apply(&mut self, event: TimedEvent) -> Result<(), PricerError> {
        self.timestamp = event.timestamp;
        match event.event {
            Event::Add {
                id,
                side,
                price,
                shares,
            } => self.apply_add(id, side, price, shares),
            Event::Reduce { id, count } => self.apply_reduce(id, count),
        }
    }

    fn apply_add(
        &mut self,
        id: OrderId,
        side: Side,
        price: u64,
        shares: u64,
    ) -> Result<(), PricerError> {
        if self.index.contains(id) {
            warn!(%id, "add reuses an id that is still resting");
            return self.diagnose(PricerError::InvalidData);
        }
        let (key, quote) = self.book_mut(side).add(id, price, shares);
        self.index.insert(id, OrderLocation { side, key });
        self.publish(quote)
    }

    fn apply_reduce(&mut self, id: OrderId, count: u64) -> Result<(), PricerError> {
        let Some(location) = self.index.get(id) else {
            warn!(%id, count, "reduce for unknown order");
            return self.diagnose(PricerError::OrderNotFound { id });
        };
        let Some(remaining) = self
            .book(location.side)
            .get(location.key)
            .map(|order| order.shares)
        else {
            // Index and book disagree; treat like a missing order.
            warn!(%id, "indexed order missing from its book");
            return self.diagnose(PricerError::OrderNotFound { id });
        };

        let quote = if count >= remaining {
            if count > remaining {
                warn!(%id, count, remaining, "reduce exceeds outstanding shares");
                self.diagnose(PricerError::ReduceOutOfRange {
                    id,
                    count,
                    remaining,
                })?;
            }
            let quote = self.book_mut(location.side).remove(location.key);
            self.index.remove(id);
            quote
        } else {
            self.book_mut(location.side).reduce(location.key, count)
        };
        self.publish(quote)
    }

    /// Writes one quote line under the current timestamp.
    fn publish(&mut self, quote: Option<Quote>) -> Result<(), PricerError> {
        if let Some(quote) = quote {
            writeln!(self.out, "{} {}", self.timestamp, quote).map_err(io_failure)?;
        }
        Ok(())
    }

    /// Writes the fixed message for a recoverable failure and records it as
    /// the stream's latest status.
    fn diagnose(&mut self, failure: PricerError) -> Result<(), PricerError> {
        writeln!(self.err, "{failure}").map_err(io_failure)?;
        self.last_failure = Some(failure);
        Ok(())
    }
}

#[cold]
fn io_failure(err: io::Error) -> PricerError {
    err.into()
}
