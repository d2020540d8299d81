//! Line tokenizer for the market log.
//!
//! Two line shapes are accepted, ASCII, whitespace-separated:
//!
//! ```text
//! <timestamp> A <order-id> <S|B> <price> <shares>
//! <timestamp> R <order-id> <count>
//! ```
//!
//! Anything else (unknown action, bad field, missing or trailing fields,
//! bytes that are not valid UTF-8) is a recoverable parse error. The reader
//! resynchronizes at the next newline, so one bad line never poisons the
//! rest of the stream. Whitespace-only lines are skipped without comment.

use crate::book::{OrderId, Side, parse_cents, parse_uint};
use crate::input::event::{Event, TimedEvent};
use std::io::{self, BufRead};

/// Failure modes of [`EventReader::next_event`].
#[derive(Debug)]
pub enum ReadError {
    /// The line did not match either grammar. Recoverable: the reader has
    /// already advanced past the offending newline.
    Malformed {
        /// 1-based line number, for diagnostics.
        line: u64,
    },
    /// The underlying stream failed. Fatal.
    Io(io::Error),
}

/// Pull-based event source over any buffered reader.
///
/// The read buffer is reused across lines; steady-state parsing does not
/// allocate.
pub struct EventReader<R> {
    input: R,
    line: Vec<u8>,
    line_no: u64,
}

impl<R: BufRead> EventReader<R> {
    /// Wraps a buffered reader.
    pub fn new(input: R) -> Self {
        EventReader {
            input,
            line: Vec::with_capacity(128),
            line_no: 0,
        }
    }

    /// Reads the next event. `Ok(None)` at end of stream.
    pub fn next_event(&mut self) -> Result<Option<TimedEvent>, ReadError> {
        loop {
            self.line.clear();
            let read = self
                .input
                .read_until(b'\n', &mut self.line)
                .map_err(ReadError::Io)?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let Ok(text) = std::str::from_utf8(&self.line) else {
                return Err(ReadError::Malformed { line: self.line_no });
            };
            if text.trim_ascii().is_empty() {
                continue;
            }
            match parse_event(text) {
                Some(event) => return Ok(Some(event)),
                None => return Err(ReadError::Malformed { line: self.line_no }),
            }
        }
    }
}

/// Parses one non-blank line. `None` on any grammar violation.
fn parse_event(line: &str) -> Option<TimedEvent> {
    let mut fields = line.split_ascii_whitespace();
    let timestamp = parse_uint(fields.next()?)?;

    let event = match fields.next()? {
        "A" => {
            let id = OrderId::from_token(fields.next()?)?;
            let side = Side::from_tag(fields.next()?)?;
            let price = parse_cents(fields.next()?)?;
            let shares = parse_uint(fields.next()?)?;
            Event::Add {
                id,
                side,
                price,
                shares,
            }
        }
        "R" => {
            let id = OrderId::from_token(fields.next()?)?;
            let count = parse_uint(fields.next()?)?;
            Event::Reduce { id, count }
        }
        _ => return None,
    };

    // Trailing fields make the line ambiguous; reject rather than guess.
    if fields.next().is_some() {
        return None;
    }
    Some(TimedEvent { timestamp, event })
}
