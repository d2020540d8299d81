//! Program-wide error taxonomy.
//!
//! Every kind carries a fixed diagnostic message and a stable exit code.
//! Recoverable kinds are written to the error sink and the stream continues;
//! fatal kinds stop processing. The process exit code is the code of the
//! last non-success kind observed, or zero.

use crate::book::OrderId;
use std::fmt;
use std::io;

/// Everything that can go wrong while pricing a stream.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum PricerError {
    /// The target share count was absent or out of range.
    InvalidCmdLine,

    /// An input or output stream could not be read or written.
    InvalidStream {
        /// The underlying I/O error message.
        message: String,
    },

    /// A line in the input did not match the event grammar.
    Parse {
        /// 1-based line number of the first offending line.
        line: u64,
    },

    /// A Reduce referenced an id with no live order.
    OrderNotFound {
        /// The id that failed to resolve.
        id: OrderId,
    },

    /// A Reduce asked for more shares than the order has left.
    ReduceOutOfRange {
        /// The order being reduced.
        id: OrderId,
        /// Requested share count.
        count: u64,
        /// Shares actually outstanding.
        remaining: u64,
    },

    /// The event parsed but does not make sense against the live book,
    /// e.g. an Add reusing an id that is still resting.
    InvalidData,

    /// An allocation failed.
    OutOfMemory,
}

impl PricerError {
    /// Process exit code for this kind. Zero is reserved for success.
    pub fn exit_code(&self) -> u8 {
        match self {
            PricerError::InvalidData => 1,
            PricerError::OutOfMemory => 3,
            PricerError::InvalidCmdLine => 4,
            PricerError::OrderNotFound { .. } => 5,
            PricerError::ReduceOutOfRange { .. } => 6,
            PricerError::Parse { .. } => 7,
            PricerError::InvalidStream { .. } => 8,
        }
    }

    /// Whether this kind terminates processing.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PricerError::InvalidCmdLine
                | PricerError::InvalidStream { .. }
                | PricerError::OutOfMemory
        )
    }
}

impl fmt::Display for PricerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            PricerError::InvalidCmdLine => "Usage: pricer <target-shares>",
            PricerError::InvalidStream { .. } => "Input stream invalid.",
            PricerError::Parse { .. } => "Parser error.",
            PricerError::OrderNotFound { .. } => "No matching Add found.",
            PricerError::ReduceOutOfRange { .. } => "Not enough shares for reduce.",
            PricerError::InvalidData => "Invalid input data.",
            PricerError::OutOfMemory => "Error allocating memory.",
        };
        f.write_str(message)
    }
}

impl std::error::Error for PricerError {}

impl From<io::Error> for PricerError {
    #[cold]
    fn from(err: io::Error) -> Self {
        PricerError::InvalidStream {
            message: err.to_string(),
        }
    }
}
