//! Prelude module that re-exports commonly used types and functions.
//!
//! Instead of importing each item individually, you can use:
//!
//! ```rust
//! use pricer_rs::prelude::*;
//! ```

// Book types
pub use crate::book::{BookKey, Cents, Order, OrderBook, OrderId, Quote, Side};

// Snapshot types
pub use crate::book::{BookSnapshot, OrderSnapshot};

// Event model and tokenizer
pub use crate::input::{Event, EventReader, ReadError, TimedEvent};

// Stream processing
pub use crate::engine::{Dispatcher, OrderIndex, OrderLocation, run};

// Error taxonomy
pub use crate::error::PricerError;
