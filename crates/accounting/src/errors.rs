//! Core error types for the accounting engine.
//!
//! All failures are synchronous return-style values. Empty input is never an
//! error; invalid records reject the whole batch so that silent skipping can
//! not corrupt downstream P&L.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the accounting engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Accounting calculation failed: {0}")]
    Calculation(#[from] CalculatorError),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

#[derive(Error, Debug)]
pub enum CalculatorError {
    /// A sell exceeded the tracked inventory for its symbol.
    #[error("Insufficient inventory for {symbol}: selling {requested} with {available} held on {date}")]
    InsufficientInventory {
        symbol: String,
        requested: Decimal,
        available: Decimal,
        date: DateTime<Utc>,
    },

    #[error("Calculation failed: {0}")]
    Calculation(String),
}
