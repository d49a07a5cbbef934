//! Error types for stock_dashboard

use thiserror::Error;

/// Unified error type for dashboard operations
#[derive(Debug, Error)]
pub enum Error {
    /// File could not be opened, read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed CSV content
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Spreadsheet could not be opened or has no worksheet
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),
    /// JSON rendering failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A column required by the operation is absent from the table
    #[error("Missing column: {0}")]
    MissingColumn(&'static str),
    /// A cell holds something other than a non-negative integer
    #[error("Invalid value {value:?} in column {column} at row {row}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
    /// Summing a column exceeded the integer range
    #[error("Sum of column {0} is too large")]
    Overflow(&'static str),
    /// No row matches the requested product
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    /// A KPI denominator summed to zero
    #[error("Division by zero while computing {0}")]
    DivideByZero(&'static str),
}

impl From<calamine::Error> for Error {
    fn from(err: calamine::Error) -> Self {
        Error::Spreadsheet(err.to_string())
    }
}

/// Result alias for stock_dashboard operations
pub type Result<T> = std::result::Result<T, Error>;
