//! Error types for the ofx_ingest library.
//!
//! The statement parser and classifier never fail; errors here cover the
//! surrounding I/O and CSV concerns only.

use std::io;
use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading inputs or writing outputs.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred during read or write operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading or writing CSV data.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Invalid output format specified.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}
