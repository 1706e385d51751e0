//! OFX Ingest Library
//!
//! A library for parsing OFX-style bank statements and classifying their
//! transactions against user-defined keyword categories.
//!
//! # Components
//!
//! - **Statement parser**: converts tag-delimited statement text into a
//!   structured [`types::StatementResult`]. Parsing never fails; missing or
//!   malformed fields degrade to documented defaults.
//! - **Transaction classifier**: assigns at most one category to a
//!   description by case-insensitive keyword containment, first match wins.
//!
//! # Examples
//!
//! ## Parsing a statement
//!
//! ```no_run
//! use std::fs::File;
//! use ofx_ingest::ofx_format::OfxStatement;
//!
//! let mut file = File::open("statement.ofx")?;
//! let parsed = OfxStatement::from_read(&mut file)?;
//! println!("{} transactions", parsed.statement.transactions.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Classifying a description
//!
//! ```
//! use ofx_ingest::classify::classify;
//! use ofx_ingest::types::Category;
//!
//! let categories = vec![Category {
//!     id: "1".into(),
//!     name: "Moradia".into(),
//!     category_type: "expense".into(),
//!     keywords: Some("aluguel,condomínio".into()),
//! }];
//!
//! let verdict = classify("Aluguel Fevereiro", &categories);
//! assert_eq!(verdict.category_name.as_deref(), Some("Moradia"));
//! ```

pub mod classify;
pub mod csv_format;
pub mod error;
pub mod ofx_format;
pub mod types;

use std::str::FromStr;

// Re-export commonly used types
pub use classify::{classify, Classification};
pub use error::{Error, Result};
pub use types::{Category, Direction, StatementResult, Transaction};

/// Supported output formats for the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Tag-delimited OFX-style statement text.
    Ofx,
    /// CSV export, one transaction per row.
    Csv,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ofx" | "qfx" => Ok(Format::Ofx),
            "csv" => Ok(Format::Csv),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

impl Format {
    /// Get file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Ofx => "ofx",
            Format::Csv => "csv",
        }
    }
}
