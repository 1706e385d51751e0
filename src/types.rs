//! Common types shared by the statement parser and the classifier.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a single posted transaction from a bank statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Statement-assigned unique identifier (FITID), or a synthesized
    /// placeholder when the statement supplies none.
    pub id: String,

    /// Calendar date the transaction posted. `None` when the statement's
    /// date value is missing or unparseable.
    pub date: Option<NaiveDate>,

    /// Transaction magnitude. Always non-negative; the sign of the raw
    /// statement amount is captured in `direction` instead.
    pub amount: Decimal,

    /// Human-readable description (memo, payee name, or a placeholder).
    pub description: String,

    /// Whether the transaction is inbound or outbound.
    pub direction: Direction,
}

/// Transaction direction, derived from the sign of the raw statement amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Incoming transaction (raw amount >= 0).
    Credit,
    /// Outgoing transaction (raw amount < 0).
    Debit,
}

impl Direction {
    /// Derive the direction from a signed statement amount.
    pub fn from_signed(amount: Decimal) -> Self {
        if amount < Decimal::ZERO {
            Direction::Debit
        } else {
            Direction::Credit
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Credit => "CREDIT",
            Direction::Debit => "DEBIT",
        }
    }
}

/// The result of parsing one statement document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementResult {
    /// Issuing bank name. Empty string when absent in the source.
    pub bank_name: String,

    /// Account identification. Empty string when absent in the source.
    pub account_number: String,

    /// Start of the statement period, when the source provides one.
    pub period_start: Option<NaiveDate>,

    /// End of the statement period, when the source provides one.
    pub period_end: Option<NaiveDate>,

    /// Parsed transactions, in the order they appear in the source.
    pub transactions: Vec<Transaction>,
}

impl StatementResult {
    /// Create an empty statement result with default fields.
    pub fn new() -> Self {
        Self {
            bank_name: String::new(),
            account_number: String::new(),
            period_start: None,
            period_end: None,
            transactions: Vec::new(),
        }
    }
}

impl Default for StatementResult {
    fn default() -> Self {
        Self::new()
    }
}

/// A user-defined transaction category, supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Classification dimension (e.g. income/expense). Opaque to the
    /// classifier; carried through untouched.
    #[serde(rename = "type")]
    pub category_type: String,

    /// Comma-separated, case-insensitive keyword substrings. `None` or
    /// empty means the category never matches.
    #[serde(default)]
    pub keywords: Option<String>,
}
