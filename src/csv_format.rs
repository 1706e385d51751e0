//! CSV surface: category list loading and statement export.
//!
//! Categories arrive as a headered CSV (`id,name,type,keywords`); parsed
//! statements are exported one transaction per row, optionally with the
//! classifier's verdict appended.

use crate::classify::classify;
use crate::error::Result;
use crate::types::{Category, StatementResult, Transaction};
use csv::{Reader, Writer};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Represents a statement destined for CSV export.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvStatement {
    /// The underlying statement data.
    pub statement: StatementResult,
}

/// CSV transaction row.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRecord {
    id: String,
    date: String,
    amount: String,
    direction: String,
    description: String,
}

/// CSV transaction row with the classifier's verdict appended.
#[derive(Debug, Serialize, Deserialize)]
struct ClassifiedRecord {
    id: String,
    date: String,
    amount: String,
    direction: String,
    description: String,
    category_id: String,
    category_name: String,
}

impl CsvStatement {
    /// Write the statement's transactions to any destination implementing
    /// `Write`, one row per transaction in statement order.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use ofx_ingest::csv_format::CsvStatement;
    /// use ofx_ingest::types::StatementResult;
    ///
    /// let csv = CsvStatement { statement: StatementResult::new() };
    /// let mut file = File::create("output.csv")?;
    /// csv.write_to(&mut file)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut csv_writer = Writer::from_writer(writer);

        for transaction in &self.statement.transactions {
            csv_writer.serialize(Self::record(transaction))?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Like [`CsvStatement::write_to`], but runs each transaction's
    /// description through the classifier and appends the matched category
    /// columns (empty when no category matched).
    pub fn write_classified<W: Write>(&self, categories: &[Category], writer: &mut W) -> Result<()> {
        let mut csv_writer = Writer::from_writer(writer);

        for transaction in &self.statement.transactions {
            let verdict = classify(&transaction.description, categories);
            let base = Self::record(transaction);
            csv_writer.serialize(ClassifiedRecord {
                id: base.id,
                date: base.date,
                amount: base.amount,
                direction: base.direction,
                description: base.description,
                category_id: verdict.category_id.unwrap_or_default(),
                category_name: verdict.category_name.unwrap_or_default(),
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    fn record(transaction: &Transaction) -> CsvRecord {
        CsvRecord {
            id: transaction.id.clone(),
            date: transaction
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            amount: transaction.amount.to_string(),
            direction: transaction.direction.as_str().to_string(),
            description: transaction.description.clone(),
        }
    }
}

/// Load a category list from a headered CSV (`id,name,type,keywords`).
///
/// Row order is preserved; the classifier's precedence follows it.
pub fn load_categories<R: Read>(reader: &mut R) -> Result<Vec<Category>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut categories = Vec::new();

    for result in csv_reader.deserialize() {
        let category: Category = result?;
        categories.push(category);
    }

    Ok(categories)
}
