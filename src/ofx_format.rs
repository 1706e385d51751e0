//! OFX-style statement parser and serializer.
//!
//! The input is a tag-delimited text document: scalar fields use the pattern
//! `<TAG>value` with no closing tag (the value runs to the next `<` or
//! newline), while transaction blocks are explicitly closed
//! `<STMTTRN>...</STMTTRN>` regions.
//!
//! Parsing never fails. Every field degrades independently to its documented
//! default when its marker is missing or its value is unparseable; a block
//! missing a mandatory field simply contributes no transaction.

use crate::error::Result;
use crate::types::{Direction, StatementResult, Transaction};
use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::io::{Read, Write};
use std::str::FromStr;
use uuid::Uuid;

/// Description used when a transaction block carries neither a memo nor a
/// payee name.
const FALLBACK_DESCRIPTION: &str = "No description";

const BLOCK_OPEN: &str = "<STMTTRN>";
const BLOCK_CLOSE: &str = "</STMTTRN>";

/// Represents an OFX statement.
#[derive(Debug, Clone, PartialEq)]
pub struct OfxStatement {
    /// The underlying statement data.
    pub statement: StatementResult,
}

impl OfxStatement {
    /// Parse an OFX statement from any source implementing `Read`.
    ///
    /// Only I/O failures surface as errors; malformed statement content is
    /// handled by [`OfxStatement::parse`] and never fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use ofx_ingest::ofx_format::OfxStatement;
    ///
    /// let mut file = File::open("statement.ofx")?;
    /// let statement = OfxStatement::from_read(&mut file)?;
    /// println!("Bank: {}", statement.statement.bank_name);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(OfxStatement {
            statement: Self::parse(&content),
        })
    }

    /// Parse statement text into a structured result.
    ///
    /// This function never fails: absent header tags yield empty strings,
    /// unparseable dates yield `None`, and malformed transaction blocks are
    /// skipped without aborting the rest of the document.
    pub fn parse(content: &str) -> StatementResult {
        let mut statement = StatementResult::new();

        statement.bank_name = tag_value(content, "ORG").unwrap_or("").to_string();
        statement.account_number = tag_value(content, "ACCTID").unwrap_or("").to_string();
        statement.period_start = tag_value(content, "DTSTART").and_then(parse_compact_date);
        statement.period_end = tag_value(content, "DTEND").and_then(parse_compact_date);

        for block in transaction_blocks(content) {
            if let Some(transaction) = parse_transaction_block(block) {
                statement.transactions.push(transaction);
            }
        }

        statement
    }

    /// Write an OFX statement to any destination implementing `Write`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use ofx_ingest::ofx_format::OfxStatement;
    /// use ofx_ingest::types::StatementResult;
    ///
    /// let ofx = OfxStatement { statement: StatementResult::new() };
    /// let mut file = File::create("output.ofx")?;
    /// ofx.write_to(&mut file)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let stmt = &self.statement;

        writeln!(writer, "<OFX>")?;
        if !stmt.bank_name.is_empty() {
            writeln!(writer, "<ORG>{}", stmt.bank_name)?;
        }
        if !stmt.account_number.is_empty() {
            writeln!(writer, "<ACCTID>{}", stmt.account_number)?;
        }
        if let Some(start) = stmt.period_start {
            writeln!(writer, "<DTSTART>{}", format_compact_date(&start))?;
        }
        if let Some(end) = stmt.period_end {
            writeln!(writer, "<DTEND>{}", format_compact_date(&end))?;
        }

        for transaction in &stmt.transactions {
            writeln!(writer, "{}", BLOCK_OPEN)?;
            if let Some(date) = transaction.date {
                writeln!(writer, "<DTPOSTED>{}", format_compact_date(&date))?;
            }
            // Reconstruct the signed amount from the stored direction.
            let signed = match transaction.direction {
                Direction::Debit => -transaction.amount,
                Direction::Credit => transaction.amount,
            };
            writeln!(writer, "<TRNAMT>{}", signed)?;
            writeln!(writer, "<FITID>{}", transaction.id)?;
            writeln!(writer, "<MEMO>{}", transaction.description)?;
            writeln!(writer, "{}", BLOCK_CLOSE)?;
        }

        writeln!(writer, "</OFX>")?;
        Ok(())
    }
}

/// Locate the first occurrence of `<TAG>` and return the trimmed text up to
/// the next `<` or newline. `None` means the tag is absent; the returned
/// value may be empty.
fn tag_value<'a>(content: &'a str, tag: &str) -> Option<&'a str> {
    let marker = format!("<{}>", tag);
    let start = content.find(&marker)? + marker.len();
    let rest = &content[start..];
    let end = rest
        .find(|c: char| c == '<' || c == '\n' || c == '\r')
        .unwrap_or(rest.len());
    Some(rest[..end].trim())
}

/// Collect `<STMTTRN>...</STMTTRN>` block bodies, scanning left to right
/// without overlap. An opening marker with no matching close ends the scan.
fn transaction_blocks(content: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut rest = content;

    while let Some(open) = rest.find(BLOCK_OPEN) {
        let after_open = &rest[open + BLOCK_OPEN.len()..];
        match after_open.find(BLOCK_CLOSE) {
            Some(close) => {
                blocks.push(&after_open[..close]);
                rest = &after_open[close + BLOCK_CLOSE.len()..];
            }
            None => break,
        }
    }

    blocks
}

/// Parse one transaction block.
///
/// Returns `None` when the block lacks a posting-date or amount marker, or
/// when the amount value fails to parse as a number.
fn parse_transaction_block(block: &str) -> Option<Transaction> {
    // Both markers are mandatory; their values may still degrade.
    let date_raw = tag_value(block, "DTPOSTED")?;
    let amount_raw = tag_value(block, "TRNAMT")?;

    // Comma as decimal separator is normalized before parsing. A value that
    // still fails to parse skips the whole block rather than emitting a
    // corrupt record.
    let signed = Decimal::from_str(&amount_raw.replace(',', ".")).ok()?;

    let id = match tag_value(block, "FITID") {
        Some(fitid) if !fitid.is_empty() => fitid.to_string(),
        _ => synthesize_id(),
    };

    let description = match tag_value(block, "MEMO") {
        Some(memo) if !memo.is_empty() => memo.to_string(),
        _ => match tag_value(block, "NAME") {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => FALLBACK_DESCRIPTION.to_string(),
        },
    };

    Some(Transaction {
        id,
        date: parse_compact_date(date_raw),
        amount: signed.abs(),
        description,
        direction: Direction::from_signed(signed),
    })
}

/// Parse a compact OFX timestamp (`YYYYMMDD`, optionally followed by
/// time-of-day digits and a bracketed timezone suffix) into a calendar date.
///
/// Returns `None` for values shorter than 8 characters, non-numeric digit
/// slices, or impossible calendar dates. Time-of-day and timezone
/// information is ignored.
fn parse_compact_date(value: &str) -> Option<NaiveDate> {
    // Strip the bracketed timezone annotation, e.g. "20240315120000[-3:BRT]".
    let digits = match value.find('[') {
        Some(pos) => &value[..pos],
        None => value,
    };
    let digits = digits.trim();

    if digits.len() < 8 {
        return None;
    }

    let year = digits.get(0..4)?.parse::<i32>().ok()?;
    let month = digits.get(4..6)?.parse::<u32>().ok()?;
    let day = digits.get(6..8)?.parse::<u32>().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Format a calendar date back to the compact `YYYYMMDD` form.
fn format_compact_date(date: &NaiveDate) -> String {
    format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

/// Synthesize a placeholder transaction id from a high-resolution timestamp
/// and a random suffix. Uniqueness is best-effort: collisions within one run
/// are astronomically unlikely, not impossible.
fn synthesize_id() -> String {
    format!("{}-{}", Utc::now().timestamp_micros(), Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "<OFX>\n\
        <ORG>Banco X\n\
        <ACCTID>12345\n\
        <DTSTART>20240101\n\
        <DTEND>20240131\n\
        <STMTTRN>\n\
        <DTPOSTED>20240115\n\
        <TRNAMT>-250.00\n\
        <FITID>TX001\n\
        <MEMO>Pagamento Fornecedor\n\
        </STMTTRN>\n\
        </OFX>\n";

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_compact_date() {
        let date = parse_compact_date("20240315").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 3);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_compact_date_ignores_time_and_timezone() {
        let date = parse_compact_date("20240315120000[-3:BRT]").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_parse_compact_date_degrades_to_none() {
        assert_eq!(parse_compact_date(""), None);
        assert_eq!(parse_compact_date("2024031"), None);
        assert_eq!(parse_compact_date("2024AB15"), None);
        // Long enough but not a real calendar date.
        assert_eq!(parse_compact_date("20241332"), None);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let result = OfxStatement::parse(SAMPLE);

        assert_eq!(result.bank_name, "Banco X");
        assert_eq!(result.account_number, "12345");
        assert_eq!(result.period_start, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(result.period_end, NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(result.transactions.len(), 1);

        let transaction = &result.transactions[0];
        assert_eq!(transaction.id, "TX001");
        assert_eq!(transaction.date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(transaction.amount, dec("250.00"));
        assert_eq!(transaction.direction, Direction::Debit);
        assert_eq!(transaction.description, "Pagamento Fornecedor");
    }

    #[test]
    fn test_missing_headers_yield_defaults() {
        let result = OfxStatement::parse("<OFX></OFX>");

        assert_eq!(result.bank_name, "");
        assert_eq!(result.account_number, "");
        assert_eq!(result.period_start, None);
        assert_eq!(result.period_end, None);
        assert!(result.transactions.is_empty());
    }

    #[test]
    fn test_first_header_occurrence_wins() {
        let content = "<ORG>First Bank\n<ORG>Second Bank\n";
        let result = OfxStatement::parse(content);
        assert_eq!(result.bank_name, "First Bank");
    }

    #[test]
    fn test_comma_decimal_separator_and_credit_direction() {
        let content = "<STMTTRN><DTPOSTED>20240110<TRNAMT>75,50<FITID>A</STMTTRN>";
        let result = OfxStatement::parse(content);

        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].amount, dec("75.50"));
        assert_eq!(result.transactions[0].direction, Direction::Credit);
    }

    #[test]
    fn test_negative_amount_becomes_debit_magnitude() {
        let content = "<STMTTRN><DTPOSTED>20240110<TRNAMT>-150.00<FITID>A</STMTTRN>";
        let result = OfxStatement::parse(content);

        assert_eq!(result.transactions[0].amount, dec("150.00"));
        assert_eq!(result.transactions[0].direction, Direction::Debit);
    }

    #[test]
    fn test_block_order_is_preserved() {
        let content = "\
            <STMTTRN><DTPOSTED>20240103<TRNAMT>-1.00<FITID>C</STMTTRN>\n\
            <STMTTRN><DTPOSTED>20240101<TRNAMT>-2.00<FITID>A</STMTTRN>\n\
            <STMTTRN><DTPOSTED>20240102<TRNAMT>-3.00<FITID>B</STMTTRN>\n";
        let result = OfxStatement::parse(content);

        let ids: Vec<&str> = result.transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_block_missing_mandatory_field_is_skipped() {
        let content = "\
            <STMTTRN><TRNAMT>-10.00<FITID>NO_DATE</STMTTRN>\n\
            <STMTTRN><DTPOSTED>20240110<FITID>NO_AMOUNT</STMTTRN>\n\
            <STMTTRN><DTPOSTED>20240111<TRNAMT>-20.00<FITID>OK</STMTTRN>\n";
        let result = OfxStatement::parse(content);

        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].id, "OK");
    }

    // Decided policy for the unparseable-amount case: the block is skipped
    // entirely rather than emitting a record with a corrupt amount.
    #[test]
    fn test_unparseable_amount_skips_transaction() {
        let content = "\
            <STMTTRN><DTPOSTED>20240110<TRNAMT>12x.50<FITID>BAD</STMTTRN>\n\
            <STMTTRN><DTPOSTED>20240111<TRNAMT>13.50<FITID>GOOD</STMTTRN>\n";
        let result = OfxStatement::parse(content);

        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].id, "GOOD");
    }

    #[test]
    fn test_malformed_posting_date_degrades_to_none() {
        let content = "<STMTTRN><DTPOSTED>NOTADATE<TRNAMT>-5.00<FITID>A</STMTTRN>";
        let result = OfxStatement::parse(content);

        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].date, None);
    }

    #[test]
    fn test_description_prefers_memo_over_name() {
        let content =
            "<STMTTRN><DTPOSTED>20240110<TRNAMT>-5.00<FITID>A<NAME>Payee<MEMO>Memo text</STMTTRN>";
        let result = OfxStatement::parse(content);
        assert_eq!(result.transactions[0].description, "Memo text");
    }

    #[test]
    fn test_description_falls_back_to_name_then_placeholder() {
        let with_name = "<STMTTRN><DTPOSTED>20240110<TRNAMT>-5.00<FITID>A<NAME>Payee</STMTTRN>";
        let result = OfxStatement::parse(with_name);
        assert_eq!(result.transactions[0].description, "Payee");

        let bare = "<STMTTRN><DTPOSTED>20240110<TRNAMT>-5.00<FITID>A</STMTTRN>";
        let result = OfxStatement::parse(bare);
        assert_eq!(result.transactions[0].description, FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_missing_fitid_synthesizes_unique_ids() {
        let content = "\
            <STMTTRN><DTPOSTED>20240110<TRNAMT>-5.00</STMTTRN>\n\
            <STMTTRN><DTPOSTED>20240111<TRNAMT>-6.00</STMTTRN>\n";
        let result = OfxStatement::parse(content);

        assert_eq!(result.transactions.len(), 2);
        assert!(!result.transactions[0].id.is_empty());
        assert!(!result.transactions[1].id.is_empty());
        assert_ne!(result.transactions[0].id, result.transactions[1].id);
    }

    #[test]
    fn test_unclosed_block_ends_scan() {
        let content = "\
            <STMTTRN><DTPOSTED>20240110<TRNAMT>-5.00<FITID>A</STMTTRN>\n\
            <STMTTRN><DTPOSTED>20240111<TRNAMT>-6.00<FITID>B\n";
        let result = OfxStatement::parse(content);

        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].id, "A");
    }

    #[test]
    fn test_reparse_is_idempotent() {
        let first = OfxStatement::parse(SAMPLE);
        let second = OfxStatement::parse(SAMPLE);
        // Ids are statement-supplied here, so the results match exactly.
        assert_eq!(first, second);
    }

    #[test]
    fn test_serializer_output_reparses() {
        let original = OfxStatement::parse(SAMPLE);

        let mut out = Vec::new();
        let ofx = OfxStatement {
            statement: original.clone(),
        };
        ofx.write_to(&mut out).unwrap();

        let reparsed = OfxStatement::parse(&String::from_utf8(out).unwrap());
        assert_eq!(reparsed, original);
    }
}
