//! OFX Classifier - CLI tool for categorizing statement transactions.
//!
//! Parses an OFX statement, matches each transaction description against a
//! category list loaded from CSV, and writes the classified transactions as
//! CSV.

use clap::Parser;
use ofx_ingest::{
    csv_format::{load_categories, CsvStatement},
    ofx_format::OfxStatement,
    Result,
};
use std::fs::File;
use std::io;

#[derive(Parser)]
#[command(name = "ofx_classifier")]
#[command(about = "Classify OFX statement transactions against keyword categories", long_about = None)]
struct Cli {
    /// Input statement path (or stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Category list CSV path (columns: id,name,type,keywords)
    #[arg(short, long)]
    categories: String,

    /// Output file path (or stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut categories_file = File::open(&cli.categories)?;
    let categories = load_categories(&mut categories_file)?;

    let parsed = if let Some(ref input_path) = cli.input {
        let mut file = File::open(input_path)?;
        OfxStatement::from_read(&mut file)?
    } else {
        let mut stdin = io::stdin();
        OfxStatement::from_read(&mut stdin)?
    };

    let csv = CsvStatement {
        statement: parsed.statement,
    };

    if let Some(ref output_path) = cli.output {
        let mut file = File::create(output_path)?;
        csv.write_classified(&categories, &mut file)?;
    } else {
        let mut stdout = io::stdout();
        csv.write_classified(&categories, &mut stdout)?;
    }

    Ok(())
}
