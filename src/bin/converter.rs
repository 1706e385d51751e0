//! OFX Converter - CLI tool for converting statements to CSV or normalized OFX.

use clap::Parser;
use ofx_ingest::{
    csv_format::CsvStatement, ofx_format::OfxStatement, Format, Result,
};
use std::fs::File;
use std::io::{self, Read, Write};

#[derive(Parser)]
#[command(name = "ofx_converter")]
#[command(about = "Convert OFX bank statements to CSV or normalized OFX", long_about = None)]
struct Cli {
    /// Input file path (or stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Output format (csv, ofx)
    #[arg(long = "output-format", default_value = "csv")]
    output_format: String,

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

    let output_format = cli.output_format.parse::<Format>()?;

    let parsed = if let Some(ref input_path) = cli.input {
        let mut file = File::open(input_path)?;
        OfxStatement::from_read(&mut file)?
    } else {
        let mut stdin = io::stdin();
        OfxStatement::from_read(&mut stdin)?
    };

    if let Some(ref output_path) = cli.output {
        let mut file = File::create(output_path)?;
        write_output(&mut file, parsed, output_format)?;
    } else {
        let mut stdout = io::stdout();
        write_output(&mut stdout, parsed, output_format)?;
    }

    Ok(())
}

fn write_output<W: Write>(writer: &mut W, parsed: OfxStatement, format: Format) -> Result<()> {
    match format {
        Format::Ofx => parsed.write_to(writer),
        Format::Csv => CsvStatement {
            statement: parsed.statement,
        }
        .write_to(writer),
    }
}
