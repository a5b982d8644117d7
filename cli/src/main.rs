//! xlspot CLI - highlighted cell extraction from XLSX workbooks
//!
//! Prints declared sheets, yellow fills, highlighted cell formats and the
//! values of the first rows of every worksheet.

use clap::Parser;
use colored::*;
use std::io::{self, Write};
use std::path::PathBuf;
use xlspot::render::JsonFormat;
use xlspot::xlsx::{ScanOptions, DEFAULT_MAX_ROWS, DEFAULT_MAX_SHEETS};

/// Workbook scanned when no input is given.
const DEFAULT_INPUT: &str = "Formulaire accompagnement projets.xlsx";

/// Report cell values and yellow-highlighted cells of an XLSX workbook
#[derive(Parser)]
#[command(
    name = "xlspot",
    author = "iyulab",
    version,
    about = "Report cell values and yellow-highlighted cells of an XLSX workbook"
)]
struct Cli {
    /// Input workbook path
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Output compact JSON (no indentation)
    #[arg(long, requires = "json")]
    compact: bool,

    /// Rows read per worksheet
    #[arg(long, default_value_t = DEFAULT_MAX_ROWS)]
    max_rows: usize,

    /// Numbered worksheets probed (sheet1.xml, sheet2.xml, ...)
    #[arg(long, default_value_t = DEFAULT_MAX_SHEETS)]
    max_sheets: usize,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = ScanOptions::new()
        .with_max_rows(cli.max_rows)
        .with_max_sheets(cli.max_sheets);

    log::info!("scanning {}", cli.input.display());
    let report = xlspot::scan_file_with_options(&cli.input, options)?;

    let output = if cli.json {
        let format = if cli.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        let mut json = xlspot::render::to_json(&report, format)?;
        json.push('\n');
        json
    } else {
        xlspot::render::to_text(&report)
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(output.as_bytes())?;
    handle.flush()?;
    Ok(())
}
