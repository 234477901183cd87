//! Summary Export Example
//!
//! Extracts the recording window of every export given on the command line,
//! prints the summary table and writes it to `flight_times.csv`.
//!
//! Files that cannot be read, or that are not flight data logger exports,
//! appear in the summary with the zero window instead of stopping the batch.

use fdl_times::{export_summary, extract_files, render_table, ExportOptions, ExtractOptions, Result};
use std::path::PathBuf;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let mut files = Vec::new();
    let mut output_dir = None;
    while let Some(arg) = args.next() {
        if arg == "--output-dir" {
            output_dir = args.next().map(PathBuf::from);
        } else {
            files.push(PathBuf::from(arg));
        }
    }

    if files.is_empty() {
        println!("Usage: summary_export <log.csv>... [--output-dir DIR]");
        println!("Example: summary_export log_250317_095911_KBOS.csv --output-dir ./reports");
        std::process::exit(1);
    }

    let records = extract_files(&files, &ExtractOptions::default());
    print!("{}", render_table(&records));

    let empty = records.iter().filter(|r| r.duration == "0.0").count();
    if empty > 0 {
        println!("\n{empty} of {} files have no recorded flight time", records.len());
    }

    let options = ExportOptions {
        csv: true,
        json: false,
        output_dir,
    };
    let report = export_summary(&records, &options)?;
    if let Some(path) = report.csv_path {
        println!("Wrote {}", path.display());
    }

    Ok(())
}
