//! Summary export
//!
//! Writes the per-file records of a batch as a CSV or JSON summary, or as a
//! plain-text table for the terminal.

use crate::types::FlightTimeRecord;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[cfg(any(feature = "csv", feature = "json"))]
use std::io::Write;

/// Base name of summary files written by [`export_summary`]
pub const SUMMARY_FILE_STEM: &str = "flight_times";

/// Column titles shared by the CSV summary and the terminal table
pub const SUMMARY_COLUMNS: [&str; 4] = ["File", "Start (UTC)", "End (UTC)", "Duration (h)"];

/// Export options for controlling output formats
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub csv: bool,
    pub json: bool,
    /// Directory for summary files (default: current directory)
    pub output_dir: Option<PathBuf>,
}

/// Paths of the summary files actually written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub csv_path: Option<PathBuf>,
    pub json_path: Option<PathBuf>,
}

/// Summary file paths for the given options, as `(csv, json)`
pub fn compute_export_paths(options: &ExportOptions) -> (PathBuf, PathBuf) {
    let dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    (
        dir.join(format!("{SUMMARY_FILE_STEM}.csv")),
        dir.join(format!("{SUMMARY_FILE_STEM}.json")),
    )
}

fn record_fields(record: &FlightTimeRecord) -> [&str; 4] {
    [
        record.file_name.as_str(),
        record.start.as_str(),
        record.end.as_str(),
        record.duration.as_str(),
    ]
}

/// Write records as CSV, one row per file
#[cfg(feature = "csv")]
pub fn write_csv<W: Write>(records: &[FlightTimeRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(SUMMARY_COLUMNS)?;
    for record in records {
        csv_writer.write_record(record_fields(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write records as a pretty-printed JSON array
#[cfg(feature = "json")]
pub fn write_json<W: Write>(records: &[FlightTimeRecord], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    Ok(())
}

/// Render records as a fixed-width text table
pub fn render_table(records: &[FlightTimeRecord]) -> String {
    let mut widths = SUMMARY_COLUMNS.map(str::len);
    for record in records {
        for (width, field) in widths.iter_mut().zip(record_fields(record)) {
            *width = (*width).max(field.len());
        }
    }

    let render_row = |fields: [&str; 4]| {
        let [name, start, end, duration] = fields;
        format!(
            "{name:<w0$}  {start:<w1$}  {end:<w2$}  {duration:>w3$}",
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3],
        )
        .trim_end()
        .to_string()
    };

    let mut table = render_row(SUMMARY_COLUMNS);
    table.push('\n');
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    table.push_str(&"-".repeat(rule_len));
    table.push('\n');
    for record in records {
        table.push_str(&render_row(record_fields(record)));
        table.push('\n');
    }
    table
}

fn ensure_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write the enabled summary files
pub fn export_summary(
    records: &[FlightTimeRecord],
    options: &ExportOptions,
) -> Result<ExportReport> {
    let (csv_path, json_path) = compute_export_paths(options);
    let mut report = ExportReport::default();

    if options.csv {
        #[cfg(feature = "csv")]
        {
            ensure_dir(&csv_path)?;
            write_csv(records, fs::File::create(&csv_path)?)?;
            debug!("wrote {} records to {}", records.len(), csv_path.display());
            report.csv_path = Some(csv_path);
        }
        #[cfg(not(feature = "csv"))]
        tracing::warn!("CSV export requested but the csv feature is disabled");
    }

    if options.json {
        #[cfg(feature = "json")]
        {
            ensure_dir(&json_path)?;
            write_json(records, fs::File::create(&json_path)?)?;
            debug!("wrote {} records to {}", records.len(), json_path.display());
            report.json_path = Some(json_path);
        }
        #[cfg(not(feature = "json"))]
        tracing::warn!("JSON export requested but the json feature is disabled");
    }

    Ok(report)
}
