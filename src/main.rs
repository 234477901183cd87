//! CLI binary for fdl_times
//!
//! Prints the recording window of each flight data logger export given on the
//! command line, and optionally writes the summary as CSV or JSON.

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{value_parser, Arg, ArgAction, Command};
use fdl_times::{
    export_summary, extract_files, render_table, ExportOptions, ExtractOptions, DEFAULT_CHUNK_SIZE,
    MAX_CHUNK_SIZE,
};
use glob::glob;
use std::collections::HashSet;
use std::fs;
use std::io::stderr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Maximum recursion depth to prevent stack overflow
const MAX_RECURSION_DEPTH: usize = 100;

/// Environment variable holding the log filter
const LOG_ENV: &str = "FDL_TIMES_LOG";

/// Version string with the commit embedded by build.rs
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ")"
);

fn build_command() -> Command {
    Command::new("fdl_times")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(LONG_VERSION)
        .about("Report flight start, end and duration from flight data logger CSV exports.")
        .arg(
            Arg::new("files")
                .help("Export files, directories (searched for .csv files) or glob patterns")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output (overridden by FDL_TIMES_LOG)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("chunk-size")
                .long("chunk-size")
                .help("Bytes read from each file at a time (default: 4096)")
                .value_name("BYTES")
                .value_parser(
                    RangedU64ValueParser::<usize>::new().range(1..=MAX_CHUNK_SIZE as u64),
                ),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Write the summary to flight_times.csv")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Write the summary to flight_times.json (requires the json feature)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for summary files (default: current directory)")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf)),
        )
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(stderr)
        .with_ansi(false)
        .without_time()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn is_export_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Expand files, directories and glob patterns into a list of export files.
/// Explicit files are kept whatever their extension; directories contribute
/// their `.csv` files.
fn expand_input_paths(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut visited = HashSet::new();
    let mut files = Vec::new();

    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') {
            let paths = glob(pattern)
                .with_context(|| format!("Invalid glob pattern '{pattern}'"))?
                .collect::<std::result::Result<Vec<_>, _>>()
                .with_context(|| format!("Error expanding glob pattern '{pattern}'"))?;
            debug!("glob pattern '{pattern}' matched {} paths", paths.len());
            for path in paths {
                collect_path(&path, &mut visited, &mut files, 0)?;
            }
        } else {
            collect_path(Path::new(pattern), &mut visited, &mut files, 0)?;
        }
    }

    Ok(files)
}

fn collect_path(
    path: &Path,
    visited: &mut HashSet<PathBuf>,
    files: &mut Vec<PathBuf>,
    depth: usize,
) -> Result<()> {
    if path.is_dir() {
        find_export_files_in_dir(path, visited, files, depth + 1)
    } else if path.is_file() {
        files.push(path.to_path_buf());
        Ok(())
    } else {
        warn!("path not found or not accessible: {}", path.display());
        Ok(())
    }
}

/// Recursively find export files in a directory, protecting against symlink
/// cycles and depth overflow
fn find_export_files_in_dir(
    dir: &Path,
    visited: &mut HashSet<PathBuf>,
    files: &mut Vec<PathBuf>,
    depth: usize,
) -> Result<()> {
    if depth > MAX_RECURSION_DEPTH {
        anyhow::bail!(
            "Maximum recursion depth exceeded in directory traversal ({})",
            MAX_RECURSION_DEPTH
        );
    }

    let canonical_dir = dir
        .canonicalize()
        .with_context(|| format!("Failed to canonicalize '{}'", dir.display()))?;
    if !visited.insert(canonical_dir) {
        return Ok(());
    }

    let mut entries = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    warn!("cannot read entry in '{}': {e}", dir.display());
                    None
                }
            })
            .collect::<Vec<_>>(),
        Err(e) => {
            warn!("cannot read directory '{}': {e}", dir.display());
            return Ok(());
        }
    };
    entries.sort();

    for path in entries {
        if path.is_dir() {
            find_export_files_in_dir(&path, visited, files, depth + 1)?;
        } else if path.is_file() && is_export_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    init_logging(matches.get_flag("debug"));
    debug!("{} {}", env!("CARGO_PKG_NAME"), LONG_VERSION);

    let patterns: Vec<String> = matches
        .get_many::<String>("files")
        .map(|files| files.cloned().collect())
        .unwrap_or_default();

    let extract_options = ExtractOptions {
        chunk_size: matches
            .get_one::<usize>("chunk-size")
            .copied()
            .unwrap_or(DEFAULT_CHUNK_SIZE),
    };
    let export_options = ExportOptions {
        csv: matches.get_flag("csv"),
        json: matches.get_flag("json"),
        output_dir: matches.get_one::<PathBuf>("output-dir").cloned(),
    };

    let input_files = expand_input_paths(&patterns).context("Error expanding input paths")?;
    if input_files.is_empty() {
        eprintln!("Error: No input files found.");
        eprintln!("Input patterns were: {patterns:?}");
        std::process::exit(1);
    }
    debug!("found {} files to process", input_files.len());

    let records = extract_files(&input_files, &extract_options);
    print!("{}", render_table(&records));

    let report = export_summary(&records, &export_options).context("Error writing summary")?;
    for path in report.csv_path.iter().chain(report.json_path.iter()) {
        println!("Wrote {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_is_well_formed() {
        build_command().debug_assert();
    }

    #[test]
    fn test_chunk_size_flag() {
        let matches = build_command().get_matches_from(["fdl_times", "a.csv"]);
        assert_eq!(matches.get_one::<usize>("chunk-size"), None);

        let matches =
            build_command().get_matches_from(["fdl_times", "--chunk-size", "16", "a.csv"]);
        assert_eq!(matches.get_one::<usize>("chunk-size").copied(), Some(16));

        for rejected in ["0", "16777217", "18446744073709551615"] {
            let args = ["fdl_times", "--chunk-size", rejected, "a.csv"];
            let result = build_command().try_get_matches_from(args);
            assert!(result.is_err(), "chunk size {rejected}");
        }
    }

    #[test]
    fn test_expand_directory_finds_csv_recursively() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let nested = temp_dir.path().join("2025").join("03");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join("log_a.csv"), "").unwrap();
        fs::write(nested.join("log_b.CSV"), "").unwrap();
        fs::write(nested.join("readme.txt"), "").unwrap();

        let files =
            expand_input_paths(&[temp_dir.path().to_string_lossy().into_owned()]).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"log_a.csv".to_string()));
        assert!(names.contains(&"log_b.CSV".to_string()));
    }

    #[test]
    fn test_expand_glob_and_explicit_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join("one.csv"), "").unwrap();
        fs::write(temp_dir.path().join("two.csv"), "").unwrap();
        fs::write(temp_dir.path().join("three.log"), "").unwrap();

        let pattern = temp_dir.path().join("*.csv").to_string_lossy().into_owned();
        assert_eq!(expand_input_paths(&[pattern]).unwrap().len(), 2);

        let explicit = temp_dir.path().join("three.log").to_string_lossy().into_owned();
        assert_eq!(expand_input_paths(&[explicit]).unwrap().len(), 1);

        let missing = temp_dir.path().join("absent.csv").to_string_lossy().into_owned();
        assert!(expand_input_paths(&[missing]).unwrap().is_empty());
    }
}
