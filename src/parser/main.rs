use crate::aggregator::WindowAggregator;
use crate::error::{FdlError, Result};
use crate::parser::decoder::decode_row;
use crate::parser::header::validate_header;
use crate::parser::stream::{LineStream, DEFAULT_CHUNK_SIZE};
use crate::types::{FlightTimeRecord, FlightWindow, RawLine, WindowStats};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Options for reading one export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Bytes requested from the source per read
    pub chunk_size: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Something that can be opened for reading, once per extraction
///
/// The reader returned by [`ByteSource::open`] is owned by the extraction and
/// dropped when it returns, whichever way it returns.
pub trait ByteSource {
    fn open(&self) -> io::Result<Box<dyn Read + '_>>;
}

impl ByteSource for Path {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(File::open(self)?))
    }
}

impl ByteSource for PathBuf {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        self.as_path().open()
    }
}

impl ByteSource for [u8] {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(self))
    }
}

impl ByteSource for Vec<u8> {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        self.as_slice().open()
    }
}

/// Decode and fold the data rows of an export whose header was already consumed
pub fn scan_window<I>(lines: I) -> (FlightWindow, WindowStats)
where
    I: IntoIterator<Item = RawLine>,
{
    let mut aggregator = WindowAggregator::new();
    for line in lines {
        let row = decode_row(line.as_bytes());
        if row.is_sentinel() {
            trace!("line {}: no usable timestamp", line.ordinal);
        }
        aggregator.push(row);
    }
    aggregator.finish()
}

/// Validate the header and fold the data rows of an open reader
fn read_window<R: Read>(
    reader: R,
    display_name: &str,
    options: &ExtractOptions,
) -> Result<(FlightWindow, WindowStats)> {
    let mut lines = LineStream::with_chunk_size(reader, options.chunk_size);
    validate_header(&mut lines)?;

    let (window, stats) = scan_window(lines);
    debug!(
        "{display_name}: {} data rows, {} valid, {} before first fix, window {}..{}",
        stats.data_rows, stats.valid_rows, stats.leading_sentinel_rows, window.start, window.end
    );
    Ok((window, stats))
}

/// Extract the recording window of one export, surfacing why it failed
pub fn try_extract<S>(
    source: &S,
    display_name: &str,
    options: &ExtractOptions,
) -> Result<FlightTimeRecord>
where
    S: ByteSource + ?Sized,
{
    let reader = source
        .open()
        .map_err(|err| FdlError::ResourceUnavailable {
            name: display_name.to_string(),
            source: err,
        })?;
    let (window, _) = read_window(reader, display_name, options)?;
    Ok(FlightTimeRecord::from_window(display_name, &window))
}

/// Extract the recording window of one export
///
/// Sources that cannot be opened and files that are not a supported export
/// yield the zero-window record instead of an error.
pub fn extract<S>(source: &S, display_name: &str) -> FlightTimeRecord
where
    S: ByteSource + ?Sized,
{
    extract_with_options(source, display_name, &ExtractOptions::default())
}

pub fn extract_with_options<S>(
    source: &S,
    display_name: &str,
    options: &ExtractOptions,
) -> FlightTimeRecord
where
    S: ByteSource + ?Sized,
{
    try_extract(source, display_name, options).unwrap_or_else(|err| degrade(display_name, err))
}

/// Extract from a reader the caller already opened
pub fn extract_reader<R: Read>(
    reader: R,
    display_name: &str,
    options: &ExtractOptions,
) -> FlightTimeRecord {
    match read_window(reader, display_name, options) {
        Ok((window, _)) => FlightTimeRecord::from_window(display_name, &window),
        Err(err) => degrade(display_name, err),
    }
}

/// Extract one file, labelled with its base name
pub fn extract_file(path: &Path, options: &ExtractOptions) -> FlightTimeRecord {
    extract_with_options(path, &display_name(path), options)
}

/// Extract every file in order; each file is independent of the others
pub fn extract_files<P>(paths: &[P], options: &ExtractOptions) -> Vec<FlightTimeRecord>
where
    P: AsRef<Path>,
{
    paths
        .iter()
        .map(|path| extract_file(path.as_ref(), options))
        .collect()
}

/// Base name of a path, as shown to the user
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn degrade(display_name: &str, err: FdlError) -> FlightTimeRecord {
    warn!("{display_name}: {err}; reporting empty window");
    FlightTimeRecord::empty(display_name)
}
