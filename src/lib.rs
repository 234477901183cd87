//! Flight Data Logger Times
//!
//! A Rust library for extracting recording windows from avionics flight data
//! logger CSV exports: when the logger started recording, when the last row
//! with a valid time fix was written, and how many hours lie in between.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV summary export
//! - **`cli`** (default): Build the command-line interface binary
//! - **`json`**: Enable JSON summary export
//! - **`serde`**: Enable serialization/deserialization of records
//!
//! # Quick Start
//!
//! ```rust
//! use fdl_times::extract;
//!
//! let export = "#airframe_info\n\
//! #yyy-mm-dd, hh:mm:ss,   hh:mm,\n  Lcl Date, Lcl Time, UTCOfst,\n\
//! 2025-03-17, 09:59:11,  -05:00,\n\
//! 2025-03-17, 11:29:41,  -05:00,\n";
//!
//! let record = extract(export.as_bytes(), "log_250317_095911_KBOS.csv");
//! assert_eq!(record.start, "2025-03-17 14:59:11");
//! assert_eq!(record.end, "2025-03-17 16:29:41");
//! assert_eq!(record.duration, "1.5");
//! ```
//!
//! Files that cannot be opened or lack the export header come back as the
//! zero window (`1970-01-01 00:00:00`, `0.0`). Use [`try_extract`] to see why.
//!
//! # Public API
//!
//! ## Extraction
//! - [`extract`] / [`extract_with_options`] - One byte source to one record
//! - [`try_extract`] - Same, surfacing [`FdlError`] instead of degrading
//! - [`extract_file`] / [`extract_files`] - Files labelled by base name
//! - [`extract_reader`] - An already open reader
//! - [`scan_window`] - Decode and fold data rows after the header
//!
//! ## Building Blocks
//! - [`LineStream`] - Chunked line reader
//! - [`validate_header`] - Three-line signature check
//! - [`decode_row`] / [`decode_civil`] - Fixed-column timestamp decoding
//! - [`days_from_civil`] / [`civil_to_epoch`] - Calendar arithmetic
//! - [`WindowAggregator`] - Missing-fix compensation and window folding
//!
//! ## Export
//! - [`render_table`] - Terminal table
//! - [`write_csv`] / [`write_json`] - Summary writers
//! - [`export_summary`] - Summary files driven by [`ExportOptions`]

pub mod aggregator;
pub mod conversion;
pub mod error;
pub mod export;
pub mod parser;
pub mod types;

pub use aggregator::*;
pub use conversion::*;
pub use error::*;
pub use export::*;
pub use parser::*;
pub use types::*;
