use crate::error::{FdlError, Result};
use crate::types::RawLine;
use tracing::debug;

/// Prefix of line 1: airframe information record
pub const AIRFRAME_INFO_PREFIX: &str = "#airframe_info";
/// Prefix of line 2: column format comment
pub const COLUMN_FORMAT_PREFIX: &str = "#yyy-mm-dd, hh:mm:ss,   hh:mm,";
/// Prefix of line 3: column names
pub const COLUMN_NAMES_PREFIX: &str = "  Lcl Date, Lcl Time, UTCOfst,";

/// Signature of a supported export, in line order
pub const HEADER_SIGNATURE: [&str; 3] = [
    AIRFRAME_INFO_PREFIX,
    COLUMN_FORMAT_PREFIX,
    COLUMN_NAMES_PREFIX,
];

/// Number of header lines preceding the first data row
pub const HEADER_LINES: usize = HEADER_SIGNATURE.len();

/// Consume the three header lines and check each against its signature prefix
///
/// Exactly three lines are pulled from `lines`, fewer if it ends early; the
/// iterator is left positioned at the first data row.
pub fn validate_header<I>(lines: &mut I) -> Result<()>
where
    I: Iterator<Item = RawLine>,
{
    for (index, &expected) in HEADER_SIGNATURE.iter().enumerate() {
        let line_number = index + 1;
        let matches = lines
            .next()
            .map(|line| line.as_bytes().starts_with(expected.as_bytes()))
            .unwrap_or(false);

        if !matches {
            return Err(FdlError::HeaderMismatch {
                line: line_number,
                expected,
            });
        }
    }

    debug!("header signature accepted");
    Ok(())
}
