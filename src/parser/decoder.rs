//! Fixed-column timestamp decoding
//!
//! The logger renders local date, local time and UTC offset at fixed byte
//! offsets at the start of every data row:
//!
//! ```text
//! 2025-03-17, 09:59:11,  -05:00,
//! 0123456789012345678901234567890
//! ```
//!
//! Each field is described by a column span in [`DATE_TIME_LAYOUT`] and
//! [`UTC_OFFSET_LAYOUT`] and read by one generic extractor. Inside a span,
//! space, comma and colon are skipped; `-` is skipped within the date. Any
//! other non-digit byte makes the row undecodable, as does a row that ends
//! inside a span. The offset is only looked for within the UTCOfst field.

use crate::conversion::{CivilDateTime, UtcOffset};
use crate::types::ParsedRow;
use std::ops::Range;

/// Years accepted from the logger clock
pub const MIN_YEAR: i64 = 2020;
pub const MAX_YEAR: i64 = 2100;

/// Columns holding the local date; `-` is a separator here
pub const DATE_COLUMNS: Range<usize> = 0..10;
/// Columns holding local date and time; the UTC offset follows
pub const DATE_TIME_COLUMNS: Range<usize> = 0..21;
/// Columns of the UTCOfst field, up to the comma that closes it
pub const UTC_OFFSET_COLUMNS: Range<usize> = 21..29;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    OffsetHours,
    OffsetMinutes,
}

/// Column span of one numeric field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub columns: Range<usize>,
}

const fn span(field: Field, start: usize, end: usize) -> FieldSpec {
    FieldSpec {
        field,
        columns: start..end,
    }
}

/// Date and time spans, absolute columns
pub const DATE_TIME_LAYOUT: [FieldSpec; 6] = [
    span(Field::Year, 0, 4),
    span(Field::Month, 5, 7),
    span(Field::Day, 8, 10),
    span(Field::Hour, 12, 14),
    span(Field::Minute, 15, 17),
    span(Field::Second, 18, 20),
];

/// Offset spans, relative to the column of the offset sign
pub const UTC_OFFSET_LAYOUT: [FieldSpec; 2] = [
    span(Field::OffsetHours, 1, 3),
    span(Field::OffsetMinutes, 4, 6),
];

/// Column between offset hours and minutes, relative to the sign
const UTC_OFFSET_SEPARATOR: usize = 3;

fn is_skip_token(byte: u8) -> bool {
    matches!(byte, b' ' | b',' | b':')
}

fn is_separator(byte: u8, column: usize) -> bool {
    is_skip_token(byte) || (byte == b'-' && DATE_COLUMNS.contains(&column))
}

/// Read the digits of `columns`, skipping separators
///
/// A line that ends inside the span cannot be decoded.
fn extract_number(line: &[u8], columns: Range<usize>) -> Option<i64> {
    let mut value = 0i64;
    for column in columns {
        let &byte = line.get(column)?;
        if byte.is_ascii_digit() {
            value = value * 10 + i64::from(byte - b'0');
        } else if !is_separator(byte, column) {
            return None;
        }
    }
    Some(value)
}

/// Check that every date/time column outside a field span is a separator
fn gaps_are_separators(line: &[u8]) -> bool {
    DATE_TIME_COLUMNS
        .filter(|column| {
            !DATE_TIME_LAYOUT
                .iter()
                .any(|entry| entry.columns.contains(column))
        })
        .filter_map(|column| line.get(column).map(|&byte| (column, byte)))
        .all(|(column, byte)| is_separator(byte, column))
}

/// Locate the UTC offset inside the UTCOfst field
///
/// Returns the sign and the column the relative offset layout is anchored at.
/// `Some((1, None))` means the field is blank or the row ends before it. The
/// search never looks past [`UTC_OFFSET_COLUMNS`].
fn locate_offset(line: &[u8]) -> Option<(i64, Option<usize>)> {
    for column in UTC_OFFSET_COLUMNS {
        let Some(&byte) = line.get(column) else {
            break;
        };
        match byte {
            b'+' => return Some((1, Some(column))),
            b'-' => return Some((-1, Some(column))),
            byte if byte.is_ascii_digit() => return Some((1, Some(column - 1))),
            b',' => break,
            byte if is_skip_token(byte) => continue,
            _ => return None,
        }
    }
    Some((1, None))
}

fn decode_offset(line: &[u8]) -> Option<UtcOffset> {
    let (sign, anchor) = locate_offset(line)?;
    let Some(anchor) = anchor else {
        return Some(UtcOffset::UTC);
    };
    // hours and minutes must fit before the field's closing comma
    if anchor + UTC_OFFSET_LAYOUT[1].columns.end > UTC_OFFSET_COLUMNS.end {
        return None;
    }

    let shifted = |entry: &FieldSpec| entry.columns.start + anchor..entry.columns.end + anchor;
    let mut offset = UtcOffset::new(sign, 0, 0);
    for entry in &UTC_OFFSET_LAYOUT {
        let value = extract_number(line, shifted(entry))?;
        match entry.field {
            Field::OffsetHours => offset.hours = value,
            Field::OffsetMinutes => offset.minutes = value,
            _ => {}
        }
    }

    match line.get(anchor + UTC_OFFSET_SEPARATOR) {
        Some(&byte) if !is_skip_token(byte) => None,
        _ => Some(offset),
    }
}

/// Decode the calendar fields of a data row
///
/// Returns `None` for rows with a stray character in the timestamp columns or
/// a year outside `MIN_YEAR..=MAX_YEAR`.
pub fn decode_civil(line: &[u8]) -> Option<CivilDateTime> {
    if !gaps_are_separators(line) {
        return None;
    }

    let mut civil = CivilDateTime {
        year: 0,
        month: 0,
        day: 0,
        hour: 0,
        minute: 0,
        second: 0,
        offset: UtcOffset::UTC,
    };
    for entry in &DATE_TIME_LAYOUT {
        let value = extract_number(line, entry.columns.clone())?;
        match entry.field {
            Field::Year => civil.year = value,
            Field::Month => civil.month = value,
            Field::Day => civil.day = value,
            Field::Hour => civil.hour = value,
            Field::Minute => civil.minute = value,
            Field::Second => civil.second = value,
            _ => {}
        }
    }

    if !(MIN_YEAR..=MAX_YEAR).contains(&civil.year) {
        return None;
    }

    civil.offset = decode_offset(line)?;
    Some(civil)
}

/// Decode a data row to UTC epoch seconds, or the sentinel when it cannot be
pub fn decode_row(line: &[u8]) -> ParsedRow {
    decode_civil(line)
        .map(|civil| ParsedRow::new(civil.to_epoch_seconds()))
        .unwrap_or(ParsedRow::SENTINEL)
}
