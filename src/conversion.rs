//! Calendar and display conversions
//!
//! Maps fixed-column calendar fields to UTC epoch seconds with plain integer
//! arithmetic, and renders epoch seconds and window lengths for display.

use crate::types::{EpochSeconds, FlightWindow};
use chrono::DateTime;

const SECONDS_PER_DAY: i64 = 86_400;

/// Day number of 1970-01-01 in the March-based count used by [`days_from_civil`]
const UNIX_EPOCH_DAY: i64 = 719_469;

/// Signed offset of local logger time from UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UtcOffset {
    /// `1` or `-1`
    pub sign: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl UtcOffset {
    pub const UTC: UtcOffset = UtcOffset {
        sign: 1,
        hours: 0,
        minutes: 0,
    };

    pub fn new(sign: i64, hours: i64, minutes: i64) -> Self {
        Self {
            sign,
            hours,
            minutes,
        }
    }

    /// Offset in seconds east of UTC
    pub fn seconds(&self) -> i64 {
        self.sign * (self.hours * 3600 + self.minutes * 60)
    }
}

/// Local wall-clock reading decoded from a data row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilDateTime {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
    pub offset: UtcOffset,
}

impl CivilDateTime {
    /// UTC epoch seconds of this wall-clock reading
    pub fn to_epoch_seconds(&self) -> EpochSeconds {
        civil_to_epoch(self)
    }
}

/// Days from 1970-01-01 to the given proleptic Gregorian date
///
/// The year is shifted to start in March so the leap day falls last;
/// `1461 / 4` days per year carries the four-year leap cycle and
/// `(979 * m + 15) / 32` the cumulative month lengths from March. The
/// century terms drop the leap day of 2100, 2200, 2300 and keep 2000, 2400.
pub fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 9)
    } else {
        (year, month - 3)
    };

    (y * 1461).div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
        + (m * 979 + 15).div_euclid(32)
        + day
        - UNIX_EPOCH_DAY
}

/// UTC epoch seconds of a local wall-clock reading
pub fn civil_to_epoch(civil: &CivilDateTime) -> EpochSeconds {
    let days = days_from_civil(civil.year, civil.month, civil.day);
    let time_of_day = civil.hour * 3600 + civil.minute * 60 + civil.second;

    days * SECONDS_PER_DAY + time_of_day - civil.offset.seconds()
}

/// Render epoch seconds as `YYYY-MM-DD HH:MM:SS` in UTC
///
/// Instants chrono cannot represent render as the epoch itself.
pub fn format_utc_timestamp(epoch: EpochSeconds) -> String {
    DateTime::from_timestamp(epoch, 0)
        .unwrap_or_default()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Render a window length as hours with exactly one decimal digit
pub fn format_duration_hours(window: &FlightWindow) -> String {
    format!("{:.1}", window.duration_hours())
}
