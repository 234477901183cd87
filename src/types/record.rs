use crate::conversion::{format_duration_hours, format_utc_timestamp};
use crate::types::FlightWindow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Final per-file summary, rendered for display
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlightTimeRecord {
    pub file_name: String,
    /// `YYYY-MM-DD HH:MM:SS`, UTC
    pub start: String,
    /// `YYYY-MM-DD HH:MM:SS`, UTC
    pub end: String,
    /// Hours with one decimal digit
    pub duration: String,
}

impl FlightTimeRecord {
    pub fn from_window(file_name: impl Into<String>, window: &FlightWindow) -> Self {
        Self {
            file_name: file_name.into(),
            start: format_utc_timestamp(window.start),
            end: format_utc_timestamp(window.end),
            duration: format_duration_hours(window),
        }
    }

    /// Record for a file that could not be read or is not a supported export
    pub fn empty(file_name: impl Into<String>) -> Self {
        Self::from_window(file_name, &FlightWindow::default())
    }
}
