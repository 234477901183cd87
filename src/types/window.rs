use crate::types::EpochSeconds;

/// Recording window of one file
///
/// `start` is fixed by the first valid row; `end` tracks the latest valid row.
/// A file without any valid row keeps the `(0, 0)` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlightWindow {
    pub start: EpochSeconds,
    pub end: EpochSeconds,
}

impl FlightWindow {
    pub fn new(start: EpochSeconds, end: EpochSeconds) -> Self {
        Self { start, end }
    }

    /// Window length in seconds
    pub fn duration_seconds(&self) -> i64 {
        self.end - self.start
    }

    /// Window length in hours
    pub fn duration_hours(&self) -> f64 {
        self.duration_seconds() as f64 / 3600.0
    }

    pub fn is_empty(&self) -> bool {
        self.start == 0 && self.end == 0
    }
}

/// Row counters collected while folding a file into its window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowStats {
    /// Data rows seen (header lines excluded)
    pub data_rows: u64,
    /// Rows that decoded to a real instant
    pub valid_rows: u64,
    /// Sentinel rows before the first valid row; these backdate the start
    pub leading_sentinel_rows: u64,
    /// Sentinel rows after the first valid row; these are ignored
    pub trailing_sentinel_rows: u64,
}

impl WindowStats {
    pub fn sentinel_rows(&self) -> u64 {
        self.leading_sentinel_rows + self.trailing_sentinel_rows
    }
}
