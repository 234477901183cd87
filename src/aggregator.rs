//! Reduction of decoded rows to a recording window
//!
//! The logger writes one row per second from power-up, but rows written
//! before the receiver has a time fix carry no usable timestamp. Those rows
//! decode to the sentinel, and the number seen before the first real
//! timestamp is subtracted from it to recover when recording began.

use crate::types::{EpochSeconds, FlightWindow, ParsedRow, WindowStats};
use tracing::trace;

/// Folds a file's decoded rows into its [`FlightWindow`]
#[derive(Debug, Clone, Default)]
pub struct WindowAggregator {
    window: Option<FlightWindow>,
    stats: WindowStats,
}

impl WindowAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one data row
    pub fn push(&mut self, row: ParsedRow) {
        self.stats.data_rows += 1;

        if row.is_sentinel() {
            match self.window {
                None => self.stats.leading_sentinel_rows += 1,
                Some(_) => self.stats.trailing_sentinel_rows += 1,
            }
            return;
        }

        self.stats.valid_rows += 1;
        let value = row.value();
        match self.window.as_mut() {
            None => {
                let start = backdate(value, self.stats.leading_sentinel_rows);
                trace!(
                    "first fix at {value}, backdated by {} rows",
                    self.stats.leading_sentinel_rows
                );
                self.window = Some(FlightWindow::new(start, value));
            }
            Some(window) => window.end = window.end.max(value),
        }
    }

    /// Window so far; `(0, 0)` until a valid row has been seen
    pub fn window(&self) -> FlightWindow {
        self.window.unwrap_or_default()
    }

    pub fn stats(&self) -> WindowStats {
        self.stats
    }

    pub fn finish(self) -> (FlightWindow, WindowStats) {
        (self.window(), self.stats)
    }
}

impl Extend<ParsedRow> for WindowAggregator {
    fn extend<T: IntoIterator<Item = ParsedRow>>(&mut self, rows: T) {
        for row in rows {
            self.push(row);
        }
    }
}

impl FromIterator<ParsedRow> for WindowAggregator {
    fn from_iter<T: IntoIterator<Item = ParsedRow>>(rows: T) -> Self {
        let mut aggregator = Self::new();
        aggregator.extend(rows);
        aggregator
    }
}

/// Move the first fix back by one second per row logged before it
fn backdate(first_fix: EpochSeconds, rows_without_fix: u64) -> EpochSeconds {
    first_fix - rows_without_fix as EpochSeconds
}
