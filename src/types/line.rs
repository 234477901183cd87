/// Signed seconds since 1970-01-01T00:00:00 UTC
pub type EpochSeconds = i64;

/// Values at or below one year of seconds are treated as "no fix yet"
pub const SENTINEL_CEILING: EpochSeconds = 365 * 86_400;

/// One newline-delimited line, without its terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based position of the line in the file
    pub ordinal: usize,
    pub bytes: Vec<u8>,
}

impl RawLine {
    pub fn new(ordinal: usize, bytes: Vec<u8>) -> Self {
        Self { ordinal, bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Decoded value of a data row: a UTC instant, or the sentinel `0` when the
/// row had no time fix or could not be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ParsedRow(EpochSeconds);

impl ParsedRow {
    pub const SENTINEL: ParsedRow = ParsedRow(0);

    pub fn new(value: EpochSeconds) -> Self {
        Self(value)
    }

    pub fn value(self) -> EpochSeconds {
        self.0
    }

    /// True for the `0` sentinel and for any value inside the first year after
    /// the epoch, which no real fix can produce
    pub fn is_sentinel(self) -> bool {
        self.0 <= SENTINEL_CEILING
    }
}

impl From<EpochSeconds> for ParsedRow {
    fn from(value: EpochSeconds) -> Self {
        Self(value)
    }
}
