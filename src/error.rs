use thiserror::Error;

/// Errors surfaced while extracting or exporting flight times
///
/// Malformed data rows are not errors: they decode to the sentinel value and
/// are absorbed by the window aggregator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FdlError {
    /// The byte source could not be opened
    #[error("cannot open {name}: {source}")]
    ResourceUnavailable {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// One of the three header lines is missing or lacks its signature prefix
    #[error("header line {line} does not start with {expected:?}")]
    HeaderMismatch { line: usize, expected: &'static str },

    /// I/O errors while writing exports
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV export errors
    #[cfg(feature = "csv")]
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// JSON export errors
    #[cfg(feature = "json")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FdlError>;
