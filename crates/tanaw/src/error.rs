//! Error types for the TANAW engine.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cleaning operations.
///
/// Only unreadable input and a missing header row abort a cleaning run.
/// Recoverable conditions (column-count mismatches, unmapped headers,
/// unparseable cells, implausible rows) are recorded in the
/// [`CleaningReport`](crate::report::CleaningReport) instead.
#[derive(Debug, Error)]
pub enum TanawError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty or unparseable input file.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// No row containing region and grade indicators was found.
    /// Fatal: the file cannot be classified as any supported layout.
    #[error("No header row found: {0}")]
    HeaderNotFound(String),

    /// Cleaning removed every data row; nothing was written.
    #[error("Empty result after cleaning: {0}")]
    EmptyResult(String),
}

/// Result type alias for TANAW operations.
pub type Result<T> = std::result::Result<T, TanawError>;
