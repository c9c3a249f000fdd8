//! Submodule defining the errors used across the crate.

use std::io;
use std::path::PathBuf;

/// Errors that can abort a generation run.
///
/// Malformed field values never surface here: they degrade to their
/// documented defaults during normalization.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input CSV could not be opened.
    #[error("Failed to open input file {}: {source}", path.display())]
    OpenInput {
        /// Path that was configured as input.
        path: PathBuf,
        /// Underlying reader error.
        source: csv::Error,
    },
    /// A record could not be read or decoded.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Writing the generated SQL failed.
    #[error("Output error: {0}")]
    Io(#[from] io::Error),
    /// A row was looked up by a column the header does not declare.
    #[error("Column `{column}` is missing from the input header (line {line})")]
    MissingColumn {
        /// The column that was requested.
        column: &'static str,
        /// Line of the record being normalized.
        line: u64,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
