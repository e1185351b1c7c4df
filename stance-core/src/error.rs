//! Error type for loading datasets and normalization tables.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the loader and the table readers.
///
/// Cleaning itself cannot fail; every variant comes from reading input.
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be opened.
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Reading from an already-open source failed.
    #[error(transparent)]
    Read(#[from] io::Error),
    /// The delimited file is malformed.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// A header or row is narrower than the column layout.
    #[error("line {line}: expected at least {required} columns, found {found}")]
    MissingColumns {
        /// 1-based line number in the file.
        line: u64,
        /// Columns present on that line.
        found: usize,
        /// Columns the layout needs.
        required: usize,
    },
    /// A JSON table is not an object of strings.
    #[error("normalization table is not a JSON string map: {0}")]
    Json(#[from] serde_json::Error),
    /// A tab-separated table line is malformed.
    #[error("normalization table line {line}: {reason}")]
    TableFormat {
        /// 1-based line number.
        line: usize,
        /// What is wrong with the line.
        reason: &'static str,
    },
    /// A table entry expands to no tokens.
    #[error("normalization entry '{key}' has an empty replacement")]
    EmptyReplacement {
        /// Offending key.
        key: String,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
