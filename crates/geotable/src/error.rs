//! Error types for GeoTable operations.
//!
//! Only report-level problems are errors. An element that cannot be
//! evaluated never fails a report; it becomes a row explaining why.

use std::io;

use thiserror::Error;

use geotable_parser::error::ParseError;

/// The main error type for GeoTable operations.
///
/// The `Parse` variant keeps the source text so callers can render the
/// diagnostics against it.
#[derive(Debug, Error)]
pub enum GeoTableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    /// The report as a whole cannot be produced, e.g. no profile to report.
    #[error("Report error: {0}")]
    Report(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for GeoTableError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl GeoTableError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
