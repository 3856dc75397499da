//! Error and diagnostic system for the GeoTable document loader.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans per diagnostic
//! - Severity levels
//! - A collector so one load reports every problem
//!
//! # Example
//!
//! ```
//! # use geotable_parser::error::{Diagnostic, ErrorCode};
//! # use geotable_parser::Span;
//! let diag = Diagnostic::error("end station precedes start station")
//!     .with_code(ErrorCode::E200)
//!     .with_label(Span::new(100..105), "end is 1200")
//!     .with_secondary_label(Span::new(80..85), "start is 1250")
//!     .with_help("stations must increase along the alignment");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
