//! # GeoTable Parser
//!
//! Loads an alignment interchange document (TOML) into the
//! [`geotable_core`] model, with diagnostics that point into the source.
//!
//! ## Usage
//!
//! ```
//! # use geotable_parser::{parse, ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         project = "Demo"
//!
//!         [alignment]
//!         name = "Mainline"
//!
//!         [[alignment.elements]]
//!         type = "line"
//!         length = 250.0
//!     "#;
//!
//!     let project = parse(source)?;
//!     assert_eq!(project.alignment().elements().len(), 1);
//!     Ok(())
//! }
//! ```

mod document;
mod elaborate;
mod elaborate_utils;
pub mod error;
#[cfg(test)]
mod parser_tests;
mod span;

pub use error::{Diagnostic, ParseError};
pub use span::Span;

use geotable_core::alignment::Project;
use log::{debug, warn};

use document::Document;
use elaborate::Builder;
use error::ErrorCode;

/// Parse a document, logging any warnings.
///
/// # Errors
///
/// Returns a [`ParseError`] holding every diagnostic when the document is
/// malformed or any element fails validation.
pub fn parse(source: &str) -> Result<Project, ParseError> {
    let (project, warnings) = parse_with_warnings(source)?;
    for warning in &warnings {
        warn!("{warning}");
    }
    Ok(project)
}

/// Parse a document and hand back the warnings instead of logging them.
pub fn parse_with_warnings(source: &str) -> Result<(Project, Vec<Diagnostic>), ParseError> {
    let document: Document = toml::from_str(source).map_err(syntax_diagnostic)?;
    debug!("Deserialized document");

    Builder::new().build(document)
}

fn syntax_diagnostic(err: toml::de::Error) -> Diagnostic {
    let message = err.message().to_string();
    let code = if message.starts_with("missing field") {
        ErrorCode::E100
    } else {
        ErrorCode::E001
    };

    let diag = Diagnostic::error(message).with_code(code);
    match err.span() {
        Some(range) => diag.with_label(Span::new(range), code.description()),
        None => diag,
    }
}
