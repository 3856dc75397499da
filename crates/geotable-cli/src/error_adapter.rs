//! Bridge from [`GeoTableError`] to miette's graphical reports.
//!
//! Each diagnostic of a [`geotable_parser::ParseError`] becomes its own
//! report with a snippet of the document it points into. Every other error
//! becomes a single report without source.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity, SourceCode, SourceSpan};

use geotable::GeoTableError;
use geotable_parser::{Diagnostic, Span};

/// One renderable report.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A document diagnostic and the source it points into.
    Diagnostic { diag: &'a Diagnostic, src: &'a str },
    /// An error without source location.
    Error(&'a GeoTableError),
}

impl Reportable<'_> {
    fn error_code(err: &GeoTableError) -> Option<&'static str> {
        match err {
            GeoTableError::Io(_) => Some("geotable::io"),
            GeoTableError::Parse { .. } => None,
            GeoTableError::Report(_) => Some("geotable::report"),
            GeoTableError::Export(_) => Some("geotable::export"),
        }
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic { diag, .. } => f.write_str(diag.message()),
            Reportable::Error(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic { .. } => None,
            Reportable::Error(err) => err.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic { diag, .. } => diag
                .code()
                .map(|code| Box::new(code) as Box<dyn fmt::Display>),
            Reportable::Error(err) => {
                Self::error_code(err).map(|code| Box::new(code) as Box<dyn fmt::Display>)
            }
        }
    }

    fn severity(&self) -> Option<Severity> {
        match self {
            Reportable::Diagnostic { diag, .. } if diag.severity().is_warning() => {
                Some(Severity::Warning)
            }
            _ => Some(Severity::Error),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic { diag, .. } => diag
                .help()
                .map(|help| Box::new(help) as Box<dyn fmt::Display>),
            Reportable::Error(_) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            Reportable::Diagnostic { src, .. } => Some(src as &dyn SourceCode),
            Reportable::Error(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Reportable::Diagnostic { diag, .. } = self else {
            return None;
        };
        if diag.labels().is_empty() {
            return None;
        }

        Some(Box::new(diag.labels().iter().map(|label| {
            let span = to_source_span(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Split an error into the reports to print, one per parse diagnostic.
pub fn to_reportables(err: &GeoTableError) -> Vec<Reportable<'_>> {
    match err {
        GeoTableError::Parse { err, src } => err
            .diagnostics()
            .iter()
            .map(|diag| Reportable::Diagnostic { diag, src })
            .collect(),
        _ => vec![Reportable::Error(err)],
    }
}

#[cfg(test)]
mod tests {
    use geotable_parser::{ParseError, error::ErrorCode};

    use super::*;

    #[test]
    fn test_single_diagnostic() {
        let diag = Diagnostic::error("arc radius must be positive")
            .with_code(ErrorCode::E201)
            .with_label(Span::new(0..5), "here")
            .with_help("use `turn` to choose the side");
        let err = GeoTableError::new_parse_error(ParseError::from(diag), "radius = -1");

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        assert!(matches!(reportables[0], Reportable::Diagnostic { .. }));
        assert_eq!(reportables[0].to_string(), "arc radius must be positive");
        assert_eq!(reportables[0].code().unwrap().to_string(), "E201");
        assert!(reportables[0].source_code().is_some());
    }

    #[test]
    fn test_every_diagnostic_is_reported() {
        let diags = vec![
            Diagnostic::warning("unsupported element type `multi`")
                .with_code(ErrorCode::E102)
                .with_label(Span::new(0..5), "skipped"),
            Diagnostic::error("missing field `length`")
                .with_code(ErrorCode::E100)
                .with_label(Span::new(10..15), "in this element"),
        ];
        let err = GeoTableError::new_parse_error(ParseError::from(diags), "source text here...");

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].severity(), Some(Severity::Warning));
        assert_eq!(reportables[1].severity(), Some(Severity::Error));
    }

    #[test]
    fn test_report_error() {
        let err = GeoTableError::Report("no profile with elements found".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        assert_eq!(
            reportables[0].to_string(),
            "Report error: no profile with elements found"
        );
        assert_eq!(reportables[0].code().unwrap().to_string(), "geotable::report");
        assert!(reportables[0].labels().is_none());
    }

    #[test]
    fn test_labels_keep_primary_flag() {
        let diag = Diagnostic::error("end station precedes start station")
            .with_label(Span::new(0..5), "start")
            .with_secondary_label(Span::new(10..15), "end");
        let reportable = Reportable::Diagnostic {
            diag: &diag,
            src: "some source code",
        };

        let labels: Vec<_> = reportable.labels().unwrap().collect();

        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
        assert_eq!(labels[1].label(), Some("end"));
    }
}
