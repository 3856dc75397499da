//! Export functionality for GeoTable reports.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! converting a built [`Report`] into output bytes. It is the final stage in
//! the GeoTable processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Interchange Document
//!     ↓ parse
//! Project (alignment + profiles)
//!     ↓ engines + model builder
//! Report (header + rows)
//!     ↓ export (this module)
//! Output bytes
//! ```
//!
//! # Available Encodings
//!
//! - [`text`] - fixed-width tabular text via [`text::TextExporter`]
//! - [`xml`] - full-precision markup via [`xml::XmlExporter`]
//! - [`document`] - paginated document via [`document::DocumentExporter`]
//!   and a pluggable [`document::DocumentBackend`]
//!
//! Every human-readable cell goes through the display helpers in this
//! module, so the text and document encodings cannot disagree.
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. [`Error`] converts into
//! [`GeoTableError::Export`] at the crate boundary.
//!
//! [`GeoTableError::Export`]: crate::GeoTableError::Export

pub mod document;
pub mod text;
pub mod xml;

use std::{fmt, str::FromStr};

use geotable_core::{
    format::{format_rounded, format_station},
    report::{LabeledPoint, Metric, Position, Report, ReportHeader, ReportKind},
};

/// Abstraction for report encodings.
///
/// Implementors read a [`Report`] and never alter its values.
pub trait Exporter {
    /// Encodes the report.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the encoding or its backend fails.
    fn export(&self, report: &Report) -> Result<Vec<u8>, Error>;
}

/// Output encoding chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Xml,
    Document,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "xml" => Ok(Self::Xml),
            "document" | "doc" | "pdf" => Ok(Self::Document),
            other => Err(Error::Render(format!("unknown output format '{other}'"))),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Xml => "xml",
            Self::Document => "document",
        };
        write!(f, "{name}")
    }
}

/// Errors that can occur during report export.
///
/// This type is converted into [`GeoTableError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`GeoTableError::Export`]: crate::GeoTableError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
    /// The XML writer rejected an event.
    Xml(String),
    /// The document backend failed or is unavailable.
    Backend(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Xml(msg) => write!(f, "XML error: {msg}"),
            Self::Backend(msg) => write!(f, "Document backend error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Render(_) | Self::Xml(_) | Self::Backend(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Self {
        Self::Render(err.to_string())
    }
}

/// Column titles after the label column.
pub(crate) fn column_titles(kind: ReportKind) -> &'static [&'static str] {
    match kind {
        ReportKind::Horizontal => &["STATION", "NORTHING", "EASTING"],
        ReportKind::Vertical => &["STATION", "ELEVATION"],
    }
}

/// Header lines shared by the human-readable encodings.
pub(crate) fn header_lines(header: &ReportHeader) -> Vec<String> {
    let alignment = header.alignment();
    let mut lines = vec![
        format!("Project Name: {}", header.project_name()),
        format!(" Description: {}", header.project_description()),
        format!("Horizontal Alignment Name: {}", alignment.name()),
        format!(" Description: {}", alignment.description()),
        format!(" Style: {}", alignment.style()),
    ];
    if let Some(profile) = header.profile() {
        lines.push(format!("Vertical Alignment Name: {}", profile.name()));
        lines.push(format!(" Description: {}", profile.description()));
        lines.push(format!(" Style: {}", profile.style()));
    }
    lines
}

/// Display cells of a point: label, station, then coordinates.
///
/// A point without a station gets an empty station cell.
pub(crate) fn point_cells(point: &LabeledPoint) -> Vec<String> {
    let mut cells = vec![
        point.label().to_string(),
        point.station().map(format_station).unwrap_or_default(),
    ];
    match point.position() {
        Position::Plan(plan) => {
            cells.push(format_rounded(plan.northing(), 4));
            cells.push(format_rounded(plan.easting(), 4));
        }
        Position::Profile { elevation } => cells.push(format_rounded(elevation, 2)),
    }
    cells
}

/// `label: value`, with numbers right-aligned in a 15-wide column.
pub(crate) fn metric_text(metric: &Metric) -> String {
    let value = metric.value();
    if value.is_numeric() {
        format!("{}: {:>15}", metric.label(), value.display())
    } else {
        format!("{}: {}", metric.label(), value.display())
    }
}

#[cfg(test)]
mod tests {
    use geotable_core::{
        geometry::Point3D,
        report::{MetricValue, ReportRow, RowKind},
    };

    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("XML".parse::<Format>().unwrap(), Format::Xml);
        assert_eq!("pdf".parse::<Format>().unwrap(), Format::Document);
        assert!("html".parse::<Format>().is_err());
    }

    #[test]
    fn test_point_cells() {
        let plan = LabeledPoint::plan("PC", 1250.0, Point3D::new(5000.12346, 2000.0, 0.0));
        assert_eq!(point_cells(&plan), ["PC", "12+50.00", "5000.1235", "2000.0000"]);

        let centre = LabeledPoint::unstationed("CC", Point3D::new(1.0, 2.0, 0.0));
        assert_eq!(point_cells(&centre)[1], "");

        let profile = LabeledPoint::profile("PVI", 99.995, 101.25);
        assert_eq!(point_cells(&profile), ["PVI", "0+100.00", "101.25"]);
    }

    #[test]
    fn test_metric_text() {
        let row = ReportRow::new(RowKind::Line)
            .with_metric("Length", "Tangent Length", MetricValue::number(12.5, 4))
            .with_metric("Direction", "Tangent Direction", MetricValue::Bearing(0.0));

        let lines: Vec<_> = row.metrics().map(|(_, metric)| metric_text(metric)).collect();
        assert_eq!(lines[0], "Tangent Length:         12.5000");
        assert_eq!(lines[1], "Tangent Direction: N 0^00'00.0000\" E");
    }
}
