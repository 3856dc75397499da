//! Report model: the structure every renderer consumes.
//!
//! A [`Report`] is a header plus one [`ReportRow`] per reported element.
//! Rows are built once and never mutated afterwards; renderers only read
//! them, so the text, XML and document encodings always show the same
//! numbers.

use indexmap::IndexMap;

use crate::{
    alignment::{Alignment, Project, TurnDirection},
    format::{format_angle_dms, format_bearing, format_rounded},
    geometry::Point3D,
    profile::Profile,
};

/// Which half of the alignment a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Horizontal,
    Vertical,
}

/// What a row describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Line,
    Arc,
    Spiral,
    Tangent,
    Parabola,
    /// An element type with no layout; carries the raw type name.
    Unsupported(String),
}

impl RowKind {
    /// Heading printed above the row in human-readable encodings.
    pub fn heading(&self) -> &str {
        match self {
            Self::Line | Self::Tangent => "Linear",
            Self::Arc => "Circular",
            Self::Spiral => "Clothoid",
            Self::Parabola => "Parabola",
            Self::Unsupported(name) => name,
        }
    }

    /// Element name in structured encodings.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Line => "Line",
            Self::Arc => "Arc",
            Self::Spiral => "Spiral",
            Self::Tangent => "Tangent",
            Self::Parabola => "Parabola",
            Self::Unsupported(_) => "Unsupported",
        }
    }
}

/// Where a labeled point sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// A plan position (horizontal reports).
    Plan(Point3D),
    /// An elevation on the profile (vertical reports).
    Profile { elevation: f64 },
}

/// A named point on an element, such as `PC`, `PI` or `PVT`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPoint {
    label: &'static str,
    station: Option<f64>,
    position: Position,
}

impl LabeledPoint {
    pub fn plan(label: &'static str, station: f64, point: Point3D) -> Self {
        Self {
            label,
            station: Some(station),
            position: Position::Plan(point),
        }
    }

    /// A plan point with no station, such as a radius point.
    pub fn unstationed(label: &'static str, point: Point3D) -> Self {
        Self {
            label,
            station: None,
            position: Position::Plan(point),
        }
    }

    pub fn profile(label: &'static str, station: f64, elevation: f64) -> Self {
        Self {
            label,
            station: Some(station),
            position: Position::Profile { elevation },
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn station(&self) -> Option<f64> {
        self.station
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

/// A vertical curve's K value, `L / Δg`; undefined when the grades are equal.
///
/// The finite value keeps its sign. Only the display form drops it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KValue {
    Finite(f64),
    Undefined,
}

/// A metric's value, which also decides how it is displayed.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    /// A plain number shown with a fixed number of decimals.
    Number { value: f64, decimals: usize },
    /// Decimal degrees, shown as degrees-minutes-seconds.
    Angle(f64),
    /// Azimuth in radians, shown as a quadrant bearing.
    Bearing(f64),
    /// Decimal degrees with a turn direction, e.g. a curve's delta.
    Deflection {
        degrees: f64,
        direction: TurnDirection,
    },
    K(KValue),
    Text(String),
}

impl MetricValue {
    pub fn number(value: f64, decimals: usize) -> Self {
        Self::Number { value, decimals }
    }

    /// Display form shared by the text and document encodings.
    pub fn display(&self) -> String {
        match self {
            Self::Number { value, decimals } => format_rounded(*value, *decimals),
            Self::Angle(degrees) => format_angle_dms(*degrees),
            Self::Bearing(direction) => format_bearing(*direction),
            Self::Deflection { degrees, direction } => {
                format!("{} {direction}", format_angle_dms(*degrees))
            }
            Self::K(KValue::Finite(k)) => format_rounded(k.abs(), 3),
            Self::K(KValue::Undefined) => "INF".to_string(),
            Self::Text(text) => text.clone(),
        }
    }

    /// Full-precision form used by structured encodings.
    ///
    /// Angles stay in decimal degrees and bearings in radians.
    pub fn raw(&self) -> String {
        match self {
            Self::Number { value, .. } => value.to_string(),
            Self::Angle(degrees) => degrees.to_string(),
            Self::Bearing(direction) => direction.to_string(),
            Self::Deflection { degrees, .. } => degrees.to_string(),
            Self::K(KValue::Finite(k)) => k.to_string(),
            Self::K(KValue::Undefined) => "INF".to_string(),
            Self::Text(text) => text.clone(),
        }
    }

    /// True for values that line up in a numeric column.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number { .. } | Self::K(_))
    }
}

/// A labeled metric of a row.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    label: &'static str,
    value: MetricValue,
}

impl Metric {
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn value(&self) -> &MetricValue {
        &self.value
    }
}

/// Whether a row carries computed values.
#[derive(Debug, Clone, PartialEq)]
pub enum RowStatus {
    Complete,
    /// The element could not be evaluated.
    Failed(String),
    /// The element type has no layout.
    Unsupported,
}

/// One reported element.
///
/// Metrics keep insertion order, which is the order encodings print them.
///
/// # Examples
///
/// ```
/// # use geotable_core::report::{MetricValue, ReportRow, RowKind};
/// let row = ReportRow::new(RowKind::Line)
///     .with_metric("Length", "Tangent Length", MetricValue::number(250.0, 4));
/// assert_eq!(row.metric("Length").unwrap().value().display(), "250.0000");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    kind: RowKind,
    points: Vec<LabeledPoint>,
    metrics: IndexMap<&'static str, Metric>,
    status: RowStatus,
}

impl ReportRow {
    pub fn new(kind: RowKind) -> Self {
        Self {
            kind,
            points: Vec::new(),
            metrics: IndexMap::new(),
            status: RowStatus::Complete,
        }
    }

    /// A row standing in for an element that could not be evaluated.
    pub fn failed(kind: RowKind, message: impl Into<String>) -> Self {
        Self {
            status: RowStatus::Failed(message.into()),
            ..Self::new(kind)
        }
    }

    /// A placeholder row for an element type with no layout.
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        Self {
            status: RowStatus::Unsupported,
            ..Self::new(RowKind::Unsupported(type_name.into()))
        }
    }

    pub fn with_point(mut self, point: LabeledPoint) -> Self {
        self.points.push(point);
        self
    }

    /// Adds a metric under a machine `key` with a display `label`.
    pub fn with_metric(mut self, key: &'static str, label: &'static str, value: MetricValue) -> Self {
        self.metrics.insert(key, Metric { label, value });
        self
    }

    pub fn kind(&self) -> &RowKind {
        &self.kind
    }

    pub fn points(&self) -> &[LabeledPoint] {
        &self.points
    }

    /// Metrics keyed by machine name.
    pub fn metrics(&self) -> impl Iterator<Item = (&'static str, &Metric)> {
        self.metrics.iter().map(|(key, metric)| (*key, metric))
    }

    pub fn metric(&self, key: &str) -> Option<&Metric> {
        self.metrics.get(key)
    }

    pub fn status(&self) -> &RowStatus {
        &self.status
    }

    /// Failure or placeholder message, if any.
    pub fn message(&self) -> Option<&str> {
        match &self.status {
            RowStatus::Complete => None,
            RowStatus::Failed(message) => Some(message),
            RowStatus::Unsupported => Some(UNSUPPORTED_MESSAGE),
        }
    }
}

const UNSUPPORTED_MESSAGE: &str = "Unsupported element type.";

/// Name, description and style of a reported object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedObject {
    name: String,
    description: String,
    style: String,
}

impl NamedObject {
    /// Missing descriptions become empty; missing styles become `Default`.
    pub fn new(name: &str, description: Option<&str>, style: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            description: description.unwrap_or_default().to_string(),
            style: style.unwrap_or("Default").to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn style(&self) -> &str {
        &self.style
    }
}

impl From<&Alignment> for NamedObject {
    fn from(alignment: &Alignment) -> Self {
        Self::new(alignment.name(), alignment.description(), alignment.style())
    }
}

impl From<&Profile> for NamedObject {
    fn from(profile: &Profile) -> Self {
        Self::new(profile.name(), profile.description(), profile.style())
    }
}

/// Identifying lines printed above the rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    project_name: String,
    project_description: String,
    alignment: NamedObject,
    profile: Option<NamedObject>,
}

impl ReportHeader {
    pub fn horizontal(project: &Project) -> Self {
        Self {
            project_name: project.name().to_string(),
            project_description: project.description().unwrap_or_default().to_string(),
            alignment: NamedObject::from(project.alignment()),
            profile: None,
        }
    }

    pub fn vertical(project: &Project, profile: &Profile) -> Self {
        Self {
            profile: Some(NamedObject::from(profile)),
            ..Self::horizontal(project)
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn project_description(&self) -> &str {
        &self.project_description
    }

    pub fn alignment(&self) -> &NamedObject {
        &self.alignment
    }

    pub fn profile(&self) -> Option<&NamedObject> {
        self.profile.as_ref()
    }
}

/// A complete report, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    kind: ReportKind,
    header: ReportHeader,
    rows: Vec<ReportRow>,
}

impl Report {
    pub fn new(kind: ReportKind, header: ReportHeader, rows: Vec<ReportRow>) -> Self {
        Self { kind, header, rows }
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn header(&self) -> &ReportHeader {
        &self.header
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_display_forms() {
        assert_eq!(MetricValue::number(1.23456, 4).display(), "1.2346");
        assert_eq!(MetricValue::Angle(12.5).display(), "12^30'00.0000\"");
        assert_eq!(
            MetricValue::Bearing(0.0).display(),
            "N 0^00'00.0000\" E"
        );
        assert_eq!(
            MetricValue::Deflection {
                degrees: 12.5,
                direction: TurnDirection::Left
            }
            .display(),
            "12^30'00.0000\" Left"
        );
        assert_eq!(MetricValue::K(KValue::Finite(66.6667)).display(), "66.667");
        assert_eq!(MetricValue::K(KValue::Undefined).display(), "INF");
        assert_eq!(MetricValue::K(KValue::Finite(-62.5)).display(), "62.500");
    }

    #[test]
    fn test_metric_raw_keeps_precision() {
        assert_eq!(MetricValue::number(1.23456, 4).raw(), "1.23456");
        assert_eq!(MetricValue::K(KValue::Undefined).raw(), "INF");
        assert_eq!(MetricValue::K(KValue::Finite(-62.5)).raw(), "-62.5");
    }

    #[test]
    fn test_row_metrics_keep_insertion_order() {
        let row = ReportRow::new(RowKind::Arc)
            .with_metric("Radius", "Radius", MetricValue::number(500.0, 4))
            .with_metric("Delta", "Delta", MetricValue::Angle(10.0))
            .with_metric("Length", "Length", MetricValue::number(87.0, 4));

        let keys: Vec<_> = row.metrics().map(|(key, _)| key).collect();
        assert_eq!(keys, ["Radius", "Delta", "Length"]);
    }

    #[test]
    fn test_row_status_messages() {
        assert_eq!(ReportRow::new(RowKind::Line).message(), None);
        assert_eq!(
            ReportRow::failed(RowKind::Arc, "boom").message(),
            Some("boom")
        );

        let row = ReportRow::unsupported("Multi");
        assert_eq!(row.kind().heading(), "Multi");
        assert_eq!(row.kind().tag(), "Unsupported");
        assert_eq!(row.message(), Some("Unsupported element type."));
    }

    #[test]
    fn test_named_object_defaults() {
        let named = NamedObject::new("CL", None, None);
        assert_eq!(named.description(), "");
        assert_eq!(named.style(), "Default");
    }

    #[test]
    fn test_header_for_vertical_report() {
        let project = Project::new("Demo", Alignment::new("CL").with_style("Rail"));
        let profile = Profile::new("Layout");
        let header = ReportHeader::vertical(&project, &profile);

        assert_eq!(header.project_name(), "Demo");
        assert_eq!(header.alignment().style(), "Rail");
        assert_eq!(header.profile().map(NamedObject::name), Some("Layout"));
    }
}
