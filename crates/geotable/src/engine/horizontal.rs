//! Horizontal element engine: lines, circular arcs and spirals.

use geotable_core::{
    alignment::{Arc, Line, Spiral},
    geometry::{GeometryProvider, Point3D},
    report::{LabeledPoint, MetricValue, ReportRow, RowKind},
};
use log::trace;

use super::{ElementError, check_stations, failed_row};
use crate::config::ReportConfig;

/// Degree of curvature of a 100-unit chord is this constant over the radius.
const DEGREE_OF_CURVATURE_CONSTANT: f64 = 5729.58;

/// Start and end labels of a line, chosen from its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineLabels {
    pub start: &'static str,
    pub end: &'static str,
}

/// Derived quantities of a circular arc.
///
/// All lengths are in the unit of the radius; the degree of curvature is in
/// decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub chord: f64,
    pub middle_ordinate: f64,
    pub external: f64,
    pub tangent: f64,
    pub degree_of_curvature: f64,
}

impl ArcGeometry {
    /// Computes the arc quantities for `radius` and central angle `delta`
    /// (radians, either sign).
    pub fn new(radius: f64, delta: f64) -> Self {
        let half = delta.abs() / 2.0;
        Self {
            chord: 2.0 * radius * half.sin(),
            middle_ordinate: radius * (1.0 - half.cos()),
            external: radius * (1.0 / half.cos() - 1.0),
            tangent: radius * half.tan(),
            degree_of_curvature: DEGREE_OF_CURVATURE_CONSTANT / radius,
        }
    }
}

/// Builds rows for horizontal elements.
///
/// Every labeled point is located through the provider at zero offset; the
/// arc centre is located at a lateral offset of one radius unless the arc
/// stores its own.
#[derive(Debug)]
pub struct HorizontalEngine<'a, P: ?Sized> {
    provider: &'a P,
    config: &'a ReportConfig,
}

impl<'a, P: GeometryProvider + ?Sized> HorizontalEngine<'a, P> {
    pub fn new(provider: &'a P, config: &'a ReportConfig) -> Self {
        Self { provider, config }
    }

    pub fn line_row(&self, line: &Line, labels: LineLabels) -> ReportRow {
        self.line(line, labels)
            .unwrap_or_else(|err| failed_row(RowKind::Line, "line", err))
    }

    pub fn arc_row(&self, arc: &Arc) -> ReportRow {
        self.arc(arc)
            .unwrap_or_else(|err| failed_row(RowKind::Arc, "arc", err))
    }

    pub fn spiral_row(&self, spiral: &Spiral) -> ReportRow {
        self.spiral(spiral)
            .unwrap_or_else(|err| failed_row(RowKind::Spiral, "spiral", err))
    }

    fn locate(&self, station: f64) -> Result<Point3D, ElementError> {
        Ok(self.provider.locate(station, 0.0, 0.0)?)
    }

    fn line(&self, line: &Line, labels: LineLabels) -> Result<ReportRow, ElementError> {
        check_stations(line.start_station, line.end_station)?;
        if !line.direction.is_finite() {
            return Err(ElementError::Invalid(
                "line direction is not a finite number".to_string(),
            ));
        }

        let start = self.locate(line.start_station)?;
        let end = self.locate(line.end_station)?;
        trace!(start:?, end:?; "Located line");

        Ok(ReportRow::new(RowKind::Line)
            .with_point(LabeledPoint::plan(labels.start, line.start_station, start))
            .with_point(LabeledPoint::plan(labels.end, line.end_station, end))
            .with_metric(
                "Direction",
                "Tangent Direction",
                MetricValue::Bearing(line.direction),
            )
            .with_metric("Length", "Tangent Length", MetricValue::number(line.length, 4)))
    }

    fn arc(&self, arc: &Arc) -> Result<ReportRow, ElementError> {
        check_stations(arc.start_station, arc.end_station)?;
        if !(arc.radius > 0.0 && arc.radius.is_finite()) {
            return Err(ElementError::Invalid(format!(
                "arc radius {} is not positive",
                arc.radius
            )));
        }

        let mid_station = (arc.start_station + arc.end_station) / 2.0;
        let start = self.locate(arc.start_station)?;
        let mid = self.locate(mid_station)?;
        let center = match arc.center_point {
            Some(center) => center,
            None => {
                let offset = if arc.clockwise { -arc.radius } else { arc.radius };
                self.provider.locate(mid_station, offset, 0.0)?
            }
        };
        let end = self.locate(arc.end_station)?;
        trace!(start:?, mid:?, center:?, end:?; "Located arc");

        let geometry = ArcGeometry::new(arc.radius, arc.delta);

        Ok(ReportRow::new(RowKind::Arc)
            .with_point(LabeledPoint::plan("SC", arc.start_station, start))
            .with_point(LabeledPoint::plan("PI", mid_station, mid))
            .with_point(LabeledPoint::unstationed("CC", center))
            .with_point(LabeledPoint::plan("CS", arc.end_station, end))
            .with_metric("Radius", "Radius", MetricValue::number(arc.radius, 4))
            .with_metric(
                "DesignSpeed",
                "Design Speed(mph)",
                MetricValue::number(self.config.design_speed_mph(), 4),
            )
            .with_metric(
                "Cant",
                "Cant(inches)",
                MetricValue::number(self.config.cant_inches(), 3),
            )
            .with_metric(
                "Delta",
                "Delta",
                MetricValue::Deflection {
                    degrees: arc.delta.abs().to_degrees(),
                    direction: arc.turn_direction(),
                },
            )
            .with_metric(
                "DegreeOfCurvature",
                "Degree of Curvature(Chord)",
                MetricValue::Angle(geometry.degree_of_curvature),
            )
            .with_metric("Length", "Length", MetricValue::number(arc.length, 4))
            .with_metric(
                "ChordedLength",
                "Length(Chorded)",
                MetricValue::number(arc.length, 4),
            )
            .with_metric("Tangent", "Tangent", MetricValue::number(geometry.tangent, 4))
            .with_metric("Chord", "Chord", MetricValue::number(geometry.chord, 4))
            .with_metric(
                "MiddleOrdinate",
                "Middle Ordinate",
                MetricValue::number(geometry.middle_ordinate, 4),
            )
            .with_metric(
                "External",
                "External",
                MetricValue::number(geometry.external, 4),
            ))
    }

    fn spiral(&self, spiral: &Spiral) -> Result<ReportRow, ElementError> {
        check_stations(spiral.start_station, spiral.end_station)?;

        let (first, last) = if spiral.is_entry() {
            ("TS", "SC")
        } else {
            ("CS", "ST")
        };

        let mid_station = (spiral.start_station + spiral.end_station) / 2.0;
        let start = self.locate(spiral.start_station)?;
        let mid = self.locate(mid_station)?;
        let end = self.locate(spiral.end_station)?;
        trace!(first, last; "Located spiral");

        Ok(ReportRow::new(RowKind::Spiral)
            .with_point(LabeledPoint::plan(first, spiral.start_station, start))
            .with_point(LabeledPoint::plan("SPI", mid_station, mid))
            .with_point(LabeledPoint::plan(last, spiral.end_station, end))
            .with_metric(
                "RadiusIn",
                "Entrance Radius",
                MetricValue::number(display_radius(spiral.radius_in), 4),
            )
            .with_metric(
                "RadiusOut",
                "Exit Radius",
                MetricValue::number(display_radius(spiral.radius_out), 4),
            )
            .with_metric("Length", "Length", MetricValue::number(spiral.length, 4))
            .with_metric(
                "SpiralAngle",
                "Spiral Angle",
                MetricValue::Angle(spiral.deflection().to_degrees()),
            ))
    }
}

/// Negative or undefined radii are shown as zero.
fn display_radius(radius: f64) -> f64 {
    if radius.is_finite() && radius > 0.0 {
        radius
    } else {
        0.0
    }
}
