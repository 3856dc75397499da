//! Vertical element engine: grade tangents and parabolic vertical curves.
//!
//! Grades are stored as decimal slopes and reported in percent.

use geotable_core::{
    profile::{Parabola, Tangent},
    report::{KValue, LabeledPoint, MetricValue, ReportRow, RowKind},
};
use log::trace;

use super::{ElementError, check_stations, failed_row};
use crate::config::ReportConfig;

const TOLERANCE: f64 = 1e-8;

/// Derived quantities of a parabolic vertical curve.
///
/// Grades and the grade difference are in percent; the rate of change is
/// percent per unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalCurve {
    pub grade_in: f64,
    pub grade_out: f64,
    pub grade_diff: f64,
    pub rate_of_change: f64,
    /// Length per percent of grade change, as a magnitude.
    pub k: KValue,
    pub middle_ordinate: f64,
    pub pvc_elevation: f64,
    pub pvt_elevation: f64,
}

impl VerticalCurve {
    pub fn new(parabola: &Parabola) -> Self {
        let length = parabola.length;
        let grade_in = parabola.grade_in * 100.0;
        let grade_out = parabola.grade_out * 100.0;
        let grade_diff = grade_out - grade_in;

        let rate_of_change = if length.abs() > TOLERANCE {
            grade_diff / length
        } else {
            0.0
        };
        let k = if grade_diff.abs() > TOLERANCE {
            KValue::Finite(length / grade_diff)
        } else {
            KValue::Undefined
        };

        let half = length / 2.0;
        let pvc_elevation = parabola.pvi_elevation - parabola.grade_in * half;
        // A zero end elevation on a curve whose PVI is not at zero means the
        // end elevation was never recorded
        let pvt_elevation = if parabola.end_elevation.abs() < TOLERANCE
            && parabola.pvi_elevation.abs() > TOLERANCE
        {
            parabola.pvi_elevation + parabola.grade_out * half
        } else {
            parabola.end_elevation
        };

        Self {
            grade_in,
            grade_out,
            grade_diff,
            rate_of_change,
            k,
            middle_ordinate: (rate_of_change * length * length / 800.0).abs(),
            pvc_elevation,
            pvt_elevation,
        }
    }
}

/// Builds rows for profile elements.
#[derive(Debug)]
pub struct VerticalEngine<'a> {
    config: &'a ReportConfig,
}

impl<'a> VerticalEngine<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    /// A tangent row; only the first element of a profile shows its `POB`.
    pub fn tangent_row(&self, tangent: &Tangent, first: bool) -> ReportRow {
        self.tangent(tangent, first)
            .unwrap_or_else(|err| failed_row(RowKind::Tangent, "tangent", err))
    }

    pub fn parabola_row(&self, parabola: &Parabola) -> ReportRow {
        self.parabola(parabola)
            .unwrap_or_else(|err| failed_row(RowKind::Parabola, "curve", err))
    }

    fn tangent(&self, tangent: &Tangent, first: bool) -> Result<ReportRow, ElementError> {
        check_stations(tangent.start_station, tangent.end_station)?;
        check_finite(&[tangent.start_elevation, tangent.end_elevation, tangent.grade])?;

        let mut row = ReportRow::new(RowKind::Tangent);
        if first {
            row = row.with_point(LabeledPoint::profile(
                "POB",
                tangent.start_station,
                tangent.start_elevation,
            ));
        }

        Ok(row
            .with_point(LabeledPoint::profile(
                "PVI",
                tangent.end_station,
                tangent.end_elevation,
            ))
            .with_metric(
                "Grade",
                "Tangent Grade",
                MetricValue::number(tangent.grade * 100.0, 3),
            )
            .with_metric("Length", "Tangent Length", MetricValue::number(tangent.length, 2)))
    }

    fn parabola(&self, parabola: &Parabola) -> Result<ReportRow, ElementError> {
        check_stations(parabola.start_station, parabola.end_station)?;
        check_finite(&[
            parabola.pvi_station,
            parabola.pvi_elevation,
            parabola.grade_in,
            parabola.grade_out,
        ])?;

        let curve = VerticalCurve::new(parabola);
        trace!(curve:?; "Evaluated vertical curve");

        let row = ReportRow::new(RowKind::Parabola)
            .with_point(LabeledPoint::profile(
                "PVC",
                parabola.start_station,
                curve.pvc_elevation,
            ))
            .with_point(LabeledPoint::profile(
                "PVI",
                parabola.pvi_station,
                parabola.pvi_elevation,
            ))
            .with_point(LabeledPoint::profile(
                "PVT",
                parabola.end_station,
                curve.pvt_elevation,
            ))
            .with_metric("Length", "Length", MetricValue::number(parabola.length, 2));

        let row = if curve.grade_diff.abs() > self.config.sight_distance_grade_threshold() {
            row.with_metric(
                "StoppingSightDistance",
                "Stopping Sight Distance",
                MetricValue::number(self.config.stopping_sight_distance(), 2),
            )
        } else {
            row.with_metric(
                "HeadlightSightDistance",
                "Headlight Sight Distance",
                MetricValue::number(self.config.headlight_sight_distance(), 2),
            )
        };

        Ok(row
            .with_metric(
                "GradeIn",
                "Entrance Grade",
                MetricValue::number(curve.grade_in, 3),
            )
            .with_metric("GradeOut", "Exit Grade", MetricValue::number(curve.grade_out, 3))
            .with_metric(
                "RateOfChange",
                "r = ( g2 - g1 ) / L",
                MetricValue::number(curve.rate_of_change, 3),
            )
            .with_metric("K", "K = l / ( g2 - g1 )", MetricValue::K(curve.k))
            .with_metric(
                "MiddleOrdinate",
                "Middle Ordinate",
                MetricValue::number(curve.middle_ordinate, 2),
            ))
    }
}

fn check_finite(values: &[f64]) -> Result<(), ElementError> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ElementError::Invalid(
            "elevation or grade is not a finite number".to_string(),
        ))
    }
}
