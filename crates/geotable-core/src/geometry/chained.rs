//! Geometry provider that integrates an alignment's own elements.
//!
//! Each element becomes a segment whose curvature varies linearly with
//! length: zero for lines, constant for arcs, and ramped for spirals.
//! Positions inside constant-curvature segments use the closed form;
//! spirals are integrated with Simpson's rule.

use log::{debug, trace};

use crate::{
    alignment::{Alignment, AlignmentElement, curvature},
    geometry::{GeometryProvider, LocateError, Point3D},
    profile::Profile,
};

/// Stations within this distance of an element boundary resolve to it.
const TOLERANCE: f64 = 1e-6;

/// Must be even.
const SIMPSON_INTERVALS: usize = 64;

#[derive(Debug, Clone, Copy)]
struct Segment {
    start_station: f64,
    length: f64,
    northing: f64,
    easting: f64,
    azimuth: f64,
    /// Signed curvature; positive turns right (clockwise).
    curvature_start: f64,
    curvature_end: f64,
}

impl Segment {
    fn end_station(&self) -> f64 {
        self.start_station + self.length
    }

    fn contains(&self, station: f64) -> bool {
        station >= self.start_station - TOLERANCE && station <= self.end_station() + TOLERANCE
    }

    fn heading_at(&self, s: f64) -> f64 {
        let rate = if self.length > 0.0 {
            (self.curvature_end - self.curvature_start) / self.length
        } else {
            0.0
        };
        self.azimuth + self.curvature_start * s + rate * s * s / 2.0
    }

    fn position_at(&self, s: f64) -> (f64, f64) {
        if s == 0.0 {
            return (self.northing, self.easting);
        }

        if self.curvature_start != self.curvature_end {
            return self.integrate(s);
        }

        let k = self.curvature_start;
        let az = self.azimuth;
        if k.abs() < 1e-12 {
            (self.northing + s * az.cos(), self.easting + s * az.sin())
        } else {
            (
                self.northing + ((az + k * s).sin() - az.sin()) / k,
                self.easting + (az.cos() - (az + k * s).cos()) / k,
            )
        }
    }

    fn integrate(&self, s: f64) -> (f64, f64) {
        let h = s / SIMPSON_INTERVALS as f64;
        let mut sum_north = 0.0;
        let mut sum_east = 0.0;

        for i in 0..=SIMPSON_INTERVALS {
            let weight = if i == 0 || i == SIMPSON_INTERVALS {
                1.0
            } else if i % 2 == 1 {
                4.0
            } else {
                2.0
            };
            let heading = self.heading_at(i as f64 * h);
            sum_north += weight * heading.cos();
            sum_east += weight * heading.sin();
        }

        (
            self.northing + sum_north * h / 3.0,
            self.easting + sum_east * h / 3.0,
        )
    }
}

/// Position and heading at the end of the last placed segment.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    northing: f64,
    easting: f64,
    azimuth: f64,
}

/// A [`GeometryProvider`] computed from an [`Alignment`]'s elements.
///
/// Lines take their stored direction; every other element continues from
/// the heading the previous element ended on. Elevations come from the
/// alignment's first non-empty profile, or zero when there is none.
///
/// # Examples
///
/// ```
/// # use geotable_core::alignment::{Alignment, AlignmentElement, Line};
/// # use geotable_core::geometry::{ChainedGeometry, GeometryProvider, Point3D};
/// let alignment = Alignment::new("CL")
///     .with_start(0.0, Point3D::new(1000.0, 500.0, 0.0), 0.0)
///     .with_elements(vec![AlignmentElement::Line(Line {
///         start_station: 0.0,
///         end_station: 100.0,
///         length: 100.0,
///         direction: 0.0,
///     })]);
///
/// let geometry = ChainedGeometry::new(&alignment);
/// let p = geometry.locate(50.0, 0.0, 0.0).unwrap();
/// assert!((p.northing() - 1050.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct ChainedGeometry<'a> {
    segments: Vec<Segment>,
    profile: Option<&'a Profile>,
}

impl<'a> ChainedGeometry<'a> {
    pub fn new(alignment: &'a Alignment) -> Self {
        let mut cursor = Cursor {
            northing: alignment.start_point().northing(),
            easting: alignment.start_point().easting(),
            azimuth: alignment.start_azimuth(),
        };

        let mut segments = Vec::with_capacity(alignment.elements().len());
        for element in alignment.elements() {
            push_element(&mut segments, element, &mut cursor);
        }

        debug!(
            alignment = alignment.name(),
            segments = segments.len();
            "Chained alignment geometry"
        );

        Self {
            segments,
            profile: alignment.first_layout_profile(),
        }
    }

    /// Replaces the profile used for elevations.
    pub fn with_profile(mut self, profile: Option<&'a Profile>) -> Self {
        self.profile = profile;
        self
    }

    fn station_range(&self) -> Option<(f64, f64)> {
        let start = self
            .segments
            .iter()
            .map(|s| s.start_station)
            .reduce(f64::min)?;
        let end = self
            .segments
            .iter()
            .map(Segment::end_station)
            .reduce(f64::max)?;
        Some((start, end))
    }
}

fn push_element(segments: &mut Vec<Segment>, element: &AlignmentElement, cursor: &mut Cursor) {
    let segment = match element {
        AlignmentElement::Line(line) => Segment {
            start_station: line.start_station,
            length: line.length,
            northing: cursor.northing,
            easting: cursor.easting,
            azimuth: line.direction,
            curvature_start: 0.0,
            curvature_end: 0.0,
        },
        AlignmentElement::Arc(arc) => {
            let k = curvature(arc.radius) * arc.turn_direction().sign();
            Segment {
                start_station: arc.start_station,
                length: arc.length,
                northing: cursor.northing,
                easting: cursor.easting,
                azimuth: cursor.azimuth,
                curvature_start: k,
                curvature_end: k,
            }
        }
        AlignmentElement::Spiral(spiral) => {
            let sign = spiral.direction.sign();
            Segment {
                start_station: spiral.start_station,
                length: spiral.length,
                northing: cursor.northing,
                easting: cursor.easting,
                azimuth: cursor.azimuth,
                curvature_start: spiral.curvature_in() * sign,
                curvature_end: spiral.curvature_out() * sign,
            }
        }
        AlignmentElement::SpiralCurveSpiral(group) => {
            for part in group.parts() {
                push_element(segments, &part, cursor);
            }
            return;
        }
        // Carried straight ahead so later stations still resolve
        AlignmentElement::Unsupported(other) => Segment {
            start_station: other.start_station,
            length: other.end_station - other.start_station,
            northing: cursor.northing,
            easting: cursor.easting,
            azimuth: cursor.azimuth,
            curvature_start: 0.0,
            curvature_end: 0.0,
        },
    };

    let (northing, easting) = segment.position_at(segment.length);
    *cursor = Cursor {
        northing,
        easting,
        azimuth: segment.heading_at(segment.length),
    };
    segments.push(segment);
}

impl GeometryProvider for ChainedGeometry<'_> {
    fn locate(
        &self,
        station: f64,
        lateral_offset: f64,
        vertical_offset: f64,
    ) -> Result<Point3D, LocateError> {
        if !station.is_finite() || !lateral_offset.is_finite() || !vertical_offset.is_finite() {
            return Err(LocateError::NonFinite);
        }

        let (start, end) = self.station_range().ok_or(LocateError::Empty)?;
        let segment = self
            .segments
            .iter()
            .find(|s| s.contains(station))
            .ok_or(LocateError::OutOfRange {
                station,
                start,
                end,
            })?;

        let s = (station - segment.start_station).clamp(0.0, segment.length.max(0.0));
        let (northing, easting) = segment.position_at(s);
        let heading = segment.heading_at(s);

        // Left of travel is the azimuth rotated a quarter turn anticlockwise
        let northing = northing + lateral_offset * heading.sin();
        let easting = easting - lateral_offset * heading.cos();

        let base = self
            .profile
            .and_then(|p| p.elevation_at(station))
            .unwrap_or(0.0);

        trace!(station, northing, easting; "Located station");
        Ok(Point3D::new(northing, easting, base + vertical_offset))
    }
}
