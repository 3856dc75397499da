//! Plan-space points and the geometry provider seam.
//!
//! # Overview
//!
//! - [`Point3D`] - A surveyed position (northing, easting, elevation)
//! - [`GeometryProvider`] - Resolves a station and offsets to a [`Point3D`]
//! - [`ChainedGeometry`] - A provider that walks an alignment's elements
//! - [`LocateError`] - Why a station could not be resolved
//!
//! # Coordinate System
//!
//! Reports use grid coordinates:
//!
//! ```text
//!   +N (northing)
//!     ▲
//!     │   azimuth measured
//!     │   clockwise from north
//!     │
//!     └────────► +E (easting)
//! ```
//!
//! A positive lateral offset is measured to the left of the direction of
//! travel; a negative offset lies to the right.

mod chained;

pub use chained::ChainedGeometry;

use thiserror::Error;

/// A position in plan with an elevation.
///
/// # Examples
///
/// ```
/// # use geotable_core::geometry::Point3D;
/// let p = Point3D::new(5000.0, 1000.0, 120.5);
/// assert_eq!(p.northing(), 5000.0);
/// assert_eq!(p.with_elevation(0.0).elevation(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point3D {
    northing: f64,
    easting: f64,
    elevation: f64,
}

impl Point3D {
    /// Creates a new point from grid coordinates.
    pub fn new(northing: f64, easting: f64, elevation: f64) -> Self {
        Self {
            northing,
            easting,
            elevation,
        }
    }

    /// Returns the northing (Y) coordinate
    pub fn northing(self) -> f64 {
        self.northing
    }

    /// Returns the easting (X) coordinate
    pub fn easting(self) -> f64 {
        self.easting
    }

    /// Returns the elevation (Z) coordinate
    pub fn elevation(self) -> f64 {
        self.elevation
    }

    /// Creates a new point with the specified elevation
    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = elevation;
        self
    }

    /// Horizontal distance to `other`, ignoring elevation.
    pub fn plan_distance(self, other: Point3D) -> f64 {
        (self.northing - other.northing).hypot(self.easting - other.easting)
    }
}

/// Why a provider could not resolve a station.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocateError {
    #[error("station {station} is outside the alignment range {start}..{end}")]
    OutOfRange { station: f64, start: f64, end: f64 },

    #[error("station or offset is not a finite number")]
    NonFinite,

    #[error("alignment has no elements to evaluate")]
    Empty,

    /// Failure reported by an external geometry source.
    #[error("{0}")]
    Provider(String),
}

/// Resolves stations along an alignment to plan positions.
///
/// Implementations are queried once per labeled point while a report is
/// built. A failing call never aborts the report: the affected element
/// becomes a row carrying the error message instead.
pub trait GeometryProvider {
    /// Returns the position at `station`, shifted `lateral_offset` to the
    /// left of the direction of travel and `vertical_offset` above the
    /// alignment's elevation at that station.
    fn locate(
        &self,
        station: f64,
        lateral_offset: f64,
        vertical_offset: f64,
    ) -> Result<Point3D, LocateError>;
}

impl<T: GeometryProvider + ?Sized> GeometryProvider for &T {
    fn locate(
        &self,
        station: f64,
        lateral_offset: f64,
        vertical_offset: f64,
    ) -> Result<Point3D, LocateError> {
        (**self).locate(station, lateral_offset, vertical_offset)
    }
}
