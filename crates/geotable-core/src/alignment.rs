//! Horizontal alignment model.
//!
//! An [`Alignment`] is an ordered chain of [`AlignmentElement`]s. Stations
//! increase along the chain; each element covers `start_station..end_station`.
//! Angles are in radians unless a field says otherwise. Directions are
//! azimuths measured clockwise from north.

use std::fmt;

use crate::{geometry::Point3D, profile::Profile};

/// Which way a curve turns when travelling up-station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    /// Turning right increases the azimuth.
    pub fn from_clockwise(clockwise: bool) -> Self {
        if clockwise { Self::Right } else { Self::Left }
    }

    /// `1.0` for right turns, `-1.0` for left turns.
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

impl fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
        }
    }
}

/// Transition curve family.
///
/// Informational only; geometry treats every spiral as having curvature
/// that varies linearly with length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpiralDefinition {
    #[default]
    Clothoid,
    CubicParabola,
}

impl fmt::Display for SpiralDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clothoid => write!(f, "Clothoid"),
            Self::CubicParabola => write!(f, "CubicParabola"),
        }
    }
}

/// A straight tangent.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub start_station: f64,
    pub end_station: f64,
    pub length: f64,
    /// Azimuth in radians.
    pub direction: f64,
}

/// A circular curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub start_station: f64,
    pub end_station: f64,
    pub length: f64,
    pub radius: f64,
    /// Central angle in radians. The sign is not significant; see `clockwise`.
    pub delta: f64,
    pub clockwise: bool,
    /// Radius point, when the source already knows it.
    pub center_point: Option<Point3D>,
}

impl Arc {
    pub fn turn_direction(&self) -> TurnDirection {
        TurnDirection::from_clockwise(self.clockwise)
    }
}

/// A transition spiral between a tangent and a curve, or two curves.
///
/// A radius of `0.0` (or any non-finite value) stands for an infinite
/// radius, i.e. the tangent end of the spiral.
#[derive(Debug, Clone, PartialEq)]
pub struct Spiral {
    pub start_station: f64,
    pub end_station: f64,
    pub length: f64,
    pub radius_in: f64,
    pub radius_out: f64,
    /// Clothoid parameter `A = sqrt(R·L)`, when supplied.
    pub a: Option<f64>,
    pub definition: SpiralDefinition,
    pub direction: TurnDirection,
}

impl Spiral {
    /// True when the spiral runs from the tangent into the curve.
    ///
    /// Curvatures are compared, so a zero radius counts as the straight end.
    /// Curvature growing along the spiral marks an entry spiral.
    pub fn is_entry(&self) -> bool {
        self.curvature_in() < self.curvature_out()
    }

    /// Curvature (1/R) at the start; zero for the tangent end.
    pub fn curvature_in(&self) -> f64 {
        curvature(self.radius_in)
    }

    /// Curvature (1/R) at the end; zero for the tangent end.
    pub fn curvature_out(&self) -> f64 {
        curvature(self.radius_out)
    }

    /// Total change of direction over the spiral, in radians.
    ///
    /// For a simple spiral this is `L / (2R)`.
    pub fn deflection(&self) -> f64 {
        self.length * (self.curvature_in() + self.curvature_out()) / 2.0
    }
}

/// Zero curvature for infinite, zero, or negative radii.
pub(crate) fn curvature(radius: f64) -> f64 {
    if radius > 0.0 && radius.is_finite() {
        1.0 / radius
    } else {
        0.0
    }
}

/// Spiral-curve-spiral group. Any part may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralCurveSpiral {
    pub spiral_in: Option<Spiral>,
    pub arc: Option<Arc>,
    pub spiral_out: Option<Spiral>,
}

impl SpiralCurveSpiral {
    /// Constituent elements in chain order.
    pub fn parts(&self) -> Vec<AlignmentElement> {
        let mut parts = Vec::with_capacity(3);
        if let Some(spiral) = &self.spiral_in {
            parts.push(AlignmentElement::Spiral(spiral.clone()));
        }
        if let Some(arc) = &self.arc {
            parts.push(AlignmentElement::Arc(arc.clone()));
        }
        if let Some(spiral) = &self.spiral_out {
            parts.push(AlignmentElement::Spiral(spiral.clone()));
        }
        parts
    }
}

/// An element type with no report layout.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedElement {
    pub type_name: String,
    pub start_station: f64,
    pub end_station: f64,
}

/// One entry of the horizontal chain.
#[derive(Debug, Clone, PartialEq)]
pub enum AlignmentElement {
    Line(Line),
    Arc(Arc),
    Spiral(Spiral),
    SpiralCurveSpiral(SpiralCurveSpiral),
    Unsupported(UnsupportedElement),
}

/// Discriminant of an [`AlignmentElement`], used for neighbour lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Line,
    Arc,
    Spiral,
    SpiralCurveSpiral,
    Unsupported,
}

impl AlignmentElement {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Line(_) => ElementType::Line,
            Self::Arc(_) => ElementType::Arc,
            Self::Spiral(_) => ElementType::Spiral,
            Self::SpiralCurveSpiral(_) => ElementType::SpiralCurveSpiral,
            Self::Unsupported(_) => ElementType::Unsupported,
        }
    }

    pub fn start_station(&self) -> f64 {
        match self {
            Self::Line(line) => line.start_station,
            Self::Arc(arc) => arc.start_station,
            Self::Spiral(spiral) => spiral.start_station,
            Self::SpiralCurveSpiral(group) => group
                .parts()
                .first()
                .map_or(f64::NAN, AlignmentElement::start_station),
            Self::Unsupported(other) => other.start_station,
        }
    }

    pub fn end_station(&self) -> f64 {
        match self {
            Self::Line(line) => line.end_station,
            Self::Arc(arc) => arc.end_station,
            Self::Spiral(spiral) => spiral.end_station,
            Self::SpiralCurveSpiral(group) => group
                .parts()
                .last()
                .map_or(f64::NAN, AlignmentElement::end_station),
            Self::Unsupported(other) => other.end_station,
        }
    }

    /// Name used when reporting the element.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Line(_) => "Line",
            Self::Arc(_) => "Arc",
            Self::Spiral(_) => "Spiral",
            Self::SpiralCurveSpiral(_) => "SpiralCurveSpiral",
            Self::Unsupported(other) => &other.type_name,
        }
    }
}

/// A named horizontal alignment with its vertical profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    name: String,
    description: Option<String>,
    style: Option<String>,
    start_station: f64,
    start_point: Point3D,
    start_azimuth: f64,
    elements: Vec<AlignmentElement>,
    profiles: Vec<Profile>,
}

impl Alignment {
    /// Creates an empty alignment starting at station zero at the origin,
    /// heading north.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            style: None,
            start_station: 0.0,
            start_point: Point3D::default(),
            start_azimuth: 0.0,
            elements: Vec::new(),
            profiles: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Sets where the chain begins: station, plan position, and azimuth.
    pub fn with_start(mut self, station: f64, point: Point3D, azimuth: f64) -> Self {
        self.start_station = station;
        self.start_point = point;
        self.start_azimuth = azimuth;
        self
    }

    pub fn with_elements(mut self, elements: Vec<AlignmentElement>) -> Self {
        self.elements = elements;
        self
    }

    pub fn with_profiles(mut self, profiles: Vec<Profile>) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn start_station(&self) -> f64 {
        self.start_station
    }

    pub fn start_point(&self) -> Point3D {
        self.start_point
    }

    pub fn start_azimuth(&self) -> f64 {
        self.start_azimuth
    }

    pub fn elements(&self) -> &[AlignmentElement] {
        &self.elements
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// First profile that has at least one element.
    pub fn first_layout_profile(&self) -> Option<&Profile> {
        self.profiles.iter().find(|p| !p.elements().is_empty())
    }
}

/// A project: a name plus one alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    name: String,
    description: Option<String>,
    alignment: Alignment,
}

impl Project {
    pub fn new(name: impl Into<String>, alignment: Alignment) -> Self {
        Self {
            name: name.into(),
            description: None,
            alignment,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn alignment(&self) -> &Alignment {
        &self.alignment
    }
}
