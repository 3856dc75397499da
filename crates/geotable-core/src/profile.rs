//! Vertical profile model.
//!
//! Grades are stored as ratios (`0.02` is a 2% grade); reports show them
//! in percent.

/// A constant-grade segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Tangent {
    pub start_station: f64,
    pub end_station: f64,
    pub start_elevation: f64,
    pub end_elevation: f64,
    pub grade: f64,
    pub length: f64,
}

impl Tangent {
    /// Builds a tangent from its end points, deriving grade and length.
    pub fn between(
        start_station: f64,
        start_elevation: f64,
        end_station: f64,
        end_elevation: f64,
    ) -> Self {
        let length = end_station - start_station;
        let grade = if length != 0.0 {
            (end_elevation - start_elevation) / length
        } else {
            0.0
        };

        Self {
            start_station,
            end_station,
            start_elevation,
            end_elevation,
            grade,
            length,
        }
    }

    pub fn elevation_at(&self, station: f64) -> f64 {
        self.start_elevation + self.grade * (station - self.start_station)
    }
}

/// A symmetric parabolic vertical curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Parabola {
    pub start_station: f64,
    pub end_station: f64,
    pub pvi_station: f64,
    pub pvi_elevation: f64,
    pub length: f64,
    pub grade_in: f64,
    pub grade_out: f64,
    /// Elevation at the PVT as recorded by the source. `0.0` when unknown.
    pub end_elevation: f64,
}

impl Parabola {
    /// Builds a curve centred on its PVI. The PVT elevation is derived.
    pub fn symmetric(
        pvi_station: f64,
        pvi_elevation: f64,
        length: f64,
        grade_in: f64,
        grade_out: f64,
    ) -> Self {
        let half = length / 2.0;
        Self {
            start_station: pvi_station - half,
            end_station: pvi_station + half,
            pvi_station,
            pvi_elevation,
            length,
            grade_in,
            grade_out,
            end_elevation: pvi_elevation + grade_out * half,
        }
    }

    /// Elevation at the PVC, projected back from the PVI.
    pub fn start_elevation(&self) -> f64 {
        self.pvi_elevation - self.grade_in * self.length / 2.0
    }

    pub fn elevation_at(&self, station: f64) -> f64 {
        let x = station - self.start_station;
        let curvature = if self.length != 0.0 {
            (self.grade_out - self.grade_in) / (2.0 * self.length)
        } else {
            0.0
        };
        self.start_elevation() + self.grade_in * x + curvature * x * x
    }
}

/// A profile element type with no report layout.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedProfileElement {
    pub type_name: String,
    pub start_station: f64,
    pub end_station: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileElement {
    Tangent(Tangent),
    Parabola(Parabola),
    Unsupported(UnsupportedProfileElement),
}

impl ProfileElement {
    pub fn start_station(&self) -> f64 {
        match self {
            Self::Tangent(t) => t.start_station,
            Self::Parabola(p) => p.start_station,
            Self::Unsupported(u) => u.start_station,
        }
    }

    pub fn end_station(&self) -> f64 {
        match self {
            Self::Tangent(t) => t.end_station,
            Self::Parabola(p) => p.end_station,
            Self::Unsupported(u) => u.end_station,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Self::Tangent(_) => "Tangent",
            Self::Parabola(_) => "Parabola",
            Self::Unsupported(u) => &u.type_name,
        }
    }

    /// Elevation inside this element, or `None` for unsupported elements.
    pub fn elevation_at(&self, station: f64) -> Option<f64> {
        match self {
            Self::Tangent(t) => Some(t.elevation_at(station)),
            Self::Parabola(p) => Some(p.elevation_at(station)),
            Self::Unsupported(_) => None,
        }
    }
}

/// A named vertical profile attached to an alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    name: String,
    description: Option<String>,
    style: Option<String>,
    elements: Vec<ProfileElement>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            style: None,
            elements: Vec::new(),
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

    pub fn with_elements(mut self, elements: Vec<ProfileElement>) -> Self {
        self.elements = elements;
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

    pub fn elements(&self) -> &[ProfileElement] {
        &self.elements
    }

    /// Elevation at `station`, taken from the first element covering it.
    pub fn elevation_at(&self, station: f64) -> Option<f64> {
        const TOLERANCE: f64 = 1e-6;

        self.elements
            .iter()
            .find(|e| {
                station >= e.start_station() - TOLERANCE && station <= e.end_station() + TOLERANCE
            })
            .and_then(|e| e.elevation_at(station))
    }
}
