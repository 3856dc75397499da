//! Raw document tables as deserialized from TOML.
//!
//! These mirror the file layout one-to-one and keep source spans on every
//! value that elaboration may need to point at. Nothing here is validated;
//! see [`crate::elaborate`] for derivation and checks.
//!
//! ```toml
//! project = "Demo"
//!
//! [alignment]
//! name = "Mainline"
//! start_station = 1000.0
//! azimuth = 45.0
//!
//! [[alignment.elements]]
//! type = "line"
//! length = 250.0
//!
//! [[profiles]]
//! name = "Layout"
//!
//! [[profiles.elements]]
//! type = "parabola"
//! pvi_station = 1400.0
//! pvi_elevation = 112.0
//! length = 200.0
//! grade_in = 1.5
//! grade_out = -0.8
//! ```

use serde::Deserialize;
use toml::Spanned;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Document {
    pub project: Spanned<String>,
    pub description: Option<String>,
    pub alignment: Spanned<AlignmentTable>,
    #[serde(default)]
    pub profiles: Vec<Spanned<ProfileTable>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct AlignmentTable {
    pub name: String,
    pub description: Option<String>,
    pub style: Option<String>,
    #[serde(default)]
    pub start_station: f64,
    #[serde(default)]
    pub northing: f64,
    #[serde(default)]
    pub easting: f64,
    /// Degrees clockwise from north.
    #[serde(default)]
    pub azimuth: f64,
    #[serde(default)]
    pub elements: Vec<Spanned<ElementTable>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProfileTable {
    pub name: String,
    pub description: Option<String>,
    pub style: Option<String>,
    #[serde(default)]
    pub elements: Vec<Spanned<ElementTable>>,
}

/// Union of every element schema; which fields matter depends on `type`.
///
/// Unknown fields are tolerated so unsupported element types can carry
/// whatever their source exported.
#[derive(Debug, Deserialize)]
pub(crate) struct ElementTable {
    #[serde(rename = "type")]
    pub kind: Option<Spanned<String>>,

    pub start_station: Option<Spanned<f64>>,
    pub end_station: Option<Spanned<f64>>,
    pub length: Option<Spanned<f64>>,

    // Horizontal
    /// Line azimuth in degrees.
    pub direction: Option<Spanned<f64>>,
    pub radius: Option<Spanned<f64>>,
    /// Arc central angle in degrees.
    pub delta: Option<Spanned<f64>>,
    pub turn: Option<Spanned<String>>,
    pub clockwise: Option<bool>,
    pub center_northing: Option<f64>,
    pub center_easting: Option<f64>,
    pub radius_in: Option<Spanned<f64>>,
    pub radius_out: Option<Spanned<f64>>,
    pub a: Option<f64>,
    pub definition: Option<Spanned<String>>,
    pub spiral_in: Option<Box<Spanned<ElementTable>>>,
    pub arc: Option<Box<Spanned<ElementTable>>>,
    pub spiral_out: Option<Box<Spanned<ElementTable>>>,

    // Vertical
    pub start_elevation: Option<Spanned<f64>>,
    pub end_elevation: Option<Spanned<f64>>,
    /// Percent.
    pub grade: Option<Spanned<f64>>,
    pub pvi_station: Option<Spanned<f64>>,
    pub pvi_elevation: Option<Spanned<f64>>,
    /// Percent.
    pub grade_in: Option<Spanned<f64>>,
    /// Percent.
    pub grade_out: Option<Spanned<f64>>,
}
