//! Configuration types for GeoTable reports.
//!
//! All types implement [`serde::Deserialize`] and every field has a
//! default, so a partial (or empty) TOML file is a valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining report and document settings.
//! - [`ReportConfig`] - Design constants shown in report rows and row ordering.
//! - [`DocumentConfig`] - Page geometry and fonts for the paginated document.
//!
//! # Example
//!
//! ```
//! # use geotable::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.report().design_speed_mph(), 50.0);
//! ```
//!
//! ```toml
//! [report]
//! design_speed_mph = 60.0
//! sort_by_station = true
//!
//! [document]
//! backend = "paged-text"
//! lines_per_page = 66
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    report: ReportConfig,

    #[serde(default)]
    document: DocumentConfig,
}

impl AppConfig {
    pub fn new(report: ReportConfig, document: DocumentConfig) -> Self {
        Self { report, document }
    }

    pub fn report(&self) -> &ReportConfig {
        &self.report
    }

    pub fn document(&self) -> &DocumentConfig {
        &self.document
    }
}

/// Design constants printed with each element and row ordering.
///
/// The constants are not derived from the geometry; they are carried into
/// the report as given.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    design_speed_mph: f64,
    cant_inches: f64,
    stopping_sight_distance: f64,
    headlight_sight_distance: f64,
    /// Grade change, in percent, above which stopping sight distance is
    /// reported instead of headlight sight distance.
    sight_distance_grade_threshold: f64,
    sort_by_station: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            design_speed_mph: 50.0,
            cant_inches: 2.0,
            stopping_sight_distance: 571.52,
            headlight_sight_distance: 540.41,
            sight_distance_grade_threshold: 1.0,
            sort_by_station: false,
        }
    }
}

impl ReportConfig {
    pub fn design_speed_mph(&self) -> f64 {
        self.design_speed_mph
    }

    pub fn cant_inches(&self) -> f64 {
        self.cant_inches
    }

    pub fn stopping_sight_distance(&self) -> f64 {
        self.stopping_sight_distance
    }

    pub fn headlight_sight_distance(&self) -> f64 {
        self.headlight_sight_distance
    }

    pub fn sight_distance_grade_threshold(&self) -> f64 {
        self.sight_distance_grade_threshold
    }

    pub fn sort_by_station(&self) -> bool {
        self.sort_by_station
    }

    /// Sets whether elements are ordered by start station before building.
    pub fn with_sort_by_station(mut self, sort: bool) -> Self {
        self.sort_by_station = sort;
        self
    }
}

/// Which backend renders [`Format::Document`](crate::Format::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentBackendKind {
    /// Fixed-width pages separated by form feeds.
    PagedText,
    /// PDF, when built with the `pdf` feature.
    Pdf,
}

impl Default for DocumentBackendKind {
    fn default() -> Self {
        if cfg!(feature = "pdf") {
            Self::Pdf
        } else {
            Self::PagedText
        }
    }
}

/// Page geometry and typography of the paginated document.
///
/// Lengths are in points (1/72 inch).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    backend: DocumentBackendKind,
    page_width: f32,
    page_height: f32,
    margin: f32,
    title_size: f32,
    heading_size: f32,
    body_size: f32,
    /// Page length of the paged-text backend.
    lines_per_page: usize,
    /// Line width of the paged-text backend, in characters.
    line_width: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            backend: DocumentBackendKind::default(),
            page_width: 595.0,
            page_height: 842.0,
            margin: 50.0,
            title_size: 11.0,
            heading_size: 10.0,
            body_size: 9.0,
            lines_per_page: 60,
            line_width: 80,
        }
    }
}

impl DocumentConfig {
    pub fn backend(&self) -> DocumentBackendKind {
        self.backend
    }

    pub fn with_backend(mut self, backend: DocumentBackendKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn title_size(&self) -> f32 {
        self.title_size
    }

    pub fn heading_size(&self) -> f32 {
        self.heading_size
    }

    pub fn body_size(&self) -> f32 {
        self.body_size
    }

    /// At least one line per page.
    pub fn lines_per_page(&self) -> usize {
        self.lines_per_page.max(1)
    }

    pub fn line_width(&self) -> usize {
        self.line_width.max(20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_report_section_keeps_defaults() {
        let config: AppConfig = toml::from_str("[report]\ndesign_speed_mph = 60.0").unwrap();

        assert_eq!(config.report().design_speed_mph(), 60.0);
        assert_eq!(config.report().cant_inches(), 2.0);
        assert_eq!(config.document(), &DocumentConfig::default());
    }

    #[test]
    fn test_document_backend_names() {
        let config: AppConfig = toml::from_str("[document]\nbackend = \"paged-text\"").unwrap();
        assert_eq!(config.document().backend(), DocumentBackendKind::PagedText);
    }

    #[test]
    fn test_lines_per_page_never_zero() {
        let config: AppConfig = toml::from_str("[document]\nlines_per_page = 0").unwrap();
        assert_eq!(config.document().lines_per_page(), 1);
    }
}
