//! GeoTable - Station-and-coordinate reports for roadway and rail alignments.
//!
//! Loading, element evaluation, and rendering of alignment geometry reports.
//! Horizontal reports cover lines, circular arcs and spirals; vertical
//! reports cover grade tangents and parabolic vertical curves. Every report
//! renders to tabular text, XML, or a paginated document from one shared
//! model.

pub mod config;
pub mod engine;
pub mod export;
pub mod model;

mod error;

pub use geotable_core::{alignment, format, geometry, profile, report};

pub use error::GeoTableError;
pub use export::Format;

use log::{debug, info, trace};

use config::AppConfig;
use export::{
    Exporter, document::DocumentExporter, text::TextExporter, xml::XmlExporter,
};
use geometry::{ChainedGeometry, GeometryProvider};
use model::ModelBuilder;
use report::{Report, ReportHeader, ReportKind};

/// Builder for loading alignments and rendering their reports.
///
/// This provides an API for processing alignment documents through parsing,
/// report building, and rendering stages.
///
/// # Examples
///
/// ```rust,no_run
/// use geotable::{Format, ReportBuilder, config::AppConfig};
///
/// let source = std::fs::read_to_string("demos/mainline.toml")
///     .expect("Failed to read");
///
/// // With custom config
/// let config = AppConfig::default();
/// let builder = ReportBuilder::new(config);
///
/// // Parse source to the alignment model
/// let project = builder.parse(&source)
///     .expect("Failed to parse");
///
/// // Build and render the horizontal report
/// let report = builder.horizontal_report(&project)
///     .expect("Failed to build");
/// let text = builder.render(&report, Format::Text)
///     .expect("Failed to render");
///
/// // Or use default config
/// let builder = ReportBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct ReportBuilder {
    config: AppConfig,
}

impl ReportBuilder {
    /// Create a new report builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including design constants
    ///   and document settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse an alignment interchange document into a project.
    ///
    /// Warnings are logged; they never fail the load.
    ///
    /// # Errors
    ///
    /// Returns [`GeoTableError::Parse`] carrying every diagnostic and the
    /// source text when the document is malformed or invalid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geotable::ReportBuilder;
    ///
    /// let source = r#"
    ///     project = "Demo"
    ///     [alignment]
    ///     name = "CL"
    /// "#;
    /// let project = ReportBuilder::default().parse(source)
    ///     .expect("Failed to parse document");
    /// assert_eq!(project.alignment().name(), "CL");
    /// ```
    pub fn parse(&self, source: &str) -> Result<alignment::Project, GeoTableError> {
        info!("Parsing alignment document");

        let project = geotable_parser::parse(source)
            .map_err(|err| GeoTableError::new_parse_error(err, source))?;

        debug!(
            alignment = project.alignment().name(),
            elements = project.alignment().elements().len();
            "Document parsed successfully"
        );
        trace!(project:?; "Parsed project");

        Ok(project)
    }

    /// Build the horizontal report, locating points by walking the chain.
    ///
    /// The chain is evaluated with [`ChainedGeometry`], with elevations from
    /// the first profile that has elements.
    ///
    /// # Errors
    ///
    /// Element failures never fail the report; this currently always
    /// succeeds and returns `Result` to match the other report stages.
    pub fn horizontal_report(
        &self,
        project: &alignment::Project,
    ) -> Result<Report, GeoTableError> {
        let geometry = ChainedGeometry::new(project.alignment());
        self.horizontal_report_with(project, &geometry)
    }

    /// Build the horizontal report against an external geometry provider.
    ///
    /// # Errors
    ///
    /// See [`ReportBuilder::horizontal_report`].
    pub fn horizontal_report_with<P>(
        &self,
        project: &alignment::Project,
        provider: &P,
    ) -> Result<Report, GeoTableError>
    where
        P: GeometryProvider + ?Sized,
    {
        let alignment = project.alignment();
        info!(alignment = alignment.name(); "Building horizontal report");

        let rows = ModelBuilder::new(self.config.report())
            .horizontal_rows(alignment.elements(), provider);

        info!(rows = rows.len(); "Horizontal report built");
        Ok(Report::new(
            ReportKind::Horizontal,
            ReportHeader::horizontal(project),
            rows,
        ))
    }

    /// Build the vertical report from the first profile that has elements.
    ///
    /// # Errors
    ///
    /// Returns [`GeoTableError::Report`] when the alignment has no profile
    /// with elements.
    pub fn vertical_report(&self, project: &alignment::Project) -> Result<Report, GeoTableError> {
        let alignment = project.alignment();
        info!(alignment = alignment.name(); "Building vertical report");

        let profile = alignment.first_layout_profile().ok_or_else(|| {
            GeoTableError::Report(format!(
                "no profile with elements found for alignment '{}'",
                alignment.name()
            ))
        })?;
        debug!(profile = profile.name(); "Selected profile");

        let rows = ModelBuilder::new(self.config.report()).vertical_rows(profile.elements());

        info!(rows = rows.len(); "Vertical report built");
        Ok(Report::new(
            ReportKind::Vertical,
            ReportHeader::vertical(project, profile),
            rows,
        ))
    }

    /// Render a built report in the requested format.
    ///
    /// # Errors
    ///
    /// Returns [`GeoTableError::Export`] if the encoder or the document
    /// backend fails.
    pub fn render(&self, report: &Report, format: Format) -> Result<Vec<u8>, GeoTableError> {
        info!(format:% = format; "Rendering report");

        let bytes = match format {
            Format::Text => TextExporter.export(report)?,
            Format::Xml => XmlExporter.export(report)?,
            Format::Document => {
                DocumentExporter::new(self.config.document().clone()).export(report)?
            }
        };

        debug!(bytes = bytes.len(); "Report rendered successfully");
        Ok(bytes)
    }
}
