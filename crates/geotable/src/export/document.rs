//! Paginated document encoding.
//!
//! The layout (which paragraphs, which tables, in which order) is decided
//! here once; a [`DocumentBackend`] only knows how to put paragraphs and
//! tables on pages. Two backends ship with the crate:
//!
//! - [`PagedTextBackend`] - fixed-width lines with form-feed page breaks,
//!   always available and deterministic.
//! - `PdfBackend` - PDF through `printpdf`, behind the `pdf` feature.
//!
//! Callers can bring their own backend through
//! [`DocumentExporter::render_with`].

mod paged_text;
#[cfg(feature = "pdf")]
mod pdf;

pub use paged_text::PagedTextBackend;
#[cfg(feature = "pdf")]
pub use pdf::PdfBackend;

use geotable_core::report::{Report, ReportRow};
use log::{debug, info};

use super::{Error, Exporter, column_titles, header_lines, metric_text, point_cells};
use crate::config::{DocumentBackendKind, DocumentConfig};

/// Indent of metric paragraphs, in points.
const METRIC_INDENT: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    /// The "label" style used for element headings.
    Bold,
}

/// Font and placement of a paragraph or table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub weight: FontWeight,
    /// Font size in points.
    pub size: f32,
    /// Left indent in points.
    pub indent: f32,
}

impl TextStyle {
    pub fn regular(size: f32) -> Self {
        Self {
            weight: FontWeight::Regular,
            size,
            indent: 0.0,
        }
    }

    pub fn bold(size: f32) -> Self {
        Self {
            weight: FontWeight::Bold,
            ..Self::regular(size)
        }
    }

    pub fn indented(mut self, indent: f32) -> Self {
        self.indent = indent;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAlign {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    /// Share of the usable line width, in percent.
    pub width_percent: f32,
    pub align: CellAlign,
}

/// A small table of text cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub style: TextStyle,
}

/// Page-flow primitives a document encoding needs.
///
/// Backends own pagination and font selection. They must print cell and
/// paragraph text unchanged.
pub trait DocumentBackend {
    fn paragraph(&mut self, text: &str, style: &TextStyle) -> Result<(), Error>;

    fn table(&mut self, table: &Table) -> Result<(), Error>;

    /// Vertical space in points.
    fn spacer(&mut self, points: f32) -> Result<(), Error>;

    /// Completes the document and returns its bytes.
    fn finish(self: Box<Self>) -> Result<Vec<u8>, Error>;
}

/// Lays a report out as a paginated document.
#[derive(Debug, Clone, Default)]
pub struct DocumentExporter {
    config: DocumentConfig,
}

impl DocumentExporter {
    pub fn new(config: DocumentConfig) -> Self {
        Self { config }
    }

    /// Renders through a caller-supplied backend.
    ///
    /// # Errors
    ///
    /// Returns whatever the backend reports.
    pub fn render_with(
        &self,
        report: &Report,
        mut backend: Box<dyn DocumentBackend>,
    ) -> Result<Vec<u8>, Error> {
        let body = TextStyle::regular(self.config.body_size());
        let heading = TextStyle::bold(self.config.heading_size());

        let mut header = header_lines(report.header()).into_iter();
        if let Some(project) = header.next() {
            backend.paragraph(&project, &TextStyle::bold(self.config.title_size()))?;
        }
        for line in header {
            backend.paragraph(line.trim_start(), &body)?;
        }
        backend.spacer(self.config.body_size())?;

        let titles = column_titles(report.kind());
        let columns = columns_for(titles.len());
        let mut title_row = vec![String::new()];
        title_row.extend(titles.iter().map(|title| title.to_string()));
        backend.table(&Table {
            columns: columns.clone(),
            rows: vec![title_row],
            style: heading,
        })?;
        backend.spacer(self.config.body_size())?;

        for row in report.rows() {
            self.render_row(backend.as_mut(), row, &columns)?;
        }

        let bytes = backend.finish()?;
        debug!(rows = report.rows().len(), bytes = bytes.len(); "Rendered document report");
        Ok(bytes)
    }

    fn render_row(
        &self,
        backend: &mut dyn DocumentBackend,
        row: &ReportRow,
        columns: &[Column],
    ) -> Result<(), Error> {
        let body = TextStyle::regular(self.config.body_size());
        let metric_style = body.indented(METRIC_INDENT);

        backend.paragraph(
            &format!("Element: {}", row.kind().heading()),
            &TextStyle::bold(self.config.heading_size()),
        )?;

        if let Some(message) = row.message() {
            backend.paragraph(message, &metric_style)?;
        } else {
            for point in row.points() {
                backend.table(&Table {
                    columns: columns.to_vec(),
                    rows: vec![point_cells(point)],
                    style: body,
                })?;
            }
            for (_, metric) in row.metrics() {
                backend.paragraph(&metric_text(metric), &metric_style)?;
            }
        }

        backend.spacer(self.config.body_size())
    }
}

impl Exporter for DocumentExporter {
    fn export(&self, report: &Report) -> Result<Vec<u8>, Error> {
        let backend = create_backend(&self.config, report.header().project_name())?;
        self.render_with(report, backend)
    }
}

/// A label column followed by equal value columns.
fn columns_for(value_columns: usize) -> Vec<Column> {
    let label = Column {
        width_percent: 16.0,
        align: CellAlign::Left,
    };
    let share = (100.0 - label.width_percent) / value_columns.max(1) as f32;
    std::iter::once(label)
        .chain((0..value_columns).map(|_| Column {
            width_percent: share,
            align: CellAlign::Right,
        }))
        .collect()
}

/// Instantiates the configured backend.
///
/// # Errors
///
/// Returns [`Error::Backend`] when PDF output is requested from a build
/// without the `pdf` feature, or when the PDF backend fails to start.
pub fn create_backend(
    config: &DocumentConfig,
    title: &str,
) -> Result<Box<dyn DocumentBackend>, Error> {
    info!(backend:? = config.backend(); "Creating document backend");
    match config.backend() {
        DocumentBackendKind::PagedText => Ok(Box::new(PagedTextBackend::new(config))),
        #[cfg(feature = "pdf")]
        DocumentBackendKind::Pdf => Ok(Box::new(PdfBackend::new(title, config)?)),
        #[cfg(not(feature = "pdf"))]
        DocumentBackendKind::Pdf => {
            let _ = title;
            Err(Error::Backend(
                "PDF output requires the `pdf` feature".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use geotable_core::{
        alignment::{Alignment, Project},
        geometry::Point3D,
        report::{LabeledPoint, MetricValue, ReportHeader, ReportKind, RowKind},
    };

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Paragraph(String, FontWeight),
        Table(Vec<Vec<String>>),
        Spacer,
    }

    /// Records layout calls instead of drawing them.
    struct Recorder(Rc<RefCell<Vec<Call>>>);

    impl DocumentBackend for Recorder {
        fn paragraph(&mut self, text: &str, style: &TextStyle) -> Result<(), Error> {
            self.0
                .borrow_mut()
                .push(Call::Paragraph(text.to_string(), style.weight));
            Ok(())
        }

        fn table(&mut self, table: &Table) -> Result<(), Error> {
            self.0.borrow_mut().push(Call::Table(table.rows.clone()));
            Ok(())
        }

        fn spacer(&mut self, _: f32) -> Result<(), Error> {
            self.0.borrow_mut().push(Call::Spacer);
            Ok(())
        }

        fn finish(self: Box<Self>) -> Result<Vec<u8>, Error> {
            Ok(Vec::new())
        }
    }

    fn report() -> Report {
        let project = Project::new("Demo", Alignment::new("CL"));
        let row = ReportRow::new(RowKind::Line)
            .with_point(LabeledPoint::plan("POT", 0.0, Point3D::new(1.0, 2.0, 0.0)))
            .with_metric("Length", "Tangent Length", MetricValue::number(100.0, 4));
        Report::new(ReportKind::Horizontal, ReportHeader::horizontal(&project), vec![row])
    }

    #[test]
    fn test_layout_sequence() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        DocumentExporter::default()
            .render_with(&report(), Box::new(Recorder(calls.clone())))
            .unwrap();

        let calls = calls.borrow();
        assert_eq!(
            calls[0],
            Call::Paragraph("Project Name: Demo".to_string(), FontWeight::Bold)
        );
        assert_eq!(
            calls[1],
            Call::Paragraph("Description: ".to_string(), FontWeight::Regular)
        );

        let heading = calls
            .iter()
            .position(|call| {
                *call == Call::Paragraph("Element: Linear".to_string(), FontWeight::Bold)
            })
            .unwrap();
        assert_eq!(
            calls[heading + 1],
            Call::Table(vec![vec![
                "POT".to_string(),
                "0+00.00".to_string(),
                "1.0000".to_string(),
                "2.0000".to_string(),
            ]])
        );
        assert_eq!(
            calls[heading + 2],
            Call::Paragraph(
                "Tangent Length:        100.0000".to_string(),
                FontWeight::Regular
            )
        );
        assert_eq!(calls[heading + 3], Call::Spacer);
    }

    #[test]
    fn test_columns_fill_the_line() {
        for count in [2, 3] {
            let total: f32 = columns_for(count).iter().map(|c| c.width_percent).sum();
            assert!((total - 100.0).abs() < 1e-3);
        }
    }

    #[cfg(not(feature = "pdf"))]
    #[test]
    fn test_pdf_without_feature_is_backend_error() {
        let config = DocumentConfig::default().with_backend(DocumentBackendKind::Pdf);

        let err = DocumentExporter::new(config).export(&report()).unwrap_err();

        assert!(matches!(err, Error::Backend(_)));
    }
}
