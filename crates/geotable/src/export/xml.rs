//! Full-precision XML encoding for machine consumption.
//!
//! Numbers are written in their shortest round-trip form, never the rounded
//! display form, and nothing in the output depends on time or environment:
//! the same report always encodes to the same bytes.

use std::fmt::Display;

use geotable_core::report::{
    NamedObject, Position, Report, ReportKind, ReportRow, RowKind,
};
use log::debug;
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use super::{Error, Exporter};

/// Encodes a report as an indented XML document.
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlExporter;

impl Exporter for XmlExporter {
    fn export(&self, report: &Report) -> Result<Vec<u8>, Error> {
        let mut writer = XmlWriter::new();

        writer.declaration()?;
        let kind = match report.kind() {
            ReportKind::Horizontal => "Horizontal",
            ReportKind::Vertical => "Vertical",
        };
        writer.start(BytesStart::new("GeoTableReport").with_attributes([("Type", kind)]))?;

        let header = report.header();
        writer.open("Project")?;
        writer.field("Name", header.project_name())?;
        writer.field("Description", header.project_description())?;
        writer.close("Project")?;

        writer.named_object("HorizontalAlignment", header.alignment())?;
        if let Some(profile) = header.profile() {
            writer.named_object("VerticalAlignment", profile)?;
        }

        writer.open("Elements")?;
        for (index, row) in report.rows().iter().enumerate() {
            writer.row(index, row)?;
        }
        writer.close("Elements")?;
        writer.close("GeoTableReport")?;

        let bytes = writer.finish();
        debug!(rows = report.rows().len(), bytes = bytes.len(); "Rendered XML report");
        Ok(bytes)
    }
}

fn xml_error(err: impl Display) -> Error {
    Error::Xml(err.to_string())
}

/// Thin event helper over [`quick_xml::Writer`].
struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn declaration(&mut self) -> Result<(), Error> {
        self.inner
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(xml_error)
    }

    fn start(&mut self, start: BytesStart<'_>) -> Result<(), Error> {
        self.inner
            .write_event(Event::Start(start))
            .map_err(xml_error)
    }

    fn open(&mut self, name: &str) -> Result<(), Error> {
        self.start(BytesStart::new(name))
    }

    fn close(&mut self, name: &str) -> Result<(), Error> {
        self.inner
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_error)
    }

    /// `<name>text</name>`, with the text escaped.
    fn field(&mut self, name: &str, text: &str) -> Result<(), Error> {
        self.open(name)?;
        self.inner
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_error)?;
        self.close(name)
    }

    fn number(&mut self, name: &str, value: f64) -> Result<(), Error> {
        self.field(name, &value.to_string())
    }

    fn named_object(&mut self, name: &str, object: &NamedObject) -> Result<(), Error> {
        self.open(name)?;
        self.field("Name", object.name())?;
        self.field("Description", object.description())?;
        self.field("Style", object.style())?;
        self.close(name)
    }

    fn row(&mut self, index: usize, row: &ReportRow) -> Result<(), Error> {
        let tag = row.kind().tag();
        let index = index.to_string();
        let mut start = BytesStart::new(tag).with_attributes([("index", index.as_str())]);
        if let RowKind::Unsupported(type_name) = row.kind() {
            start.push_attribute(("type", type_name.as_str()));
        }
        self.start(start)?;

        for point in row.points() {
            self.start(BytesStart::new("Point").with_attributes([("label", point.label())]))?;
            if let Some(station) = point.station() {
                self.number("Station", station)?;
            }
            match point.position() {
                Position::Plan(plan) => {
                    self.number("Northing", plan.northing())?;
                    self.number("Easting", plan.easting())?;
                    self.number("Elevation", plan.elevation())?;
                }
                Position::Profile { elevation } => self.number("Elevation", elevation)?,
            }
            self.close("Point")?;
        }

        for (key, metric) in row.metrics() {
            self.field(key, &metric.value().raw())?;
        }

        if let Some(message) = row.message() {
            self.field("Message", message)?;
        }

        self.close(tag)
    }

    fn finish(self) -> Vec<u8> {
        let mut bytes = self.inner.into_inner();
        bytes.push(b'\n');
        bytes
    }
}
