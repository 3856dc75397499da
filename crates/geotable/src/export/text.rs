//! Fixed-width tabular text encoding.

use std::fmt::Write as _;

use geotable_core::report::{Report, ReportKind, ReportRow};
use log::debug;

use super::{Error, Exporter, column_titles, header_lines, metric_text, point_cells};

/// Renders a report as plain text with right-aligned columns.
///
/// ```text
/// Element: Linear
///  POT ( )        10+00.00       5000.0000       2000.0000
///  PC  ( )        12+50.00       5000.0000       2250.0000
///  Tangent Direction: S 90^00'00.0000" E
///  Tangent Length:        250.0000
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TextExporter;

impl Exporter for TextExporter {
    fn export(&self, report: &Report) -> Result<Vec<u8>, Error> {
        let mut out = String::new();

        for line in header_lines(report.header()) {
            writeln!(out, "{line}")?;
        }
        write_column_header(&mut out, report.kind())?;
        writeln!(out)?;

        for row in report.rows() {
            write_row(&mut out, report.kind(), row)?;
        }

        debug!(rows = report.rows().len(), bytes = out.len(); "Rendered text report");
        Ok(out.into_bytes())
    }
}

fn write_column_header(out: &mut String, kind: ReportKind) -> Result<(), Error> {
    match column_titles(kind) {
        [station, northing, easting] => {
            writeln!(out, "{:9}{station:>15} {northing:>15} {easting:>15}", "")?
        }
        [station, elevation] => writeln!(out, "{:5}{station:>15} {elevation:>15}", "")?,
        titles => writeln!(out, "{}", titles.join(" "))?,
    }
    Ok(())
}

fn write_row(out: &mut String, kind: ReportKind, row: &ReportRow) -> Result<(), Error> {
    writeln!(out, "Element: {}", row.kind().heading())?;

    if let Some(message) = row.message() {
        writeln!(out, "{message}")?;
        writeln!(out)?;
        return Ok(());
    }

    for point in row.points() {
        let cells = point_cells(point);
        match (kind, cells.as_slice()) {
            (ReportKind::Horizontal, [label, station, northing, easting]) => writeln!(
                out,
                " {label:<4}( ) {station:>15} {northing:>15} {easting:>15}"
            )?,
            (_, [label, station, elevation]) => {
                writeln!(out, " {label:<3} {station:>15} {elevation:>15}")?
            }
            (_, cells) => writeln!(out, " {}", cells.join(" "))?,
        }
    }

    for (_, metric) in row.metrics() {
        writeln!(out, " {}", metric_text(metric))?;
    }
    writeln!(out)?;
    Ok(())
}
