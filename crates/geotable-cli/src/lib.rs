//! CLI logic for the GeoTable report tool.
//!
//! This module contains the core CLI logic: load the alignment document,
//! build the requested report, and write it in the requested encoding.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, FormatArg, ReportKindArg};

use std::{fs, path::Path};

use log::{debug, info};

use geotable::{Format, GeoTableError, ReportBuilder};

/// Run the GeoTable CLI application
///
/// This function processes the input file through the GeoTable pipeline
/// and writes the rendered report to the output file.
///
/// # Errors
///
/// Returns `GeoTableError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Reports that cannot be built (no profile for a vertical report)
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), GeoTableError> {
    let format = args
        .format
        .map(Format::from)
        .unwrap_or_else(|| infer_format(&args.output));

    info!(
        input_path = args.input,
        output_path = args.output,
        format:% = format;
        "Processing alignment"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;

    let builder = ReportBuilder::new(app_config);
    let project = builder.parse(&source)?;
    let report = match args.report {
        ReportKindArg::Horizontal => builder.horizontal_report(&project)?,
        ReportKindArg::Vertical => builder.vertical_report(&project)?,
    };
    let bytes = builder.render(&report, format)?;

    fs::write(&args.output, bytes)?;

    info!(output_file = args.output; "Report exported successfully");

    Ok(())
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Format::Text,
            FormatArg::Xml => Format::Xml,
            FormatArg::Document => Format::Document,
        }
    }
}

/// Pick an encoding from the output file name.
///
/// `.xml` selects XML; `.pdf` and `.doc.txt` select the paginated document;
/// anything else is plain text.
fn infer_format(output: &str) -> Format {
    let name = Path::new(output)
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let format = if name.ends_with(".xml") {
        Format::Xml
    } else if name.ends_with(".pdf") || name.ends_with(".doc.txt") {
        Format::Document
    } else {
        Format::Text
    };
    debug!(output = output, format:% = format; "Inferred output format");
    format
}
