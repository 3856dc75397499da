//! Command-line argument definitions for the GeoTable CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the report kind and
//! encoding, configuration file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

/// Which report to produce from the alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportKindArg {
    /// Lines, arcs and spirals of the horizontal alignment
    #[default]
    Horizontal,
    /// Tangents and vertical curves of the layout profile
    Vertical,
}

/// Output encoding of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Xml,
    Document,
}

/// Command-line arguments for the GeoTable report tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input alignment document
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output report file
    #[arg(short, long, default_value = "report.txt")]
    pub output: String,

    /// Output encoding; inferred from the output extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Report to produce
    #[arg(short, long, value_enum, default_value_t = ReportKindArg::Horizontal)]
    pub report: ReportKindArg,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
