//! Report model builder.
//!
//! Walks an element sequence once, in order, and produces one
//! [`ReportRow`] per element. Spiral-curve-spiral groups are expanded into
//! their parts first, so the row count always equals the number of
//! expanded elements and every part sees its real neighbours.
//!
//! Neighbour-dependent line labels are decided here, in [`line_labels`],
//! and nowhere else.

use std::cmp::Ordering;

use geotable_core::{
    alignment::{AlignmentElement, ElementType},
    geometry::GeometryProvider,
    profile::ProfileElement,
    report::ReportRow,
};
use log::{debug, trace};

use crate::{
    config::ReportConfig,
    engine::{HorizontalEngine, LineLabels, VerticalEngine},
};

/// Chooses a line's labels from its position in the chain.
///
/// | position        | start | end                                   |
/// |-----------------|-------|---------------------------------------|
/// | first           | `POT` |                                       |
/// | otherwise       | `PI`  |                                       |
/// | last            |       | `POT`                                 |
/// | before a spiral |       | `TS`                                  |
/// | before an arc   |       | `PC`                                  |
/// | otherwise       |       | `PI`                                  |
pub fn line_labels(is_first: bool, next: Option<ElementType>) -> LineLabels {
    let start = if is_first { "POT" } else { "PI" };
    let end = match next {
        None => "POT",
        Some(ElementType::Spiral) => "TS",
        Some(ElementType::Arc) => "PC",
        Some(_) => "PI",
    };
    LineLabels { start, end }
}

/// Flattens spiral-curve-spiral groups into their parts, in chain order.
pub fn expand(elements: &[AlignmentElement]) -> Vec<AlignmentElement> {
    elements
        .iter()
        .flat_map(|element| match element {
            AlignmentElement::SpiralCurveSpiral(group) => group.parts(),
            other => vec![other.clone()],
        })
        .collect()
}

/// Orders stations ascending with non-finite stations last.
fn station_order(a: f64, b: f64) -> Ordering {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => a.total_cmp(&b),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// Builds report rows from element sequences.
#[derive(Debug)]
pub struct ModelBuilder<'a> {
    config: &'a ReportConfig,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    /// One row per expanded horizontal element.
    pub fn horizontal_rows<P>(&self, elements: &[AlignmentElement], provider: &P) -> Vec<ReportRow>
    where
        P: GeometryProvider + ?Sized,
    {
        let mut elements = expand(elements);
        if self.config.sort_by_station() {
            elements.sort_by(|a, b| station_order(a.start_station(), b.start_station()));
        }

        let engine = HorizontalEngine::new(provider, self.config);
        let rows: Vec<_> = elements
            .iter()
            .enumerate()
            .map(|(index, element)| {
                trace!(index, element:?; "Building horizontal row");
                match element {
                    AlignmentElement::Line(line) => {
                        let next = elements.get(index + 1).map(AlignmentElement::element_type);
                        engine.line_row(line, line_labels(index == 0, next))
                    }
                    AlignmentElement::Arc(arc) => engine.arc_row(arc),
                    AlignmentElement::Spiral(spiral) => engine.spiral_row(spiral),
                    // Groups nested in groups are not expanded further
                    AlignmentElement::SpiralCurveSpiral(_) | AlignmentElement::Unsupported(_) => {
                        ReportRow::unsupported(element.type_name())
                    }
                }
            })
            .collect();

        debug!(rows = rows.len(); "Built horizontal rows");
        rows
    }

    /// One row per profile element.
    pub fn vertical_rows(&self, elements: &[ProfileElement]) -> Vec<ReportRow> {
        let mut elements: Vec<&ProfileElement> = elements.iter().collect();
        if self.config.sort_by_station() {
            elements.sort_by(|a, b| station_order(a.start_station(), b.start_station()));
        }

        let engine = VerticalEngine::new(self.config);
        let rows: Vec<_> = elements
            .iter()
            .enumerate()
            .map(|(index, element)| {
                trace!(index, element:?; "Building vertical row");
                match element {
                    ProfileElement::Tangent(tangent) => engine.tangent_row(tangent, index == 0),
                    ProfileElement::Parabola(parabola) => engine.parabola_row(parabola),
                    ProfileElement::Unsupported(other) => {
                        ReportRow::unsupported(other.type_name.clone())
                    }
                }
            })
            .collect();

        debug!(rows = rows.len(); "Built vertical rows");
        rows
    }
}
