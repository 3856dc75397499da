//! Elaboration: raw document tables to the core alignment model.
//!
//! Elements are walked in document order while a cursor tracks the running
//! station, heading and elevation. Omitted redundant fields are derived from
//! the cursor; given ones are checked against it. Problems are collected
//! rather than returned early so a single load reports all of them.

use geotable_core::{
    alignment::{
        Alignment, AlignmentElement, Arc, Line, Project, Spiral, SpiralCurveSpiral, TurnDirection,
        UnsupportedElement,
    },
    geometry::Point3D,
    profile::{Parabola, Profile, ProfileElement, Tangent, UnsupportedProfileElement},
};
use log::{debug, trace};
use toml::Spanned;

use crate::{
    document::{AlignmentTable, Document, ElementTable, ProfileTable},
    elaborate_utils::{
        TOLERANCE, element_kind, ensure_positive, field_span, inconsistent, missing_field,
        required, span_of, spiral_definition, turn_direction, value_of,
    },
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError, Result as DiagnosticResult},
    span::Span,
};

/// Running position along the horizontal chain.
#[derive(Debug, Clone, Copy)]
struct HorizontalCursor {
    station: f64,
    /// Radians.
    azimuth: f64,
}

/// Running position along a profile.
#[derive(Debug, Clone, Copy, Default)]
struct VerticalCursor {
    station: Option<f64>,
    elevation: Option<f64>,
}

/// Start, end and length of an element after derivation.
#[derive(Debug, Clone, Copy)]
struct StationRange {
    start: f64,
    end: f64,
    length: f64,
}

/// Which part of a spiral-curve-spiral group a table fills.
#[derive(Debug, Clone, Copy)]
enum GroupPart {
    SpiralIn,
    Arc,
    SpiralOut,
}

impl GroupPart {
    fn field(self) -> &'static str {
        match self {
            Self::SpiralIn => "spiral_in",
            Self::Arc => "arc",
            Self::SpiralOut => "spiral_out",
        }
    }

    fn expected_kind(self) -> &'static str {
        match self {
            Self::SpiralIn | Self::SpiralOut => "spiral",
            Self::Arc => "arc",
        }
    }
}

pub(crate) struct Builder {
    collector: DiagnosticCollector,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            collector: DiagnosticCollector::new(),
        }
    }

    /// Elaborates `document`, returning the project and any warnings.
    pub fn build(mut self, document: Document) -> Result<(Project, Vec<Diagnostic>), ParseError> {
        let alignment_span = span_of(&document.alignment);
        let alignment_table = document.alignment.into_inner();
        let profiles: Vec<Profile> = document
            .profiles
            .iter()
            .map(|profile| self.profile(profile))
            .collect();

        if alignment_table.elements.is_empty() {
            self.collector.emit(
                Diagnostic::warning("alignment has no elements")
                    .with_label(alignment_span, "horizontal report will be empty"),
            );
        }

        let alignment = self.alignment(alignment_table).with_profiles(profiles);
        let mut project = Project::new(document.project.into_inner(), alignment);
        if let Some(description) = document.description {
            project = project.with_description(description);
        }

        let warnings = self.collector.finish()?;
        debug!(
            elements = project.alignment().elements().len(),
            profiles = project.alignment().profiles().len(),
            warnings = warnings.len();
            "Elaborated document"
        );
        Ok((project, warnings))
    }

    fn alignment(&mut self, table: AlignmentTable) -> Alignment {
        let azimuth = table.azimuth.to_radians();
        let mut cursor = HorizontalCursor {
            station: table.start_station,
            azimuth,
        };

        let mut elements = Vec::with_capacity(table.elements.len());
        for element in &table.elements {
            match self.alignment_element(element, &mut cursor) {
                Ok(element) => {
                    trace!(element:?; "Elaborated alignment element");
                    elements.push(element);
                }
                Err(diag) => self.collector.emit(diag),
            }
        }

        let mut alignment = Alignment::new(table.name)
            .with_start(
                table.start_station,
                Point3D::new(table.northing, table.easting, 0.0),
                azimuth,
            )
            .with_elements(elements);
        if let Some(description) = table.description {
            alignment = alignment.with_description(description);
        }
        if let Some(style) = table.style {
            alignment = alignment.with_style(style);
        }
        alignment
    }

    fn alignment_element(
        &mut self,
        element: &Spanned<ElementTable>,
        cursor: &mut HorizontalCursor,
    ) -> DiagnosticResult<AlignmentElement> {
        let span = span_of(element);
        let table = element.get_ref();

        match element_kind(table, span)?.as_str() {
            "line" => self.line(table, span, cursor).map(AlignmentElement::Line),
            "arc" => self.arc(table, span, cursor).map(AlignmentElement::Arc),
            "spiral" => self.spiral(table, span, cursor).map(AlignmentElement::Spiral),
            "scs" | "spiral_curve_spiral" => self
                .spiral_curve_spiral(table, span, cursor)
                .map(AlignmentElement::SpiralCurveSpiral),
            other => {
                let range = unsupported_range(table, cursor.station);
                self.collector.emit(unsupported_type_warning(other, table, span));
                cursor.station = range.end;
                Ok(AlignmentElement::Unsupported(UnsupportedElement {
                    type_name: original_kind(table, other),
                    start_station: range.start,
                    end_station: range.end,
                }))
            }
        }
    }

    fn line(
        &mut self,
        table: &ElementTable,
        span: Span,
        cursor: &mut HorizontalCursor,
    ) -> DiagnosticResult<Line> {
        let range = self.station_range(table, span, cursor.station, None)?;
        let direction = value_of(&table.direction).map_or(cursor.azimuth, f64::to_radians);

        cursor.station = range.end;
        cursor.azimuth = direction;
        Ok(Line {
            start_station: range.start,
            end_station: range.end,
            length: range.length,
            direction,
        })
    }

    fn arc(
        &mut self,
        table: &ElementTable,
        span: Span,
        cursor: &mut HorizontalCursor,
    ) -> DiagnosticResult<Arc> {
        let radius = required(&table.radius, "radius", span)?;
        ensure_positive(radius, &table.radius, span, "arc radius", ErrorCode::E201)?;
        let direction = turn_direction(table, span)?;

        let given_delta = value_of(&table.delta).map(f64::to_radians);
        let range = self.station_range(table, span, cursor.station, given_delta.map(|d| d.abs() * radius))?;

        let delta = range.length / radius;
        if let Some(diag) = table
            .delta
            .as_ref()
            .and_then(|field| inconsistent(field, "delta", delta.to_degrees(), "length / radius"))
        {
            self.collector.emit(diag);
        }

        let center_point = table
            .center_northing
            .zip(table.center_easting)
            .map(|(northing, easting)| Point3D::new(northing, easting, 0.0));

        cursor.station = range.end;
        cursor.azimuth += direction.sign() * delta;
        Ok(Arc {
            start_station: range.start,
            end_station: range.end,
            length: range.length,
            radius,
            delta,
            clockwise: direction == TurnDirection::Right,
            center_point,
        })
    }

    fn spiral(
        &mut self,
        table: &ElementTable,
        span: Span,
        cursor: &mut HorizontalCursor,
    ) -> DiagnosticResult<Spiral> {
        let radius_in = value_of(&table.radius_in).unwrap_or(0.0);
        let radius_out = value_of(&table.radius_out).unwrap_or(0.0);
        for (value, field) in [(radius_in, &table.radius_in), (radius_out, &table.radius_out)] {
            if value < 0.0 {
                return Err(Diagnostic::error("spiral radius must not be negative")
                    .with_code(ErrorCode::E201)
                    .with_label(field_span(field, span), format!("radius is {value}"))
                    .with_help("use 0 for the tangent end"));
            }
        }

        if (radius_in == 0.0) == (radius_out == 0.0) {
            self.collector.emit(
                Diagnostic::warning("spiral should have exactly one radius at the tangent end")
                    .with_code(ErrorCode::E204)
                    .with_label(span, format!("radius_in is {radius_in}, radius_out is {radius_out}"))
                    .with_help("set `radius_in` or `radius_out` to 0"),
            );
        }

        let direction = turn_direction(table, span)?;
        let definition = spiral_definition(table)?;
        let range = self.station_range(table, span, cursor.station, None)?;

        let spiral = Spiral {
            start_station: range.start,
            end_station: range.end,
            length: range.length,
            radius_in,
            radius_out,
            a: table.a,
            definition,
            direction,
        };

        cursor.station = range.end;
        cursor.azimuth += direction.sign() * spiral.deflection();
        Ok(spiral)
    }

    fn spiral_curve_spiral(
        &mut self,
        table: &ElementTable,
        span: Span,
        cursor: &mut HorizontalCursor,
    ) -> DiagnosticResult<SpiralCurveSpiral> {
        let spiral_in = self.group_part(table.spiral_in.as_deref(), GroupPart::SpiralIn, cursor)?;
        let arc = self.group_part(table.arc.as_deref(), GroupPart::Arc, cursor)?;
        let spiral_out = self.group_part(table.spiral_out.as_deref(), GroupPart::SpiralOut, cursor)?;

        let group = SpiralCurveSpiral {
            spiral_in: spiral_in.and_then(into_spiral),
            arc: arc.and_then(|part| match part {
                AlignmentElement::Arc(arc) => Some(arc),
                _ => None,
            }),
            spiral_out: spiral_out.and_then(into_spiral),
        };

        if group.parts().is_empty() {
            return Err(missing_field("arc", span)
                .with_help("a spiral-curve-spiral group needs at least one part"));
        }
        Ok(group)
    }

    fn group_part(
        &mut self,
        part: Option<&Spanned<ElementTable>>,
        which: GroupPart,
        cursor: &mut HorizontalCursor,
    ) -> DiagnosticResult<Option<AlignmentElement>> {
        let Some(part) = part else {
            return Ok(None);
        };
        let span = span_of(part);
        let table = part.get_ref();

        let mismatched = table
            .kind
            .as_ref()
            .filter(|kind| !kind.get_ref().eq_ignore_ascii_case(which.expected_kind()));
        if let Some(kind) = mismatched {
            return Err(Diagnostic::error(format!(
                "`{}` must be a {}",
                which.field(),
                which.expected_kind()
            ))
            .with_code(ErrorCode::E103)
            .with_label(span_of(kind), format!("found `{}`", kind.get_ref())));
        }

        let element = match which {
            GroupPart::SpiralIn | GroupPart::SpiralOut => {
                AlignmentElement::Spiral(self.spiral(table, span, cursor)?)
            }
            GroupPart::Arc => AlignmentElement::Arc(self.arc(table, span, cursor)?),
        };
        Ok(Some(element))
    }

    /// Resolves start, end and length, deriving whichever are omitted.
    ///
    /// `fallback_length` is used when neither `length` nor `end_station`
    /// is given.
    fn station_range(
        &mut self,
        table: &ElementTable,
        span: Span,
        cursor_station: f64,
        fallback_length: Option<f64>,
    ) -> DiagnosticResult<StationRange> {
        let start = match &table.start_station {
            Some(field) => {
                if let Some(diag) =
                    inconsistent(field, "start_station", cursor_station, "the previous element's end")
                {
                    self.collector.emit(diag);
                }
                *field.get_ref()
            }
            None => cursor_station,
        };

        let length = value_of(&table.length).or(if table.end_station.is_none() {
            fallback_length
        } else {
            None
        });

        let range = match (length, &table.end_station) {
            (Some(length), end_field) => {
                ensure_positive(length, &table.length, span, "length", ErrorCode::E202)?;
                let end = match end_field {
                    Some(field) => {
                        if let Some(diag) =
                            inconsistent(field, "end_station", start + length, "start + length")
                        {
                            self.collector.emit(diag);
                        }
                        *field.get_ref()
                    }
                    None => start + length,
                };
                StationRange { start, end, length }
            }
            (None, Some(field)) => StationRange {
                start,
                end: *field.get_ref(),
                length: *field.get_ref() - start,
            },
            (None, None) => {
                return Err(missing_field("length", span)
                    .with_help("give `length` or `end_station`"));
            }
        };

        if range.end - range.start <= TOLERANCE {
            let mut diag = Diagnostic::error("end station must exceed start station")
                .with_code(ErrorCode::E200)
                .with_label(
                    field_span(&table.end_station, span),
                    format!("ends at {}", range.end),
                );
            if let Some(field) = &table.start_station {
                diag = diag.with_secondary_label(span_of(field), format!("starts at {}", range.start));
            }
            return Err(diag.with_help("stations must increase along the alignment"));
        }

        Ok(range)
    }

    fn profile(&mut self, profile: &Spanned<ProfileTable>) -> Profile {
        let table = profile.get_ref();
        let mut cursor = VerticalCursor::default();

        let mut elements = Vec::with_capacity(table.elements.len());
        for element in &table.elements {
            match self.profile_element(element, &mut cursor) {
                Ok(element) => {
                    trace!(element:?; "Elaborated profile element");
                    elements.push(element);
                }
                Err(diag) => self.collector.emit(diag),
            }
        }

        let mut result = Profile::new(table.name.clone()).with_elements(elements);
        if let Some(description) = &table.description {
            result = result.with_description(description.clone());
        }
        if let Some(style) = &table.style {
            result = result.with_style(style.clone());
        }
        result
    }

    fn profile_element(
        &mut self,
        element: &Spanned<ElementTable>,
        cursor: &mut VerticalCursor,
    ) -> DiagnosticResult<ProfileElement> {
        let span = span_of(element);
        let table = element.get_ref();

        match element_kind(table, span)?.as_str() {
            "tangent" => self.tangent(table, span, cursor).map(ProfileElement::Tangent),
            "parabola" => self.parabola(table, span, cursor).map(ProfileElement::Parabola),
            other => {
                self.collector.emit(unsupported_type_warning(other, table, span));
                let start = value_of(&table.start_station)
                    .or(cursor.station)
                    .ok_or_else(|| missing_field("start_station", span))?;
                let range = unsupported_range(table, start);
                *cursor = VerticalCursor {
                    station: Some(range.end),
                    elevation: None,
                };
                Ok(ProfileElement::Unsupported(UnsupportedProfileElement {
                    type_name: original_kind(table, other),
                    start_station: range.start,
                    end_station: range.end,
                }))
            }
        }
    }

    fn tangent(
        &mut self,
        table: &ElementTable,
        span: Span,
        cursor: &mut VerticalCursor,
    ) -> DiagnosticResult<Tangent> {
        let cursor_station = cursor
            .station
            .or(value_of(&table.start_station))
            .ok_or_else(|| missing_field("start_station", span))?;
        let range = self.station_range(table, span, cursor_station, None)?;

        let start_elevation = value_of(&table.start_elevation)
            .or(cursor.elevation)
            .ok_or_else(|| missing_field("start_elevation", span))?;
        let end_elevation = match (value_of(&table.end_elevation), value_of(&table.grade)) {
            (Some(elevation), _) => elevation,
            (None, Some(grade)) => start_elevation + grade / 100.0 * range.length,
            (None, None) => {
                return Err(missing_field("end_elevation", span).with_help("give `end_elevation` or `grade`"));
            }
        };

        let tangent = Tangent::between(range.start, start_elevation, range.end, end_elevation);
        if let Some(diag) = table
            .grade
            .as_ref()
            .and_then(|field| inconsistent(field, "grade", tangent.grade * 100.0, "the elevations"))
        {
            self.collector.emit(diag);
        }

        *cursor = VerticalCursor {
            station: Some(tangent.end_station),
            elevation: Some(tangent.end_elevation),
        };
        Ok(tangent)
    }

    fn parabola(
        &mut self,
        table: &ElementTable,
        span: Span,
        cursor: &mut VerticalCursor,
    ) -> DiagnosticResult<Parabola> {
        let pvi_station = required(&table.pvi_station, "pvi_station", span)?;
        let pvi_elevation = required(&table.pvi_elevation, "pvi_elevation", span)?;
        let length = required(&table.length, "length", span)?;
        ensure_positive(length, &table.length, span, "length", ErrorCode::E202)?;
        let grade_in = required(&table.grade_in, "grade_in", span)? / 100.0;
        let grade_out = required(&table.grade_out, "grade_out", span)? / 100.0;

        let mut parabola = Parabola::symmetric(pvi_station, pvi_elevation, length, grade_in, grade_out);

        let checks = [
            (&table.start_station, "start_station", parabola.start_station, "pvi_station - length / 2"),
            (&table.end_station, "end_station", parabola.end_station, "pvi_station + length / 2"),
        ];
        for (field, name, derived, derived_from) in checks {
            if let Some(diag) = field
                .as_ref()
                .and_then(|field| inconsistent(field, name, derived, derived_from))
            {
                self.collector.emit(diag);
            }
        }
        if let Some(elevation) = value_of(&table.end_elevation) {
            parabola.end_elevation = elevation;
        }

        *cursor = VerticalCursor {
            station: Some(parabola.end_station),
            elevation: Some(parabola.end_elevation),
        };
        Ok(parabola)
    }
}

/// Best-effort range for elements whose schema is unknown.
fn unsupported_range(table: &ElementTable, cursor_station: f64) -> StationRange {
    let start = value_of(&table.start_station).unwrap_or(cursor_station);
    let end = value_of(&table.end_station)
        .or_else(|| value_of(&table.length).map(|length| start + length))
        .unwrap_or(start);
    StationRange {
        start,
        end,
        length: end - start,
    }
}

fn into_spiral(element: AlignmentElement) -> Option<Spiral> {
    match element {
        AlignmentElement::Spiral(spiral) => Some(spiral),
        _ => None,
    }
}

/// The `type` string exactly as written.
fn original_kind(table: &ElementTable, lowered: &str) -> String {
    table
        .kind
        .as_ref()
        .map_or_else(|| lowered.to_string(), |kind| kind.get_ref().clone())
}

fn unsupported_type_warning(kind: &str, table: &ElementTable, span: Span) -> Diagnostic {
    Diagnostic::warning(format!("unsupported element type `{kind}`"))
        .with_code(ErrorCode::E102)
        .with_label(field_span(&table.kind, span), "reported as a placeholder row")
}
