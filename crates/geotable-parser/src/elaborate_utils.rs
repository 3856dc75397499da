//! Field extraction helpers for the elaboration phase.
//!
//! Each helper turns a raw document field into a model value or a
//! [`Diagnostic`] labelled at the offending span.

use geotable_core::alignment::{SpiralDefinition, TurnDirection};
use toml::Spanned;

use crate::{
    document::ElementTable,
    error::{Diagnostic, ErrorCode, Result as DiagnosticResult},
    span::Span,
};

/// Largest disagreement tolerated between a given and a derived value.
pub(crate) const TOLERANCE: f64 = 1e-6;

pub(crate) fn span_of<T>(value: &Spanned<T>) -> Span {
    Span::new(value.span())
}

pub(crate) fn value_of(field: &Option<Spanned<f64>>) -> Option<f64> {
    field.as_ref().map(|v| *v.get_ref())
}

/// Span of `field` when present, otherwise of the whole element.
pub(crate) fn field_span<T>(field: &Option<Spanned<T>>, element: Span) -> Span {
    field.as_ref().map_or(element, span_of)
}

pub(crate) fn missing_field(name: &str, element: Span) -> Diagnostic {
    Diagnostic::error(format!("missing field `{name}`"))
        .with_code(ErrorCode::E100)
        .with_label(element, format!("`{name}` is required for this element"))
}

pub(crate) fn required(field: &Option<Spanned<f64>>, name: &str, element: Span) -> DiagnosticResult<f64> {
    value_of(field).ok_or_else(|| missing_field(name, element))
}

/// Fails with `code` unless `value` is strictly positive and finite.
pub(crate) fn ensure_positive(
    value: f64,
    field: &Option<Spanned<f64>>,
    element: Span,
    what: &str,
    code: ErrorCode,
) -> DiagnosticResult<()> {
    if value > 0.0 && value.is_finite() {
        return Ok(());
    }
    Err(Diagnostic::error(format!("{what} must be positive"))
        .with_code(code)
        .with_label(field_span(field, element), format!("{what} is {value}")))
}

/// Warning when a given redundant value disagrees with its derivation.
pub(crate) fn inconsistent(
    field: &Spanned<f64>,
    name: &str,
    derived: f64,
    derived_from: &str,
) -> Option<Diagnostic> {
    let given = *field.get_ref();
    if (given - derived).abs() <= TOLERANCE {
        return None;
    }
    Some(
        Diagnostic::warning(format!("`{name}` disagrees with {derived_from}"))
            .with_code(ErrorCode::E203)
            .with_label(span_of(field), format!("given {given}, derived {derived}"))
            .with_help(format!("the given `{name}` is kept")),
    )
}

pub(crate) fn turn_direction(table: &ElementTable, element: Span) -> DiagnosticResult<TurnDirection> {
    if let Some(turn) = &table.turn {
        return match turn.get_ref().to_ascii_lowercase().as_str() {
            "left" => Ok(TurnDirection::Left),
            "right" => Ok(TurnDirection::Right),
            other => Err(Diagnostic::error(format!("unknown turn direction `{other}`"))
                .with_code(ErrorCode::E101)
                .with_label(span_of(turn), "expected `left` or `right`")),
        };
    }

    table
        .clockwise
        .map(TurnDirection::from_clockwise)
        .ok_or_else(|| {
            missing_field("turn", element).with_help("add `turn = \"left\"` or `turn = \"right\"`")
        })
}

pub(crate) fn spiral_definition(table: &ElementTable) -> DiagnosticResult<SpiralDefinition> {
    let Some(definition) = &table.definition else {
        return Ok(SpiralDefinition::default());
    };

    match definition.get_ref().to_ascii_lowercase().as_str() {
        "clothoid" => Ok(SpiralDefinition::Clothoid),
        "cubic_parabola" | "cubicparabola" => Ok(SpiralDefinition::CubicParabola),
        other => Err(Diagnostic::error(format!("unknown spiral definition `{other}`"))
            .with_code(ErrorCode::E101)
            .with_label(span_of(definition), "expected `clothoid` or `cubic_parabola`")),
    }
}

/// Lower-cased element type, or an E100 diagnostic when absent.
pub(crate) fn element_kind(table: &ElementTable, element: Span) -> DiagnosticResult<String> {
    table
        .kind
        .as_ref()
        .map(|kind| kind.get_ref().to_ascii_lowercase())
        .ok_or_else(|| missing_field("type", element))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(source: &str) -> ElementTable {
        toml::from_str(source).unwrap()
    }

    #[test]
    fn test_turn_direction_from_keyword() {
        let table = element("type = 'arc'\nturn = 'Left'");
        assert_eq!(
            turn_direction(&table, Span::default()).unwrap(),
            TurnDirection::Left
        );
    }

    #[test]
    fn test_turn_direction_from_clockwise() {
        let table = element("type = 'arc'\nclockwise = true");
        assert_eq!(
            turn_direction(&table, Span::default()).unwrap(),
            TurnDirection::Right
        );
    }

    #[test]
    fn test_turn_direction_rejects_unknown() {
        let table = element("type = 'arc'\nturn = 'up'");
        let diag = turn_direction(&table, Span::default()).unwrap_err();
        assert_eq!(diag.code(), Some(ErrorCode::E101));
    }

    #[test]
    fn test_turn_direction_missing() {
        let table = element("type = 'arc'");
        let diag = turn_direction(&table, Span::new(0..12)).unwrap_err();
        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert!(diag.help().is_some());
    }

    #[test]
    fn test_ensure_positive_labels_field() {
        let table = element("type = 'arc'\nradius = -5.0");
        let diag = ensure_positive(-5.0, &table.radius, Span::default(), "radius", ErrorCode::E201)
            .unwrap_err();

        assert_eq!(diag.code(), Some(ErrorCode::E201));
        assert!(!diag.labels()[0].span().is_empty());
    }

    #[test]
    fn test_inconsistent_within_tolerance() {
        let table = element("type = 'line'\nend_station = 100.0000001");
        let field = table.end_station.as_ref().unwrap();
        assert!(inconsistent(field, "end_station", 100.0, "start + length").is_none());
        assert!(inconsistent(field, "end_station", 101.0, "start + length").is_some());
    }

    #[test]
    fn test_spiral_definition_default() {
        let table = element("type = 'spiral'");
        assert_eq!(spiral_definition(&table).unwrap(), SpiralDefinition::Clothoid);
    }
}
